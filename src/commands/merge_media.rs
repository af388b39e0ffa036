use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::commands::{CommandReport, report_load};
use crate::error::MergeError;
use crate::media::classify::{ClassifiedMedia, classify_all};
use crate::media::merge::merge_projects;
use crate::media::paths::resolve_paths;
use crate::media::{loader, writer};

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    pub csv: Option<PathBuf>,
    pub projects: Option<PathBuf>,
    pub dry_run: bool,
    pub backup: bool,
    pub strict: bool,
}

pub fn run(opts: &MergeOptions) -> Result<CommandReport> {
    let paths = resolve_paths(opts.csv.as_deref(), opts.projects.as_deref());
    let mut report = CommandReport::new("merge");
    report.detail(format!("data_dir={}", paths.data_dir.display()));
    report.detail(format!("csv={}", paths.csv_file.display()));
    report.detail(format!("projects={}", paths.projects_file.display()));

    let loaded = loader::load_csv(&paths.csv_file)?;
    report_load(&mut report, &loaded);

    let failures = loaded.failures();
    if opts.strict && failures > 0 {
        report.issue(format!(
            "strict: {failures} CSV rows had unreadable media objects; projects file not written"
        ));
        return Ok(report);
    }

    let classified: BTreeMap<String, ClassifiedMedia> = loaded
        .by_project
        .iter()
        .map(|(project, media)| (project.clone(), classify_all(media)))
        .collect();

    let mut document = writer::read_projects(&paths.projects_file)?;
    let Value::Array(projects) = &mut document else {
        return Err(MergeError::NotAnArray {
            path: paths.projects_file.clone(),
        }
        .into());
    };

    let summary = merge_projects(projects, &classified)?;
    for merged in &summary.merged {
        report.detail(format!("✓ Merged data for: {}", merged.project));
        if merged.artworks > 0 {
            report.detail(format!("  - Added {} artworks", merged.artworks));
        }
        if merged.music > 0 {
            report.detail(format!("  - Added {} music items", merged.music));
        }
        if merged.poems > 0 {
            report.detail(format!("  - Added {} poems", merged.poems));
        }
        if merged.outcomes > 0 {
            report.detail(format!("  - Added {} outcomes", merged.outcomes));
        }
    }
    report.detail(format!(
        "Matched projects: {}/{}",
        summary.matched, summary.total
    ));

    let unrecognized: usize = summary
        .merged
        .iter()
        .filter_map(|merged| classified.get(&merged.project))
        .map(|media| media.unrecognized)
        .sum();
    if unrecognized > 0 {
        report.detail(format!("dropped {unrecognized} unrecognized media objects"));
    }

    if opts.dry_run {
        report.detail(format!(
            "dry-run: {} not written",
            paths.projects_file.display()
        ));
        return Ok(report);
    }

    if opts.backup {
        let backup_path = writer::backup(&paths.projects_file, &writer::backup_stamp())?;
        report.detail(format!("backup={}", backup_path.display()));
    }

    writer::write_projects(&paths.projects_file, &document)?;
    report.detail(format!(
        "✓ Successfully updated {}",
        paths.projects_file.display()
    ));

    Ok(report)
}
