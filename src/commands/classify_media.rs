use anyhow::Result;
use std::path::PathBuf;

use crate::commands::{CommandReport, report_load};
use crate::media::classify::classify_all;
use crate::media::loader;
use crate::media::paths::resolve_paths;

#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    pub csv: Option<PathBuf>,
}

pub fn run(opts: &ClassifyOptions) -> Result<CommandReport> {
    let paths = resolve_paths(opts.csv.as_deref(), None);
    let mut report = CommandReport::new("classify");
    report.detail(format!("data_dir={}", paths.data_dir.display()));
    report.detail(format!("csv={}", paths.csv_file.display()));

    let loaded = loader::load_csv(&paths.csv_file)?;
    report_load(&mut report, &loaded);

    for (project, media) in &loaded.by_project {
        let buckets = classify_all(media);
        report.detail(format!(
            "{project}: artworks={} music={} poems={} outcomes={} unrecognized={}",
            buckets.artworks.len(),
            buckets.music.len(),
            buckets.poems.len(),
            buckets.outcomes.len(),
            buckets.unrecognized,
        ));
    }

    Ok(report)
}
