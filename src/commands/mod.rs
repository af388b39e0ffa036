pub mod classify_media;
pub mod merge_media;

use serde::Serialize;

use crate::error::MergeError;
use crate::media::loader::{LoadedMedia, RowEvent};
use crate::media::warn;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }
}

/// Record per-row load diagnostics on `report` and mirror failures to stderr.
pub fn report_load(report: &mut CommandReport, loaded: &LoadedMedia) {
    for event in &loaded.events {
        match event {
            RowEvent::Parsed { project, items } => {
                report.detail(format!("✓ Parsed media for: {project}"));
                report.detail(format!("  Found {items} items"));
            }
            RowEvent::Failed { project, error } => {
                let cause = match error {
                    MergeError::MediaCell { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                report.detail(format!("✗ Error parsing media for {project}: {cause}"));
                warn::emit("W001", "csv", project, "media objects cell failed to decode", &cause);
            }
        }
    }
    report.detail(format!(
        "rows_read={} rows_blank={}",
        loaded.rows_read, loaded.rows_blank
    ));
    report.detail(format!(
        "Total projects with media data: {}",
        loaded.by_project.len()
    ));
}
