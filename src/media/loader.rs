use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::MergeError;

pub const PROJECT_COLUMN: &str = "Project";
pub const MEDIA_COLUMN: &str = "Media Objects";

#[derive(Debug)]
pub enum RowEvent {
    Parsed { project: String, items: usize },
    Failed { project: String, error: MergeError },
}

#[derive(Debug, Default)]
pub struct LoadedMedia {
    /// Decoded media arrays keyed by trimmed project name. A later row for the
    /// same project replaces an earlier one.
    pub by_project: BTreeMap<String, Vec<Value>>,
    pub events: Vec<RowEvent>,
    pub rows_read: usize,
    pub rows_blank: usize,
}

impl LoadedMedia {
    pub fn failures(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, RowEvent::Failed { .. }))
            .count()
    }
}

pub fn parse_media_cell(project: &str, cell: &str) -> Result<Vec<Value>, MergeError> {
    serde_json::from_str::<Vec<Value>>(cell).map_err(|source| MergeError::MediaCell {
        project: project.to_string(),
        source,
    })
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    // duplicate header names resolve to the right-most column
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header == name)
        .map(|(idx, _)| idx)
        .last()
}

fn cell<'a>(record: &'a csv::StringRecord, index: Option<usize>) -> &'a str {
    index
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .unwrap_or("")
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<LoadedMedia> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("failed to read CSV header row")?.clone();
    let project_idx = column_index(&headers, PROJECT_COLUMN);
    let media_idx = column_index(&headers, MEDIA_COLUMN);

    let mut loaded = LoadedMedia::default();
    for record in rdr.records() {
        let record = record.context("failed to read CSV record")?;
        loaded.rows_read += 1;

        let project = cell(&record, project_idx);
        let media = cell(&record, media_idx);
        if project.is_empty() || media.is_empty() {
            loaded.rows_blank += 1;
            continue;
        }

        match parse_media_cell(project, media) {
            Ok(items) => {
                loaded.events.push(RowEvent::Parsed {
                    project: project.to_string(),
                    items: items.len(),
                });
                loaded.by_project.insert(project.to_string(), items);
            }
            Err(error) => loaded.events.push(RowEvent::Failed {
                project: project.to_string(),
                error,
            }),
        }
    }

    Ok(loaded)
}

pub fn load_csv(path: &Path) -> Result<LoadedMedia> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    load_from_reader(file).with_context(|| format!("failed to load {}", path.display()))
}
