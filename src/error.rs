use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("projects document {} is not a JSON array", path.display())]
    NotAnArray { path: PathBuf },
    #[error("project `{project}` has no `{field}` array to append to")]
    MissingSequence { project: String, field: &'static str },
    #[error("media objects for `{project}` are not a JSON array: {source}")]
    MediaCell {
        project: String,
        #[source]
        source: serde_json::Error,
    },
}
