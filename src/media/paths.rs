use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_CSV_NAME: &str = "Production Data - ProdData 2_26.csv";
pub const DEFAULT_PROJECTS_NAME: &str = "projects.json";

#[derive(Debug, Clone)]
pub struct MergePaths {
    pub data_dir: PathBuf,
    pub csv_file: PathBuf,
    pub projects_file: PathBuf,
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

fn resolve_with(data_dir: &Path, csv: Option<&Path>, projects: Option<&Path>) -> MergePaths {
    let csv_file = match csv {
        Some(path) => path.to_path_buf(),
        None => env_or_default_path("MEDIA_MERGE_CSV", data_dir.join(DEFAULT_CSV_NAME)),
    };
    let projects_file = match projects {
        Some(path) => path.to_path_buf(),
        None => env_or_default_path(
            "MEDIA_MERGE_PROJECTS",
            data_dir.join(DEFAULT_PROJECTS_NAME),
        ),
    };

    MergePaths {
        data_dir: data_dir.to_path_buf(),
        csv_file,
        projects_file,
    }
}

/// Resolve input and output locations.
///
/// Explicit overrides win, then `MEDIA_MERGE_CSV` / `MEDIA_MERGE_PROJECTS`,
/// then the default file names under `MEDIA_MERGE_DATA_DIR` (or `./data`).
pub fn resolve_paths(csv: Option<&Path>, projects: Option<&Path>) -> MergePaths {
    let data_dir = env_or_default_path("MEDIA_MERGE_DATA_DIR", PathBuf::from("data"));
    resolve_with(&data_dir, csv, projects)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_overrides_are_kept_verbatim() {
        let paths = resolve_with(
            Path::new("/srv/data"),
            Some(Path::new("/tmp/in.csv")),
            Some(Path::new("/tmp/out.json")),
        );
        assert_eq!(paths.csv_file, PathBuf::from("/tmp/in.csv"));
        assert_eq!(paths.projects_file, PathBuf::from("/tmp/out.json"));
        assert_eq!(paths.data_dir, PathBuf::from("/srv/data"));
    }
}
