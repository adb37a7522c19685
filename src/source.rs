//! Discovery of plain-text inputs under a collection root.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SubsecRound, Utc};
use walkdir::WalkDir;

use crate::error::{NotekeepError, Result};

/// One input file waiting to be ingested.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceItem {
    pub path: PathBuf,
    /// Title hint: the file stem.
    pub name: String,
    /// Modification time, used verbatim as `createdAt`.
    pub created_at: DateTime<Utc>,
}

impl SourceItem {
    pub fn read_text(&self) -> std::io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

/// List the files under `root` whose extension is in `extensions`, sorted
/// by path. A missing root is an error; unreadable entries are skipped.
pub fn discover(root: &Path, extensions: &[String]) -> Result<Vec<SourceItem>> {
    if !root.is_dir() {
        return Err(NotekeepError::SourceRootMissing(root.to_path_buf()));
    }

    let mut items = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }

        let modified = entry
            .metadata()
            .map_err(std::io::Error::from)
            .and_then(|m| m.modified());
        let modified = match modified {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!(
                    path = %entry.path().display(),
                    error = %e,
                    "skipping file without a modification time"
                );
                continue;
            }
        };

        let path = entry.into_path();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        items.push(SourceItem {
            path,
            name,
            created_at: DateTime::<Utc>::from(modified).trunc_subsecs(3),
        });
    }

    items.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(items)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn txt() -> Vec<String> {
        vec!["txt".to_string()]
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = discover(&tmp.path().join("nope"), &txt());
        assert!(matches!(result, Err(NotekeepError::SourceRootMissing(_))));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        assert!(discover(&file, &txt()).is_err());
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(discover(tmp.path(), &txt()).unwrap().is_empty());
    }

    #[test]
    fn test_filters_by_extension_and_sorts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b-notes.txt"), "b").unwrap();
        fs::write(tmp.path().join("a_notes.TXT"), "a").unwrap();
        fs::write(tmp.path().join("image.png"), "png").unwrap();
        fs::write(tmp.path().join("README"), "no extension").unwrap();
        fs::create_dir_all(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/c.txt"), "c").unwrap();

        let items = discover(tmp.path(), &txt()).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a_notes", "b-notes", "c"]);
    }

    #[test]
    fn test_multiple_extensions() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::write(tmp.path().join("b.md"), "b").unwrap();

        let items = discover(tmp.path(), &["txt".to_string(), ".md".to_string()]).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_created_at_comes_from_mtime() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.txt");
        fs::write(&path, "a").unwrap();
        let mtime: DateTime<Utc> = fs::metadata(&path).unwrap().modified().unwrap().into();

        let items = discover(tmp.path(), &txt()).unwrap();
        assert_eq!(items[0].created_at, mtime.trunc_subsecs(3));
        assert_eq!(items[0].read_text().unwrap(), "a");
    }
}
