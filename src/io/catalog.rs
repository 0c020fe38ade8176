use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConvError, Result};
use crate::models::{Source, SourceCatalog};

const TEXT_SUFFIX: &str = ".txt";
const COUNTS_SUFFIX: &str = ".counts";

/// Pair up `<name>.txt` and `<name>.counts` files in `dir`
///
/// Any other file name is an error, as is a name with only one of the two.
pub fn scan_text_dir(dir: &Path) -> Result<SourceCatalog> {
    let entries = std::fs::read_dir(dir).map_err(|e| ConvError::io(dir, e))?;

    let mut found: BTreeMap<String, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();

    for entry in entries {
        let entry = entry.map_err(|e| ConvError::io(dir, e))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();

        if let Some(name) = file_name.strip_suffix(TEXT_SUFFIX) {
            found.entry(name.to_string()).or_default().0 = Some(path);
        } else if let Some(name) = file_name.strip_suffix(COUNTS_SUFFIX) {
            found.entry(name.to_string()).or_default().1 = Some(path);
        } else {
            return Err(ConvError::UnexpectedFile { file: file_name });
        }
    }

    let mut sources = Vec::with_capacity(found.len());
    for (name, paths) in found {
        let source = match paths {
            (Some(text_path), Some(counts_path)) => Source {
                name,
                text_path,
                counts_path,
            },
            (None, _) => {
                return Err(ConvError::MissingPair {
                    source_name: name,
                    missing: "txt",
                })
            }
            (_, None) => {
                return Err(ConvError::MissingPair {
                    source_name: name,
                    missing: "counts",
                })
            }
        };
        debug!("Found data source {} ({:?})", source.name, source.text_path);
        sources.push(source);
    }

    Ok(SourceCatalog::from_sources(sources))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_scan_pairs_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["swbd.counts", "fisher.txt", "swbd.txt", "fisher.counts"] {
            touch(dir.path(), name);
        }

        let catalog = scan_text_dir(dir.path()).unwrap();

        assert_eq!(catalog.len(), 2);
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["fisher", "swbd"]);
        let swbd = catalog.get("swbd").unwrap();
        assert_eq!(swbd.text_path, dir.path().join("swbd.txt"));
        assert_eq!(swbd.counts_path, dir.path().join("swbd.counts"));
    }

    #[test]
    fn test_scan_missing_counts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "swbd.txt");

        let err = scan_text_dir(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ConvError::MissingPair { ref source_name, missing: "counts" } if source_name == "swbd"
        ));
    }

    #[test]
    fn test_scan_missing_text() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "dev_fisher.counts");

        let err = scan_text_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("dev_fisher"));
    }

    #[test]
    fn test_scan_rejects_other_suffix() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "swbd.txt");
        touch(dir.path(), "swbd.counts");
        touch(dir.path(), "README.md");

        let err = scan_text_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ConvError::UnexpectedFile { ref file } if file == "README.md"));
    }

    #[test]
    fn test_scan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_text_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConvError::Io { .. }));
    }
}
