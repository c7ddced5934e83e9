// file: src/source/scanner.rs
// description: Directory walking and dataset file discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::SourceConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct DatasetScanner {
    config: SourceConfig,
}

#[derive(Debug, Clone)]
pub struct ScannedDataset {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
}

impl DatasetScanner {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Discovers JSON dataset files under the data directory, sorted by
    /// relative path so merge order is deterministic across platforms.
    pub fn scan(&self) -> Result<Vec<ScannedDataset>> {
        let root = self.config.data_dir.clone();
        info!("Scanning data directory: {}", root.display());
        let mut files = Vec::new();

        for entry in WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if self.should_skip(path) {
                debug!("Skipping file: {}", path.display());
                continue;
            }

            if let Some(extension) = path.extension()
                && extension == "json"
                && let Ok(metadata) = entry.metadata()
            {
                let size = metadata.len();
                let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;

                if size > max_size {
                    debug!(
                        "Skipping large file ({} MB): {}",
                        size / 1024 / 1024,
                        path.display()
                    );
                    continue;
                }

                let relative_path = path
                    .strip_prefix(&root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .to_string();

                files.push(ScannedDataset {
                    path: path.to_path_buf(),
                    relative_path,
                    size,
                });
            }
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        info!("Found {} dataset files", files.len());
        Ok(files)
    }

    fn should_skip(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.config.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if path_str.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if path_str.contains(pattern) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_config(data_dir: PathBuf) -> SourceConfig {
        SourceConfig {
            data_dir,
            dataset: None,
            skip_patterns: vec![],
            max_file_size_mb: 10,
        }
    }

    #[test]
    fn test_scan_finds_json_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("incidents.json"), "[]").unwrap();
        fs::write(temp.path().join("notes.md"), "# notes").unwrap();

        let scanner = DatasetScanner::new(test_config(temp.path().to_path_buf()));
        let files = scanner.scan().unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, "incidents.json");
    }

    #[test]
    fn test_scan_order_is_deterministic() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.json"), "[]").unwrap();
        fs::write(temp.path().join("a.json"), "[]").unwrap();

        let scanner = DatasetScanner::new(test_config(temp.path().to_path_buf()));
        let files = scanner.scan().unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_skip_patterns() {
        let config = SourceConfig {
            data_dir: PathBuf::from("."),
            dataset: None,
            skip_patterns: vec!["*.tmp".to_string(), ".git/*".to_string()],
            max_file_size_mb: 10,
        };

        let scanner = DatasetScanner::new(config);
        assert!(scanner.should_skip(Path::new("export.tmp")));
        assert!(scanner.should_skip(Path::new(".git/config")));
        assert!(!scanner.should_skip(Path::new("incidents.json")));
    }

    #[test]
    fn test_oversized_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big.json"), "x".repeat(2 * 1024 * 1024)).unwrap();

        let mut config = test_config(temp.path().to_path_buf());
        config.max_file_size_mb = 1;

        let scanner = DatasetScanner::new(config);
        assert!(scanner.scan().unwrap().is_empty());
    }
}
