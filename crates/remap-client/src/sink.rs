//! Destinations for merged files.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{MergeError, Result};

/// Where merged file bytes end up.
pub trait FileSink {
    /// Store `bytes` under `filename` and return the final location.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves files into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        // Only the last component is used; names never escape the directory.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| MergeError::InvalidFilename(filename.to_string()))?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "saved merged file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("out"));
        let path = sink.save("data.csv", b"a,b\n").unwrap();
        assert_eq!(path, dir.path().join("out").join("data.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"a,b\n");
    }

    #[test]
    fn strips_directories_from_name() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let path = sink.save("../../etc/report.csv", b"x").unwrap();
        assert_eq!(path, dir.path().join("report.csv"));
    }

    #[test]
    fn rejects_name_without_file_component() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        assert!(matches!(
            sink.save("..", b"x"),
            Err(MergeError::InvalidFilename(_))
        ));
    }
}
