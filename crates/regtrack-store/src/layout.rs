use std::path::{Path, PathBuf};

use crate::document;

/// On-disk layout of a regtrack data directory.
///
/// ```text
/// data/
///   regulations.json
///   contracts/
///   updated_contracts/
///   history/
///     prev_regulations.json
///     {base}_history.json
/// ```
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contracts(&self) -> PathBuf {
        self.root.join("contracts")
    }

    pub fn updated_contracts(&self) -> PathBuf {
        self.root.join("updated_contracts")
    }

    pub fn history(&self) -> PathBuf {
        self.root.join("history")
    }

    pub fn regulations_file(&self) -> PathBuf {
        self.root.join("regulations.json")
    }

    pub fn snapshot_file(&self) -> PathBuf {
        self.history().join("prev_regulations.json")
    }

    /// Create the contract, output, and history directories if missing.
    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.contracts())?;
        std::fs::create_dir_all(self.updated_contracts())?;
        std::fs::create_dir_all(self.history())?;
        Ok(())
    }

    /// Contract files with a supported extension, sorted by file name.
    pub fn list_contracts(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(self.contracts())? {
            let path = entry?.path();
            if path.is_file() && document::is_supported(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}
