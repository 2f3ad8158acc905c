//! Append-only amendment history, one JSON Lines file per contract.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use regtrack_core::HistoryRecord;
use tracing::info;

use crate::StoreError;

/// Per-contract history logs under a single directory.
///
/// The log for `nda.pdf` is `nda_history.json`; each line is one
/// [`HistoryRecord`]. Lines are only ever appended.
pub struct HistoryLog {
    dir: PathBuf,
}

impl HistoryLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the log for a contract file name.
    pub fn path_for(&self, original: &str) -> PathBuf {
        self.dir.join(format!("{}_history.json", base_name(original)))
    }

    /// Append one record to the contract's log.
    pub fn append(&self, record: &HistoryRecord) -> Result<PathBuf, StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&record.original_filename);

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;

        info!(path = %path.display(), actions = record.actions.len(), "appended history record");
        Ok(path)
    }

    /// All records for a contract, oldest first. Empty if it was never amended.
    pub fn read(&self, original: &str) -> Result<Vec<HistoryRecord>, StoreError> {
        let path = self.path_for(original);
        if !path.exists() {
            return Ok(vec![]);
        }
        let reader = BufReader::new(std::fs::File::open(&path)?);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}

/// File name without its final extension.
pub(crate) fn base_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

/// Output file name for a run at `unix_secs`: `{base}_v{unix_secs}.{ext}`.
///
/// Two runs on the same contract within one second produce the same name.
pub fn versioned_name(original: &str, unix_secs: u64) -> String {
    let base = base_name(original);
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{base}_v{unix_secs}.{ext}"),
        None => format!("{base}_v{unix_secs}"),
    }
}
