use std::io::Write;
use std::path::{Path, PathBuf};

use regtrack_core::Regulation;
use tracing::info;

use crate::{DataDir, StoreError};

/// Loads the current regulation set and the last-applied snapshot.
///
/// Both files are JSON arrays of [`Regulation`] records. The snapshot is
/// replaced wholesale after a successful amendment run.
pub struct RegulationStore {
    current: PathBuf,
    snapshot: PathBuf,
}

impl RegulationStore {
    pub fn new(current: impl Into<PathBuf>, snapshot: impl Into<PathBuf>) -> Self {
        Self {
            current: current.into(),
            snapshot: snapshot.into(),
        }
    }

    pub fn in_data_dir(dir: &DataDir) -> Self {
        Self::new(dir.regulations_file(), dir.snapshot_file())
    }

    /// The regulation set to apply now.
    pub fn load_current(&self) -> Result<Vec<Regulation>, StoreError> {
        if !self.current.exists() {
            return Err(StoreError::ConfigMissing(self.current.clone()));
        }
        let regs = read_regulations(&self.current)?;
        info!(count = regs.len(), path = %self.current.display(), "loaded regulations");
        Ok(regs)
    }

    /// The regulation set as of the last run, or empty on the first run.
    pub fn load_snapshot(&self) -> Result<Vec<Regulation>, StoreError> {
        if !self.snapshot.exists() {
            info!(path = %self.snapshot.display(), "no regulation snapshot yet");
            return Ok(vec![]);
        }
        read_regulations(&self.snapshot)
    }

    /// Overwrite the snapshot with `regulations`.
    ///
    /// Writes to a sibling temp file and renames it into place, so readers
    /// never see a partially written snapshot.
    pub fn save_snapshot(&self, regulations: &[Regulation]) -> Result<(), StoreError> {
        let dir = self
            .snapshot
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, regulations)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.snapshot)
            .map_err(|source| StoreError::Persist {
                path: self.snapshot.clone(),
                source,
            })?;

        info!(count = regulations.len(), path = %self.snapshot.display(), "saved regulation snapshot");
        Ok(())
    }
}

fn read_regulations(path: &Path) -> Result<Vec<Regulation>, StoreError> {
    let bytes = std::fs::read(path)?;
    let regs: Vec<Regulation> =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::ConfigMalformed {
            path: path.to_path_buf(),
            source,
        })?;
    for (index, reg) in regs.iter().enumerate() {
        reg.validate()
            .map_err(|source| StoreError::InvalidRegulation {
                path: path.to_path_buf(),
                index,
                source,
            })?;
    }
    Ok(regs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(tmp: &tempfile::TempDir) -> RegulationStore {
        RegulationStore::in_data_dir(&DataDir::new(tmp.path()))
    }

    fn reg(id: &str, clause: &str) -> Regulation {
        Regulation {
            id: id.into(),
            title: format!("Title {id}"),
            required_clause: clause.into(),
            keywords: vec!["kw".into()],
            remove_keywords: vec![],
        }
    }

    #[test]
    fn missing_current_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = store(&tmp).load_current().unwrap_err();
        assert!(matches!(err, StoreError::ConfigMissing(_)));
        assert!(err.is_config());
    }

    #[test]
    fn malformed_current_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("regulations.json"), "[{\"id\": \"a\"}]").unwrap();
        let err = store(&tmp).load_current().unwrap_err();
        assert!(matches!(err, StoreError::ConfigMalformed { .. }), "{err}");
        assert!(err.is_config());
    }

    #[test]
    fn invalid_record_reports_index() {
        let tmp = tempfile::tempdir().unwrap();
        let json = r#"[
            {"id": "a", "title": "A", "required_clause": "x"},
            {"id": "", "title": "B", "required_clause": "y"}
        ]"#;
        std::fs::write(tmp.path().join("regulations.json"), json).unwrap();
        match store(&tmp).load_current().unwrap_err() {
            StoreError::InvalidRegulation { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_current() {
        let tmp = tempfile::tempdir().unwrap();
        let json = r#"[{"id": "a", "title": "A", "required_clause": "x", "keywords": ["pay"]}]"#;
        std::fs::write(tmp.path().join("regulations.json"), json).unwrap();
        let regs = store(&tmp).load_current().unwrap();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0].keywords, vec!["pay"]);
    }

    #[test]
    fn first_run_snapshot_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(store(&tmp).load_snapshot().unwrap().is_empty());
    }

    #[test]
    fn snapshot_save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let s = store(&tmp);
        let regs = vec![reg("a", "Clause A."), reg("b", "Clause B.")];
        s.save_snapshot(&regs).unwrap();
        assert_eq!(s.load_snapshot().unwrap(), regs);
    }

    #[test]
    fn snapshot_overwrite_is_total() {
        let tmp = tempfile::tempdir().unwrap();
        let s = store(&tmp);
        s.save_snapshot(&[reg("a", "1"), reg("b", "2")]).unwrap();
        s.save_snapshot(&[reg("c", "3")]).unwrap();
        let loaded = s.load_snapshot().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "c");

        let leftovers = std::fs::read_dir(tmp.path().join("history")).unwrap().count();
        assert_eq!(leftovers, 1, "temp files should not be left behind");
    }

    #[test]
    fn corrupt_snapshot_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("history")).unwrap();
        std::fs::write(tmp.path().join("history/prev_regulations.json"), "{not json").unwrap();
        assert!(store(&tmp).load_snapshot().unwrap_err().is_config());
    }
}
