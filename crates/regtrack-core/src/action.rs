//! What an amendment run did, and the record it leaves behind.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step taken by the amendment engine, named by regulation title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmendmentAction {
    /// At least one paragraph matching a removal keyword was dropped.
    Removed(String),
    /// The regulation's clause was inserted as a new paragraph.
    Inserted(String),
}

impl fmt::Display for AmendmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed(title) => write!(f, "Removed outdated clause related to '{title}'"),
            Self::Inserted(title) => write!(f, "Inserted updated clause for '{title}'"),
        }
    }
}

/// A single line of a contract's `{base}_history.json` log.
///
/// Written once per run that produced an output document; never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// ISO 8601 timestamp string (UTC).
    pub timestamp: String,
    #[serde(rename = "original")]
    pub original_filename: String,
    #[serde(rename = "updated")]
    pub updated_filename: String,
    pub actions: Vec<String>,
}

impl HistoryRecord {
    pub fn new(
        timestamp: String,
        original_filename: impl Into<String>,
        updated_filename: impl Into<String>,
        actions: &[AmendmentAction],
    ) -> Self {
        Self {
            timestamp,
            original_filename: original_filename.into(),
            updated_filename: updated_filename.into(),
            actions: actions.iter().map(ToString::to_string).collect(),
        }
    }
}
