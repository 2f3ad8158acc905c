//! Regulation records as loaded from `regulations.json` and the snapshot file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A compliance requirement and the clause text a contract must carry for it.
///
/// Identity is [`id`](Self::id). Records are immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulation {
    pub id: String,
    pub title: String,
    pub required_clause: String,
    /// Placement hints, tried in order. The first keyword found in any
    /// paragraph decides where the clause goes.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Paragraphs containing any of these are treated as outdated language.
    #[serde(default)]
    pub remove_keywords: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegulationError {
    #[error("regulation id is empty")]
    EmptyId,
    #[error("regulation {id:?} has an empty keyword")]
    EmptyKeyword { id: String },
}

impl Regulation {
    /// The required clause with surrounding whitespace removed.
    pub fn clause(&self) -> &str {
        self.required_clause.trim()
    }

    /// Reject records that would make matching meaningless.
    ///
    /// An empty keyword matches every paragraph, so a single blank
    /// `remove_keywords` entry would wipe the whole contract.
    pub fn validate(&self) -> Result<(), RegulationError> {
        if self.id.trim().is_empty() {
            return Err(RegulationError::EmptyId);
        }
        let blank = |kw: &String| kw.trim().is_empty();
        if self.keywords.iter().any(blank) || self.remove_keywords.iter().any(blank) {
            return Err(RegulationError::EmptyKeyword {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lists_default_to_empty() {
        let json = r#"{
            "id": "osha-1",
            "title": "Safety",
            "required_clause": "Employer shall comply with OSHA."
        }"#;
        let reg: Regulation = serde_json::from_str(json).unwrap();
        assert!(reg.keywords.is_empty());
        assert!(reg.remove_keywords.is_empty());
        assert!(reg.validate().is_ok());
    }

    #[test]
    fn missing_required_clause_is_rejected() {
        let json = r#"{ "id": "osha-1", "title": "Safety" }"#;
        let err = serde_json::from_str::<Regulation>(json).unwrap_err();
        assert!(err.to_string().contains("required_clause"), "{err}");
    }

    #[test]
    fn clause_is_trimmed() {
        let reg = Regulation {
            id: "r".into(),
            title: "T".into(),
            required_clause: "  Paid leave applies.\n".into(),
            keywords: vec![],
            remove_keywords: vec![],
        };
        assert_eq!(reg.clause(), "Paid leave applies.");
    }

    #[test]
    fn empty_id_fails_validation() {
        let reg = Regulation {
            id: "  ".into(),
            title: "T".into(),
            required_clause: "x".into(),
            keywords: vec![],
            remove_keywords: vec![],
        };
        assert_eq!(reg.validate(), Err(RegulationError::EmptyId));
    }

    #[test]
    fn blank_remove_keyword_fails_validation() {
        let reg = Regulation {
            id: "r1".into(),
            title: "T".into(),
            required_clause: "x".into(),
            keywords: vec!["wages".into()],
            remove_keywords: vec!["".into()],
        };
        assert_eq!(
            reg.validate(),
            Err(RegulationError::EmptyKeyword { id: "r1".into() })
        );
    }
}
