//! Amendment engine: rewrites a contract's paragraphs against a set of regulations.
//!
//! Two phases per call. Removal drops every paragraph matching a regulation's
//! `remove_keywords`; insertion then places each missing clause after the
//! paragraph chosen by keyword match, or by embedding similarity when no
//! keyword matches.

mod body;
mod engine;
mod placement;

pub use body::ContractBody;
pub use engine::{Amendment, AmendmentEngine};
pub use placement::{Placement, PlacementError};
