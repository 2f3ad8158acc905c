pub mod action;
pub mod compliance;
pub mod paragraph;
pub mod regulation;

pub use action::{AmendmentAction, HistoryRecord};
pub use compliance::{check_risks, detect_changes};
pub use paragraph::{join_paragraphs, split_paragraphs};
pub use regulation::{Regulation, RegulationError};
