//! Storage layer: regulation sets and snapshots, append-only amendment
//! history, and reading/writing contract documents.

mod error;
pub use error::{DocumentError, StoreError};

mod history;
pub use history::{HistoryLog, versioned_name};

mod layout;
pub use layout::DataDir;

mod regulations;
pub use regulations::RegulationStore;

pub mod document;
pub use document::{DocumentAdapter, adapter_for};
