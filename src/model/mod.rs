//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod api;
pub mod error;
pub mod identifiers;
pub mod record;

// Re-export for convenience
pub use api::{
    ApiErrorBody, ExtractRequest, HistoryPage, HistoryQuery, SummaryResponse, UpdateRequest,
};
pub use error::PersistenceError;
pub use identifiers::{InvalidRowId, RowId};
pub use record::{HistoryDraft, HistoryEntry, KeyPoint, Record};
