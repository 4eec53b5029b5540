//! List view state (pure).
//!
//! Filtering, pagination, edit sessions and deferred deletes, testable without
//! any rendering surface.

pub mod list_view;
pub mod pagination;
pub mod search;
pub mod store;
pub mod timer;

// Re-export for convenience
pub use list_view::{
    DeleteOutcome, EmptyState, ListOptions, ListViewModel, Paging, RowState, SaveOutcome,
    VisibleRow, DEFAULT_GRACE_DELAY,
};
pub use pagination::{InvalidPageSize, PageBase, PageSize};
pub use search::{Segment, SearchTerm};
pub use store::{LocalStore, RowStore, SaveStrategy};
pub use timer::TimerQueue;
