//! Internal test modules - whitebox tests with crate access
//!
//! Acceptance scenarios drive the list view model through the test harness
//! the way a user drives the dashboard tables.

mod acceptance_history;
mod list_snapshots;
