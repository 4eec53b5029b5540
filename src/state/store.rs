//! Persistence hooks for the list view model.
//!
//! The view model never talks to the network. It calls a [`RowStore`] when an
//! edit is saved or a delete completes, and the store reports success or a
//! [`PersistenceError`]. Network-backed stores marshal their result back onto
//! the caller's update path before returning.

use crate::model::{PersistenceError, Record, RowId};
use serde::Deserialize;

/// External save/delete hooks for rows of type `R`.
pub trait RowStore<R: Record> {
    /// Persist the edited fields of row `id`.
    fn save(&mut self, id: RowId, draft: &R::Draft) -> Result<(), PersistenceError>;

    /// Remove row `id` after its grace delay has passed.
    fn delete(&mut self, id: RowId) -> Result<(), PersistenceError>;
}

/// Store for lists that live only in the page (key points). Always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl<R: Record> RowStore<R> for LocalStore {
    fn save(&mut self, _id: RowId, _draft: &R::Draft) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn delete(&mut self, _id: RowId) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// When a saved edit becomes visible locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaveStrategy {
    /// Apply the draft and notify immediately, then call the store. A store
    /// failure is reported but the local change stays. Used for key points.
    #[default]
    LocalFirst,
    /// Call the store first; apply and notify only on success. Used for the
    /// history table.
    ConfirmFirst,
}
