//! List view model: rows, search, page cursor, edit session, deferred delete.
//!
//! One instance backs one table. All transitions run to completion on the
//! caller's thread. The only suspended work is the removal scheduled by
//! [`ListViewModel::delete_row`], which the caller's event loop fires by
//! calling [`ListViewModel::advance`].
//!
//! # Row lifecycle
//!
//! ```text
//! Viewing ──start_edit──▶ Editing ──save_edit / cancel_edit──▶ Viewing
//! Viewing ──delete_row──▶ PendingDelete ──grace delay──▶ Removed
//! ```
//!
//! A pending delete cannot be cancelled. At most one row is being edited; a new
//! `start_edit` replaces the previous session.
//!
//! # Invariants
//! - `filtered() ⊆ rows()`, in row order; equal to `rows()` for an empty term
//! - removals are keyed by [`RowId`], never by position
//! - operations naming an unknown id change nothing

use super::pagination::{self, PageBase, PageSize};
use super::search::{Segment, SearchTerm};
use super::store::{LocalStore, RowStore, SaveStrategy};
use super::timer::TimerQueue;
use crate::model::{HistoryQuery, PersistenceError, Record, RowId};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Wait between a delete request and the removal, long enough for the
/// row's exit animation.
pub const DEFAULT_GRACE_DELAY: Duration = Duration::from_millis(350);

// ===== Options =====

/// Where pages come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Paging {
    /// Every row is held locally and sliced into pages here.
    #[default]
    Local,
    /// The service filters and pages; the model holds one page of rows.
    Remote {
        /// Page count reported by the service.
        total_pages: usize,
    },
}

/// Construction options of a [`ListViewModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Rows per page.
    pub page_size: PageSize,
    /// Index base reported to the caller.
    pub base: PageBase,
    /// Where paging happens.
    pub paging: Paging,
    /// Delay between a delete request and its commit.
    pub grace_delay: Duration,
    /// Order of store call and local update on save.
    pub save_strategy: SaveStrategy,
}

impl ListOptions {
    /// Key point table: local 1-based pages, saves applied immediately.
    pub fn key_points(page_size: PageSize) -> Self {
        Self {
            page_size,
            base: PageBase::One,
            paging: Paging::Local,
            grace_delay: DEFAULT_GRACE_DELAY,
            save_strategy: SaveStrategy::LocalFirst,
        }
    }

    /// History table: service-paged 0-based pages, saves wait for the store.
    pub fn history(page_size: PageSize) -> Self {
        Self {
            page_size,
            base: PageBase::Zero,
            paging: Paging::Remote { total_pages: 0 },
            grace_delay: DEFAULT_GRACE_DELAY,
            save_strategy: SaveStrategy::ConfirmFirst,
        }
    }

    /// Override the delete grace delay.
    pub fn with_grace_delay(mut self, grace_delay: Duration) -> Self {
        self.grace_delay = grace_delay;
        self
    }

    /// Override the save strategy.
    pub fn with_save_strategy(mut self, save_strategy: SaveStrategy) -> Self {
        self.save_strategy = save_strategy;
        self
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::key_points(PageSize::default())
    }
}

// ===== Derived view types =====

/// Per-row state as the table renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Rendered read-only.
    Viewing,
    /// Rendered with the draft inputs.
    Editing,
    /// Still counted by filtering and pagination but rendered as leaving.
    PendingDelete,
}

/// A row on the current page.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a, R> {
    /// Number shown in the `#` column, continuing across pages.
    pub ordinal: usize,
    /// The row itself.
    pub row: &'a R,
    /// Whether the row is being edited.
    pub state: RowState,
}

/// Why the current page shows no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The list itself is empty.
    NoRows,
    /// Rows exist but none match the search term.
    NoResults,
}

impl EmptyState {
    /// Text of the table's empty-state row.
    pub fn message(self, noun: &str) -> String {
        match self {
            EmptyState::NoRows => format!("No {} found.", noun),
            EmptyState::NoResults => "No results found.".to_string(),
        }
    }
}

// ===== Outcomes =====

/// Result of [`ListViewModel::save_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum SaveOutcome<D> {
    /// No edit session for this id. Nothing changed.
    NotEditing,
    /// The row holds the draft and listeners were notified.
    Saved,
    /// Local-first save: the row holds the draft but the store failed.
    StoreFailed {
        /// Store failure to surface.
        error: PersistenceError,
    },
    /// Confirm-first save: the store refused, the row is unchanged and the
    /// session ended. The draft is handed back so the edit is not lost.
    Rejected {
        /// Draft that was not saved.
        draft: D,
        /// Store refusal.
        error: PersistenceError,
    },
}

/// Result of one scheduled removal fired by [`ListViewModel::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row was removed and listeners were notified. For service-paged
    /// lists `refresh` is the query that reloads the current page.
    Removed {
        /// Removed row.
        id: RowId,
        /// Reload query for service-paged lists.
        refresh: Option<HistoryQuery>,
    },
    /// The store refused; the row stays and is back to `Viewing`.
    Failed {
        /// Row that stays.
        id: RowId,
        /// Store refusal.
        error: PersistenceError,
    },
    /// The row was already gone (for example after a reload).
    Skipped {
        /// Row that was not found.
        id: RowId,
    },
}

#[derive(Debug, Clone)]
struct EditSession<D> {
    id: RowId,
    draft: D,
}

type ChangeListener<R> = Box<dyn FnMut(&[R])>;

// ===== ListViewModel =====

/// View model for one searchable, paginated, editable table.
pub struct ListViewModel<R: Record> {
    rows: Vec<R>,
    term: SearchTerm,
    page: usize,
    options: ListOptions,
    edit: Option<EditSession<R::Draft>>,
    removals: TimerQueue<RowId>,
    store: Box<dyn RowStore<R>>,
    listeners: Vec<ChangeListener<R>>,
}

impl<R: Record> fmt::Debug for ListViewModel<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListViewModel")
            .field("rows", &self.rows.len())
            .field("search", &self.term.as_str())
            .field("page", &self.page)
            .field("options", &self.options)
            .field("editing_id", &self.editing_id())
            .field("pending_removals", &self.removals.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<R: Record> ListViewModel<R> {
    /// Create a view model over `rows` with a store that always succeeds.
    pub fn new(rows: Vec<R>, options: ListOptions) -> Self {
        Self {
            rows,
            term: SearchTerm::default(),
            page: options.base.first_page(),
            options,
            edit: None,
            removals: TimerQueue::new(),
            store: Box::new(LocalStore),
            listeners: Vec::new(),
        }
    }

    /// Replace the persistence hooks.
    pub fn with_store(mut self, store: impl RowStore<R> + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Register a listener fired with the full collection after every edit,
    /// delete and data load.
    pub fn on_change(&mut self, listener: impl FnMut(&[R]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ===== Accessors =====

    /// All rows, unfiltered.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Raw search text.
    pub fn search(&self) -> &str {
        self.term.as_str()
    }

    /// Current page number in this list's numbering base.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub fn page_size(&self) -> PageSize {
        self.options.page_size
    }

    /// Page numbering base.
    pub fn base(&self) -> PageBase {
        self.options.base
    }

    /// Options the list was built with.
    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Id of the row under edit, if any.
    pub fn editing_id(&self) -> Option<RowId> {
        self.edit.as_ref().map(|session| session.id)
    }

    /// The draft of the active edit session.
    pub fn draft(&self) -> Option<&R::Draft> {
        self.edit.as_ref().map(|session| &session.draft)
    }

    /// Most recently requested delete that has not completed yet.
    pub fn pending_delete_id(&self) -> Option<RowId> {
        self.removals.latest().copied()
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.removals.next_due()
    }

    // ===== Derived views =====

    /// Rows matching the search term, in row order.
    pub fn filtered(&self) -> Vec<&R> {
        self.rows.iter().filter(|row| self.is_match(row)).collect()
    }

    fn is_match(&self, row: &R) -> bool {
        self.term.is_empty()
            || row
                .search_fields()
                .into_iter()
                .any(|field| self.term.matches(field))
    }

    /// Number of pages. Zero for an empty view.
    pub fn page_count(&self) -> usize {
        match self.options.paging {
            Paging::Local => pagination::page_count(self.filtered().len(), self.options.page_size),
            Paging::Remote { total_pages } => total_pages,
        }
    }

    /// Rows on the current page with their ordinals and states.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_, R>> {
        let filtered = self.filtered();
        let page_rows: &[&R] = match self.options.paging {
            Paging::Local => pagination::slice_page(
                &filtered,
                self.page,
                self.options.base,
                self.options.page_size,
            ),
            Paging::Remote { .. } => &filtered,
        };
        page_rows
            .iter()
            .enumerate()
            .map(|(offset, row)| VisibleRow {
                ordinal: pagination::ordinal(
                    self.page,
                    self.options.base,
                    self.options.page_size,
                    offset,
                ),
                row: *row,
                state: self.state_of(row.id()),
            })
            .collect()
    }

    /// State of row `id`, or `None` when no such row exists.
    pub fn row_state(&self, id: RowId) -> Option<RowState> {
        self.position(id).map(|_| self.state_of(id))
    }

    fn state_of(&self, id: RowId) -> RowState {
        if self.editing_id() == Some(id) {
            RowState::Editing
        } else if self.is_pending_delete(id) {
            RowState::PendingDelete
        } else {
            RowState::Viewing
        }
    }

    /// Whether `id` has a delete scheduled and not yet committed.
    pub fn is_pending_delete(&self, id: RowId) -> bool {
        self.removals.tasks().any(|pending| *pending == id)
    }

    /// Pagination controls are hidden for a single page or none.
    pub fn show_pagination(&self) -> bool {
        self.page_count() > 1
    }

    /// Whether a previous page exists.
    pub fn can_go_prev(&self) -> bool {
        self.page > self.options.base.first_page()
    }

    /// Whether a next page exists.
    pub fn can_go_next(&self) -> bool {
        self.options
            .base
            .last_page(self.page_count())
            .is_some_and(|last| self.page < last)
    }

    /// Why the current page is empty, if it is.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible_rows().is_empty() {
            None
        } else if self.term.is_empty() {
            Some(EmptyState::NoRows)
        } else {
            Some(EmptyState::NoResults)
        }
    }

    /// Highlight the current search term in `text`.
    pub fn highlight<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        self.term.highlight(text)
    }

    /// Fetch key of the current view for service-paged lists.
    pub fn fetch_request(&self) -> Option<HistoryQuery> {
        match self.options.paging {
            Paging::Local => None,
            Paging::Remote { .. } => Some(HistoryQuery {
                page: self.page,
                size: self.options.page_size.get(),
                search: (!self.term.is_empty()).then(|| self.term.as_str().to_string()),
            }),
        }
    }

    // ===== Search and paging =====

    /// Set the search term and go back to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        debug!(term = %term, "Search term changed");
        self.term = SearchTerm::new(term);
        self.page = self.options.base.first_page();
    }

    /// Move to page `page` if it exists. Returns whether the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        if !self.options.base.contains(page, self.page_count()) {
            debug!(page, page_count = self.page_count(), "Ignoring out-of-range page");
            return false;
        }
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// Move one page forward. Returns false at the last page.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page + 1)
    }

    /// Move one page back. Returns false at the first page.
    pub fn prev_page(&mut self) -> bool {
        match self.page.checked_sub(1) {
            Some(page) => self.set_page(page),
            None => false,
        }
    }

    // ===== Data loading =====

    /// Replace every row with a freshly fetched collection.
    ///
    /// An edit session whose row disappeared is dropped. Scheduled removals
    /// stay queued and are skipped if their row is gone when they fire.
    pub fn on_data_loaded(&mut self, rows: Vec<R>) {
        debug!(rows = rows.len(), "Rows loaded");
        self.rows = rows;
        if let Some(id) = self.editing_id() {
            if self.position(id).is_none() {
                debug!(id = %id, "Dropping edit session for row no longer present");
                self.edit = None;
            }
        }
        if self.options.paging == Paging::Local {
            self.clamp_page();
        }
        self.notify();
    }

    /// Replace rows with one page fetched from the service.
    pub fn on_page_loaded(&mut self, rows: Vec<R>, page: usize, total_pages: usize) {
        if let Paging::Remote { .. } = self.options.paging {
            self.options.paging = Paging::Remote { total_pages };
            self.page = page;
        }
        self.on_data_loaded(rows);
    }

    fn clamp_page(&mut self) {
        let base = self.options.base;
        let last = base.last_page(self.page_count()).unwrap_or(base.first_page());
        self.page = self.page.clamp(base.first_page(), last);
    }

    // ===== Edit session =====

    /// Start editing row `id` with a draft of its current fields.
    ///
    /// Returns `false` when the row does not exist or is pending delete. An
    /// active session on another row is replaced.
    pub fn start_edit(&mut self, id: RowId) -> bool {
        if self.is_pending_delete(id) {
            debug!(id = %id, "Cannot edit a row pending delete");
            return false;
        }
        let Some(row) = self.find(id) else {
            debug!(id = %id, "start_edit on unknown row");
            return false;
        };
        let draft = row.draft();
        if let Some(previous) = self.editing_id().filter(|previous| *previous != id) {
            debug!(previous = %previous, id = %id, "Replacing active edit session");
        }
        self.edit = Some(EditSession { id, draft });
        true
    }

    /// Mutate the active draft as the user types.
    pub fn update_draft(&mut self, f: impl FnOnce(&mut R::Draft)) -> bool {
        match self.edit.as_mut() {
            Some(session) => {
                f(&mut session.draft);
                true
            }
            None => false,
        }
    }

    /// Replace the active draft.
    pub fn set_draft(&mut self, draft: R::Draft) -> bool {
        self.update_draft(|current| *current = draft)
    }

    /// Commit the draft of row `id`.
    pub fn save_edit(&mut self, id: RowId) -> SaveOutcome<R::Draft> {
        let session = match self.edit.take() {
            Some(session) if session.id == id && self.position(id).is_some() => session,
            other => {
                self.edit = other;
                debug!(id = %id, "save_edit without a matching edit session");
                return SaveOutcome::NotEditing;
            }
        };

        match self.options.save_strategy {
            SaveStrategy::LocalFirst => {
                self.apply_draft(id, session.draft.clone());
                match self.store.save(id, &session.draft) {
                    Ok(()) => SaveOutcome::Saved,
                    Err(error) => {
                        warn!(id = %id, error = %error, "Store failed after local save");
                        SaveOutcome::StoreFailed { error }
                    }
                }
            }
            SaveStrategy::ConfirmFirst => match self.store.save(id, &session.draft) {
                Ok(()) => {
                    self.apply_draft(id, session.draft);
                    SaveOutcome::Saved
                }
                Err(error) => {
                    warn!(id = %id, error = %error, "Store rejected edit; row unchanged");
                    SaveOutcome::Rejected {
                        draft: session.draft,
                        error,
                    }
                }
            },
        }
    }

    fn apply_draft(&mut self, id: RowId, draft: R::Draft) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id() == id) {
            row.apply(draft);
            debug!(id = %id, "Edit saved");
            self.notify();
        }
    }

    /// End the edit session of row `id` without changing the row.
    pub fn cancel_edit(&mut self, id: RowId) -> bool {
        if self.editing_id() == Some(id) {
            self.edit = None;
            true
        } else {
            false
        }
    }

    // ===== Deferred delete =====

    /// Mark row `id` as leaving and schedule its removal after the grace delay.
    ///
    /// Returns `false` when the row does not exist, is already pending, or is
    /// being edited. There is no way to cancel a scheduled removal.
    pub fn delete_row(&mut self, id: RowId, now: Instant) -> bool {
        if self.position(id).is_none() {
            debug!(id = %id, "delete_row on unknown row");
            return false;
        }
        if self.is_pending_delete(id) {
            debug!(id = %id, "Delete already pending");
            return false;
        }
        if self.editing_id() == Some(id) {
            debug!(id = %id, "Cannot delete a row while it is being edited");
            return false;
        }
        self.removals
            .schedule_after(now, self.options.grace_delay, id);
        debug!(id = %id, delay = ?self.options.grace_delay, "Delete scheduled");
        true
    }

    /// Fire every removal due at `now`, in the order they were requested.
    pub fn advance(&mut self, now: Instant) -> Vec<DeleteOutcome> {
        self.removals
            .pop_due(now)
            .into_iter()
            .map(|id| self.complete_removal(id))
            .collect()
    }

    fn complete_removal(&mut self, id: RowId) -> DeleteOutcome {
        let Some(position) = self.position(id) else {
            debug!(id = %id, "Scheduled removal skipped; row already gone");
            return DeleteOutcome::Skipped { id };
        };
        if let Err(error) = self.store.delete(id) {
            warn!(id = %id, error = %error, "Store refused delete; row kept");
            return DeleteOutcome::Failed { id, error };
        }

        self.rows.remove(position);
        debug!(id = %id, remaining = self.rows.len(), "Row removed");

        // Uses the filter and page as they are now, not as they were when the
        // delete was requested.
        if self.visible_rows().is_empty() && self.can_go_prev() {
            self.page -= 1;
            debug!(page = self.page, "Current page emptied; moved back one page");
        }

        self.notify();
        DeleteOutcome::Removed {
            id,
            refresh: self.fetch_request(),
        }
    }

    // ===== Internals =====

    fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    fn find(&self, id: RowId) -> Option<&R> {
        self.rows.iter().find(|row| row.id() == id)
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.rows);
        }
    }
}

#[cfg(test)]
#[path = "list_view_tests.rs"]
mod tests;
