//! Acceptance test harness for the list view model.
//!
//! Wraps a [`ListViewModel`] with a virtual clock and a change recorder, and
//! offers the interactions a user has with a table: typing a search, clicking
//! page, edit, save and delete buttons, and waiting.

use crate::model::{HistoryEntry, KeyPoint, Record, RowId};
use crate::state::{
    DeleteOutcome, EmptyState, ListOptions, ListViewModel, PageSize, RowState, RowStore,
    SaveOutcome, Segment,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// How a row type is shown in the rendered table.
pub trait TableRow: Record {
    /// Plural noun used in the empty-state message.
    const NOUN: &'static str;

    /// Text of the main column.
    fn cell(&self) -> String;
}

impl TableRow for KeyPoint {
    const NOUN: &'static str = "key points";

    fn cell(&self) -> String {
        self.text.clone()
    }
}

impl TableRow for HistoryEntry {
    const NOUN: &'static str = "extracted content";

    fn cell(&self) -> String {
        format!("{} | {}", self.url, self.content)
    }
}

/// Test harness for acceptance testing
pub struct ListHarness<R: TableRow> {
    model: ListViewModel<R>,
    start: Instant,
    elapsed: Duration,
    changes: Rc<RefCell<Vec<Vec<R>>>>,
}

impl ListHarness<KeyPoint> {
    /// Key point table over `texts`, ids numbered from 1.
    pub fn key_points(texts: &[&str]) -> Self {
        Self::new(
            KeyPoint::from_texts(texts.iter().copied()),
            ListOptions::key_points(PageSize::default()),
        )
    }
}

impl<R: TableRow> ListHarness<R> {
    pub fn new(rows: Vec<R>, options: ListOptions) -> Self {
        let mut model = ListViewModel::new(rows, options);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        model.on_change(move |rows: &[R]| sink.borrow_mut().push(rows.to_vec()));
        Self {
            model,
            start: Instant::now(),
            elapsed: Duration::ZERO,
            changes,
        }
    }

    /// Replace the persistence hooks.
    pub fn with_store(mut self, store: impl RowStore<R> + 'static) -> Self {
        let changes = Rc::clone(&self.changes);
        let rows = self.model.rows().to_vec();
        let options = *self.model.options();
        let mut model = ListViewModel::new(rows, options).with_store(store);
        model.on_change(move |rows: &[R]| changes.borrow_mut().push(rows.to_vec()));
        self.model = model;
        self
    }

    pub fn model(&self) -> &ListViewModel<R> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ListViewModel<R> {
        &mut self.model
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    // ===== Interactions =====

    pub fn type_search(&mut self, term: &str) {
        self.model.set_search(term);
    }

    pub fn click_page(&mut self, page: usize) -> bool {
        self.model.set_page(page)
    }

    pub fn click_edit(&mut self, id: u64) -> bool {
        self.model.start_edit(row_id(id))
    }

    pub fn type_draft(&mut self, draft: R::Draft) -> bool {
        self.model.set_draft(draft)
    }

    pub fn click_save(&mut self, id: u64) -> SaveOutcome<R::Draft> {
        self.model.save_edit(row_id(id))
    }

    pub fn click_cancel(&mut self, id: u64) -> bool {
        self.model.cancel_edit(row_id(id))
    }

    pub fn click_delete(&mut self, id: u64) -> bool {
        let now = self.now();
        self.model.delete_row(row_id(id), now)
    }

    /// Let `millis` pass and fire whatever became due.
    pub fn wait(&mut self, millis: u64) -> Vec<DeleteOutcome> {
        self.elapsed += Duration::from_millis(millis);
        let now = self.now();
        self.model.advance(now)
    }

    // ===== Observations =====

    /// Every collection passed to `on_change`, oldest first.
    pub fn changes(&self) -> Vec<Vec<R>> {
        self.changes.borrow().clone()
    }

    pub fn last_change(&self) -> Option<Vec<R>> {
        self.changes.borrow().last().cloned()
    }

    /// Render the table as the dashboard shows it, with matches in brackets.
    pub fn render_to_string(&self) -> String {
        let mut lines = Vec::new();
        if !self.model.search().is_empty() {
            lines.push(format!("Search: {}", self.model.search()));
        }
        lines.push("# | Row | State".to_string());

        match self.model.empty_state() {
            Some(EmptyState::NoRows) => lines.push(EmptyState::NoRows.message(R::NOUN)),
            Some(EmptyState::NoResults) => lines.push(EmptyState::NoResults.message(R::NOUN)),
            None => {
                for visible in self.model.visible_rows() {
                    let cell = visible.row.cell();
                    let marked = mark(&self.model.highlight(&cell));
                    lines.push(format!(
                        "{} | {} | {}",
                        visible.ordinal,
                        marked,
                        state_label(visible.state)
                    ));
                }
            }
        }

        if self.model.show_pagination() {
            // Shown 1-based whatever the numbering.
            let shown = self.model.base().to_index(self.model.page()).unwrap_or(0) + 1;
            lines.push(format!("Page {} of {}", shown, self.model.page_count()));
        }
        lines.join("\n")
    }
}

fn row_id(raw: u64) -> RowId {
    RowId::new(raw).unwrap_or_else(|_| panic!("row ids in tests start at 1, got {}", raw))
}

fn mark(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.matched {
                format!("[{}]", segment.text)
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}

fn state_label(state: RowState) -> &'static str {
    match state {
        RowState::Viewing => "viewing",
        RowState::Editing => "editing",
        RowState::PendingDelete => "deleting",
    }
}
