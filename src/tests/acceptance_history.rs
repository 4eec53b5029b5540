//! Acceptance tests for the history table.
//!
//! The service pages and searches; the table holds one 0-based page and
//! saves only after the store confirms.

use crate::model::{HistoryDraft, HistoryEntry, HistoryPage, HistoryQuery, PersistenceError, RowId};
use crate::state::{DeleteOutcome, ListOptions, PageSize, RowStore, SaveOutcome};
use crate::test_harness::ListHarness;
use std::cell::RefCell;
use std::rc::Rc;

const PAGE_ONE: &str = r#"{
    "content": [
        {"id": 6, "url": "https://rust-lang.org", "content": "Rust book"},
        {"id": 7, "url": "https://go.dev", "content": "Go tour"}
    ],
    "totalElements": 7,
    "totalPages": 2,
    "page": 1,
    "size": 5
}"#;

/// Service double: records calls and refuses saves with an empty url.
#[derive(Clone, Default)]
struct ServiceStore {
    calls: Rc<RefCell<Vec<String>>>,
}

impl RowStore<HistoryEntry> for ServiceStore {
    fn save(&mut self, id: RowId, draft: &HistoryDraft) -> Result<(), PersistenceError> {
        self.calls.borrow_mut().push(format!("PUT /extracted/{}", id));
        if draft.url.trim().is_empty() {
            return Err(PersistenceError::Rejected {
                status: 400,
                message: "url must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn delete(&mut self, id: RowId) -> Result<(), PersistenceError> {
        self.calls.borrow_mut().push(format!("DELETE /extracted/{}", id));
        Ok(())
    }
}

fn loaded() -> (ListHarness<HistoryEntry>, ServiceStore) {
    let store = ServiceStore::default();
    let mut harness = ListHarness::new(Vec::new(), ListOptions::history(PageSize::default()))
        .with_store(store.clone());
    let page = HistoryPage::from_json(PAGE_ONE).unwrap();
    harness
        .model_mut()
        .on_page_loaded(page.content, page.page, page.total_pages);
    (harness, store)
}

#[test]
fn service_page_is_shown_with_continuing_ordinals() {
    let (harness, _) = loaded();
    let model = harness.model();

    assert_eq!(model.page(), 1);
    assert_eq!(model.page_count(), 2);
    let ordinals: Vec<usize> = model.visible_rows().iter().map(|row| row.ordinal).collect();
    assert_eq!(ordinals, vec![6, 7]);
}

#[test]
fn search_requests_first_page_from_service() {
    let (mut harness, _) = loaded();

    harness.type_search("rust");

    assert_eq!(
        harness.model().fetch_request(),
        Some(HistoryQuery {
            page: 0,
            size: 5,
            search: Some("rust".to_string()),
        })
    );
}

#[test]
fn rejected_save_keeps_row_and_returns_draft() {
    let (mut harness, store) = loaded();

    harness.click_edit(6);
    harness.type_draft(HistoryDraft {
        url: String::new(),
        content: "Rust book, 2nd ed.".to_string(),
    });
    let outcome = harness.click_save(6);

    match outcome {
        SaveOutcome::Rejected { draft, error } => {
            assert_eq!(draft.content, "Rust book, 2nd ed.");
            assert!(error.to_string().contains("400"));
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
    assert_eq!(harness.model().rows()[0].url, "https://rust-lang.org");
    assert_eq!(harness.model().editing_id(), None);
    assert!(harness.changes().len() == 1, "only the initial load notified");
    assert_eq!(*store.calls.borrow(), vec!["PUT /extracted/6"]);
}

#[test]
fn confirmed_save_updates_row() {
    let (mut harness, _) = loaded();

    harness.click_edit(7);
    harness.type_draft(HistoryDraft {
        url: "https://go.dev/tour".to_string(),
        content: "Go tour".to_string(),
    });

    assert_eq!(harness.click_save(7), SaveOutcome::Saved);
    assert_eq!(harness.model().rows()[1].url, "https://go.dev/tour");
}

#[test]
fn delete_calls_service_then_asks_for_refresh() {
    let (mut harness, store) = loaded();

    harness.click_delete(6);
    assert!(store.calls.borrow().is_empty());

    let outcomes = harness.wait(350);

    assert_eq!(*store.calls.borrow(), vec!["DELETE /extracted/6"]);
    match &outcomes[..] {
        [DeleteOutcome::Removed { id, refresh }] => {
            assert_eq!(id.get(), 6);
            assert_eq!(
                refresh.as_ref().map(|query| query.page),
                Some(1),
                "page still holds entry 7"
            );
        }
        other => panic!("Expected one removal, got {:?}", other),
    }
}

#[test]
fn reload_before_timer_fires_never_removes_the_wrong_row() {
    let (mut harness, store) = loaded();

    harness.click_delete(6);
    // The service reloads the page and entry 6 has moved away.
    harness.model_mut().on_page_loaded(
        vec![HistoryEntry {
            id: RowId::new(8).unwrap(),
            url: "https://example.org".to_string(),
            content: "Other".to_string(),
            summary: None,
        }],
        1,
        2,
    );

    let outcomes = harness.wait(350);

    assert_eq!(outcomes, vec![DeleteOutcome::Skipped { id: RowId::new(6).unwrap() }]);
    assert_eq!(harness.model().rows().len(), 1);
    assert!(store.calls.borrow().is_empty());
}
