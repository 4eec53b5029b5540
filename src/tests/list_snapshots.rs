//! Snapshot tests of the rendered tables.

use crate::model::{HistoryEntry, HistoryPage};
use crate::state::{ListOptions, PageSize};
use crate::test_harness::ListHarness;

const SEVEN: [&str; 7] = [
    "Point 1", "Point 2", "Point 3", "Point 4", "Point 5", "Point 6", "Point 7",
];

fn history_page() -> ListHarness<HistoryEntry> {
    let json = r#"{
        "content": [
            {"id": 6, "url": "https://rust-lang.org", "content": "Rust book"},
            {"id": 7, "url": "https://go.dev", "content": "Go tour"}
        ],
        "totalElements": 7, "totalPages": 2, "page": 1, "size": 5
    }"#;
    let page = HistoryPage::from_json(json).unwrap();
    let mut harness = ListHarness::new(Vec::new(), ListOptions::history(PageSize::default()));
    harness
        .model_mut()
        .on_page_loaded(page.content, page.page, page.total_pages);
    harness
}

#[test]
fn snapshot_two_key_points() {
    let harness = ListHarness::key_points(&["Point 1", "Point 2"]);
    insta::assert_snapshot!(harness.render_to_string(), @r"
    # | Row | State
    1 | Point 1 | viewing
    2 | Point 2 | viewing
    ");
}

#[test]
fn snapshot_search_highlights_and_paginates() {
    let mut harness = ListHarness::key_points(&SEVEN);
    harness.type_search("point");
    insta::assert_snapshot!(harness.render_to_string(), @r"
    Search: point
    # | Row | State
    1 | [Point] 1 | viewing
    2 | [Point] 2 | viewing
    3 | [Point] 3 | viewing
    4 | [Point] 4 | viewing
    5 | [Point] 5 | viewing
    Page 1 of 2
    ");
}

#[test]
fn snapshot_second_page_continues_numbering() {
    let mut harness = ListHarness::key_points(&SEVEN);
    assert!(harness.click_page(2));
    insta::assert_snapshot!(harness.render_to_string(), @r"
    # | Row | State
    6 | Point 6 | viewing
    7 | Point 7 | viewing
    Page 2 of 2
    ");
}

#[test]
fn snapshot_editing_and_deleting_rows() {
    let mut harness = ListHarness::key_points(&["Point 1", "Point 2", "Point 3"]);
    assert!(harness.click_edit(1));
    assert!(harness.click_delete(2));
    insta::assert_snapshot!(harness.render_to_string(), @r"
    # | Row | State
    1 | Point 1 | editing
    2 | Point 2 | deleting
    3 | Point 3 | viewing
    ");
}

#[test]
fn snapshot_no_results() {
    let mut harness = ListHarness::key_points(&["Point 1", "Point 2"]);
    harness.type_search("zzz");
    insta::assert_snapshot!(harness.render_to_string(), @r"
    Search: zzz
    # | Row | State
    No results found.
    ");
}

#[test]
fn snapshot_empty_key_points() {
    let harness = ListHarness::key_points(&[]);
    insta::assert_snapshot!(harness.render_to_string(), @r"
    # | Row | State
    No key points found.
    ");
}

#[test]
fn snapshot_history_second_page() {
    let harness = history_page();
    insta::assert_snapshot!(harness.render_to_string(), @r"
    # | Row | State
    6 | https://rust-lang.org | Rust book | viewing
    7 | https://go.dev | Go tour | viewing
    Page 2 of 2
    ");
}

#[test]
fn snapshot_history_search_matches_url_and_content() {
    let mut harness = history_page();
    harness.type_search("rust");
    insta::assert_snapshot!(harness.render_to_string(), @r"
    Search: rust
    # | Row | State
    1 | https://[rust]-lang.org | [Rust] book | viewing
    Page 1 of 2
    ");
}
