//! Tests for the layout engine.

use super::*;

fn exact(line_height: u32, gap: u32) -> SectionStyle {
    SectionStyle {
        metric: LineMetric::Exact,
        line_height,
        label_height: 7,
        block_gap: gap,
        indent: 12,
        label_indent: 10,
    }
}

fn heuristic(chars_per_line: usize, advance: u32, gap: u32) -> SectionStyle {
    SectionStyle {
        metric: LineMetric::Heuristic {
            chars_per_line,
            advance_per_line: advance,
        },
        line_height: advance,
        label_height: 8,
        block_gap: gap,
        indent: 10,
        label_indent: 10,
    }
}

fn narrow(page_height: u32) -> PageGeometry {
    PageGeometry {
        page_width_chars: 1,
        page_height,
        top_margin: 15,
        left_margin: 10,
        title_height: 10,
    }
}

fn ys(page: &LayoutPage) -> Vec<u32> {
    page.lines.iter().map(|line| line.y).collect()
}

fn texts(page: &LayoutPage) -> Vec<&str> {
    page.lines.iter().map(|line| line.text.as_str()).collect()
}

// ===== Exact metric =====

#[test]
fn labeled_block_positions() {
    let pages = layout(
        &[DocumentBlock::labeled("1. https://a.example", "hello")],
        PageGeometry::default(),
        &exact(6, 4),
    );

    assert_eq!(pages.len(), 1);
    assert_eq!(
        pages[0].lines,
        vec![
            LayoutLine {
                text: "1. https://a.example".to_string(),
                x: 10,
                y: 15,
                kind: LineKind::Label,
            },
            LayoutLine {
                text: "hello".to_string(),
                x: 12,
                y: 22,
                kind: LineKind::Body,
            },
        ]
    );
}

#[test]
fn short_body_takes_one_line() {
    let pages = layout(
        &[DocumentBlock::new("short body")],
        PageGeometry::default(),
        &exact(6, 4),
    );
    assert_eq!(pages[0].lines.len(), 1);
}

#[test]
fn oversized_word_is_one_unsplit_line() {
    let word = "x".repeat(120);
    let pages = layout(
        &[DocumentBlock::new(word.clone())],
        PageGeometry::default(),
        &exact(6, 4),
    );
    assert_eq!(texts(&pages[0]), vec![word.as_str()]);
}

#[test]
fn break_happens_only_past_page_height() {
    // Cursor sits exactly on the page height before "c": no break yet.
    let pages = layout(&[DocumentBlock::new("a b c d e")], narrow(27), &exact(6, 0));

    assert_eq!(pages.len(), 2);
    assert_eq!(texts(&pages[0]), vec!["a", "b", "c"]);
    assert_eq!(ys(&pages[0]), vec![15, 21, 27]);
    assert_eq!(texts(&pages[1]), vec!["d", "e"]);
    assert_eq!(ys(&pages[1]), vec![15, 21]);
    assert_eq!(pages[1].number, 2);
}

#[test]
fn label_is_checked_for_page_break() {
    let mut session = LayoutSession::new(narrow(20));
    session.skip(10);
    session.label("Label", &exact(6, 0));

    let pages = session.finish();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].lines.is_empty());
    assert_eq!(pages[1].lines[0].y, 15);
}

#[test]
fn no_trailing_empty_page() {
    let pages = layout(&[DocumentBlock::new("a b")], narrow(16), &exact(6, 100));
    assert_eq!(pages.len(), 2);
    assert!(pages.iter().all(|page| !page.lines.is_empty()));
}

#[test]
fn empty_body_emits_nothing_but_advances_gap() {
    let mut session = LayoutSession::new(PageGeometry::default());
    session.block(&DocumentBlock::new("   "), &exact(6, 4));

    assert_eq!(session.cursor(), 19);
    assert!(session.finish()[0].lines.is_empty());
}

#[test]
fn empty_input_is_one_empty_page() {
    let pages = layout(&[], PageGeometry::default(), &SectionStyle::default());
    assert_eq!(pages, vec![LayoutPage::new(1)]);
}

// ===== Heuristic metric =====

#[test]
fn heuristic_ignores_true_wrap_count() {
    // One unsplittable word, estimated as three lines.
    let mut session = LayoutSession::new(PageGeometry::default());
    session.block(&DocumentBlock::new("a".repeat(181)), &heuristic(90, 5, 8));

    assert_eq!(session.cursor(), 15 + 3 * 5 + 8);
    assert_eq!(session.finish()[0].lines.len(), 1);
}

#[test]
fn heuristic_paints_wrapped_lines_as_a_group() {
    let geometry = PageGeometry {
        page_width_chars: 10,
        ..PageGeometry::default()
    };
    let mut session = LayoutSession::new(geometry);
    session.block(&DocumentBlock::new("aaaa bbbb cccc"), &heuristic(90, 5, 8));

    assert_eq!(session.cursor(), 15 + 5 + 8);
    let pages = session.finish();
    assert_eq!(texts(&pages[0]), vec!["aaaa bbbb", "cccc"]);
    assert_eq!(ys(&pages[0]), vec![15, 20]);
}

#[test]
fn heuristic_counts_measure_text_instead_of_body() {
    // Body is 92 chars (two estimated lines); the measure is 89 (one).
    let mut session = LayoutSession::new(PageGeometry::default());
    let block = DocumentBlock::new(format!("1. {}", "a".repeat(89))).measured_by("a".repeat(89));
    session.block(&block, &heuristic(90, 4, 7));

    assert_eq!(session.cursor(), 15 + 4 + 7);
}

#[test]
fn single_line_body_is_not_wrapped() {
    let geometry = PageGeometry {
        page_width_chars: 10,
        ..PageGeometry::default()
    };
    let pages = layout(
        &[DocumentBlock::new("aaaa bbbb cccc").single_line()],
        geometry,
        &heuristic(90, 5, 8),
    );
    assert_eq!(texts(&pages[0]), vec!["aaaa bbbb cccc"]);
}

#[test]
fn blank_body_advances_without_lines() {
    let mut session = LayoutSession::new(PageGeometry::default());
    session.block(&DocumentBlock::new(" "), &heuristic(90, 5, 8));

    assert_eq!(session.cursor(), 15 + 5 + 8);
    assert!(session.finish()[0].lines.is_empty());
}

#[test]
fn heuristic_group_is_not_split_across_pages() {
    let geometry = PageGeometry {
        page_width_chars: 1,
        page_height: 20,
        ..PageGeometry::default()
    };
    let pages = layout(&[DocumentBlock::new("a b c d")], geometry, &heuristic(90, 5, 0));

    assert_eq!(pages.len(), 1);
    assert_eq!(ys(&pages[0]), vec![15, 20, 25, 30]);
}

#[test]
fn heuristic_empty_body_still_advances_gap() {
    let mut session = LayoutSession::new(PageGeometry::default());
    session.block(&DocumentBlock::labeled("Summary:", ""), &heuristic(90, 5, 8));
    assert_eq!(session.cursor(), 15 + 8 + 8);
}

// ===== Session =====

#[test]
fn title_then_sections_share_pages() {
    let mut session = LayoutSession::new(PageGeometry::default());
    session.title("Doc");
    session.section(&[DocumentBlock::new("one")], &exact(6, 4));
    session.skip(4);
    session.section(&[DocumentBlock::new("two")], &exact(6, 4));

    let pages = session.finish();
    assert_eq!(pages.len(), 1);
    assert_eq!(ys(&pages[0]), vec![15, 25, 39]);
    assert_eq!(pages[0].lines[0].kind, LineKind::Title);
    assert_eq!(pages[0].lines[0].x, 10);
}

#[test]
fn page_number_tracks_breaks() {
    let mut session = LayoutSession::new(narrow(15));
    assert_eq!(session.page_number(), 1);
    session.section(&[DocumentBlock::new("a b")], &exact(6, 0));
    assert_eq!(session.page_number(), 2);
}
