//! Document layout: labeled text blocks onto fixed-size pages.
//!
//! A single vertical cursor walks down the page. Before any line is emitted,
//! a cursor already past [`PageGeometry::page_height`] starts a new page and
//! returns to the top margin. Lines are never split across pages; a body
//! painted as one group under [`LineMetric::Heuristic`] may run past the page
//! height, which is the accepted cost of that metric.
//!
//! Coordinates are in layout units (millimetres on the exported page).

use super::wrap::{char_len, wrap};
use tracing::trace;

// ===== Geometry and style =====

/// Page size and margins shared by every section of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    /// Maximum display columns of a wrapped body line.
    pub page_width_chars: usize,
    /// Cursor position past which the next line goes to a new page.
    pub page_height: u32,
    /// Cursor position of the first line of every page.
    pub top_margin: u32,
    /// X position of the title.
    pub left_margin: u32,
    /// Cursor advance after the document title.
    pub title_height: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width_chars: 90,
            page_height: 270,
            top_margin: 15,
            left_margin: 10,
            title_height: 10,
        }
    }
}

/// How the cursor advances over a wrapped body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMetric {
    /// One page check and one `line_height` advance per wrapped line.
    Exact,
    /// Paint all wrapped lines from the current cursor, then advance by
    /// `ceil(chars / chars_per_line) * advance_per_line`, whatever the true
    /// wrapped count is.
    Heuristic {
        /// Characters counted as one line.
        chars_per_line: usize,
        /// Cursor advance per estimated line.
        advance_per_line: u32,
    },
}

/// Per-section spacing and indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStyle {
    /// How the cursor advances over a body.
    pub metric: LineMetric,
    /// Distance between consecutive painted body lines.
    pub line_height: u32,
    /// Cursor advance after a label line.
    pub label_height: u32,
    /// Cursor advance after every block, including its body.
    pub block_gap: u32,
    /// X position of body lines.
    pub indent: u32,
    /// X position of label lines.
    pub label_indent: u32,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            metric: LineMetric::Exact,
            line_height: 6,
            label_height: 7,
            block_gap: 4,
            indent: 12,
            label_indent: 10,
        }
    }
}

// ===== Input and output =====

/// One optionally labeled block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentBlock {
    /// Line emitted above the body, never wrapped.
    pub label: Option<String>,
    /// Text painted under the label.
    pub body: String,
    /// Text the heuristic line estimate counts instead of `body`.
    pub measure: Option<String>,
    /// Paint `body` as one unwrapped line.
    pub single_line: bool,
}

impl DocumentBlock {
    /// Unlabeled block.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            label: None,
            body: body.into(),
            measure: None,
            single_line: false,
        }
    }

    /// Block with a label line above the body.
    pub fn labeled(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(body)
        }
    }

    /// Estimate the advance from `text` rather than the painted body, for
    /// bodies carrying a prefix such as a list number.
    pub fn measured_by(mut self, text: impl Into<String>) -> Self {
        self.measure = Some(text.into());
        self
    }

    /// Paint the body as a single line, however long.
    pub fn single_line(mut self) -> Self {
        self.single_line = true;
        self
    }

    fn lines(&self, width: usize) -> Vec<String> {
        if !self.single_line {
            return wrap(&self.body, width);
        }
        if self.body.trim().is_empty() {
            Vec::new()
        } else {
            vec![self.body.clone()]
        }
    }

    fn measured_len(&self) -> usize {
        char_len(self.measure.as_deref().unwrap_or(&self.body))
    }
}

/// Role of a laid-out line, which decides its font when painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Document title.
    Title,
    /// Section or block label.
    Label,
    /// Wrapped body text.
    Body,
}

/// A line of text at a fixed position on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    /// Text painted on the line.
    pub text: String,
    /// Horizontal position.
    pub x: u32,
    /// Vertical position, growing down the page.
    pub y: u32,
    /// Role of the line.
    pub kind: LineKind,
}

/// One output page. Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPage {
    /// 1-based page number.
    pub number: usize,
    /// Lines in emission order.
    pub lines: Vec<LayoutLine>,
}

impl LayoutPage {
    fn new(number: usize) -> Self {
        Self {
            number,
            lines: Vec::new(),
        }
    }
}

// ===== Session =====

/// Lays several sections onto one continuous page sequence.
///
/// ```
/// use extractly::export::layout::{DocumentBlock, LayoutSession, PageGeometry, SectionStyle};
///
/// let mut session = LayoutSession::new(PageGeometry::default());
/// session.title("Report");
/// session.section(&[DocumentBlock::labeled("1.", "body")], &SectionStyle::default());
/// let pages = session.finish();
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].lines.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutSession {
    geometry: PageGeometry,
    done: Vec<LayoutPage>,
    current: LayoutPage,
    y: u32,
}

impl LayoutSession {
    /// Start at the top margin of page 1.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            done: Vec::new(),
            current: LayoutPage::new(1),
            y: geometry.top_margin,
        }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> u32 {
        self.y
    }

    /// Number of the page the next line would land on if it fit.
    pub fn page_number(&self) -> usize {
        self.current.number
    }

    /// Emit the document title at the left margin.
    pub fn title(&mut self, text: &str) {
        self.break_if_full();
        self.emit(text.to_string(), self.geometry.left_margin, self.y, LineKind::Title);
        self.y += self.geometry.title_height;
    }

    /// Emit a label line outside any block.
    pub fn label(&mut self, text: &str, style: &SectionStyle) {
        self.break_if_full();
        self.emit(text.to_string(), style.label_indent, self.y, LineKind::Label);
        self.y += style.label_height;
    }

    /// Move the cursor down without emitting anything.
    pub fn skip(&mut self, amount: u32) {
        self.y += amount;
    }

    /// Lay out `blocks` in order with one style.
    pub fn section(&mut self, blocks: &[DocumentBlock], style: &SectionStyle) {
        for block in blocks {
            self.block(block, style);
        }
    }

    /// Lay out a single block.
    pub fn block(&mut self, block: &DocumentBlock, style: &SectionStyle) {
        if let Some(label) = &block.label {
            self.label(label, style);
        }

        let lines = block.lines(self.geometry.page_width_chars);
        match style.metric {
            LineMetric::Exact => {
                for line in lines {
                    self.break_if_full();
                    self.emit(line, style.indent, self.y, LineKind::Body);
                    self.y += style.line_height;
                }
            }
            LineMetric::Heuristic {
                chars_per_line,
                advance_per_line,
            } => {
                if !lines.is_empty() {
                    self.break_if_full();
                    let top = self.y;
                    for (offset, line) in (0u32..).zip(lines) {
                        self.emit(line, style.indent, top + offset * style.line_height, LineKind::Body);
                    }
                }
                let estimated = block.measured_len().div_ceil(chars_per_line.max(1));
                self.y += estimated as u32 * advance_per_line;
            }
        }

        self.y += style.block_gap;
    }

    /// Close the session and return every page, page 1 first.
    ///
    /// Page 1 always exists. Later pages exist only if a line landed on them.
    pub fn finish(mut self) -> Vec<LayoutPage> {
        self.done.push(self.current);
        self.done
    }

    fn break_if_full(&mut self) {
        if self.y > self.geometry.page_height {
            let next = LayoutPage::new(self.current.number + 1);
            let full = std::mem::replace(&mut self.current, next);
            trace!(page = full.number, lines = full.lines.len(), "Page break");
            self.done.push(full);
            self.y = self.geometry.top_margin;
        }
    }

    fn emit(&mut self, text: String, x: u32, y: u32, kind: LineKind) {
        self.current.lines.push(LayoutLine { text, x, y, kind });
    }
}

/// Lay out `blocks` with a single style and no title.
pub fn layout(
    blocks: &[DocumentBlock],
    geometry: PageGeometry,
    style: &SectionStyle,
) -> Vec<LayoutPage> {
    let mut session = LayoutSession::new(geometry);
    session.section(blocks, style);
    session.finish()
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
