//! The two export documents: the current extraction and the full history.

use super::layout::{DocumentBlock, LayoutPage, LayoutSession, LineMetric, PageGeometry, SectionStyle};
use crate::model::{HistoryEntry, KeyPoint, SummaryResponse};
use tracing::debug;

/// Which document is being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// Summary and key points of the current extraction.
    Summary,
    /// Every stored extraction.
    History,
}

impl ExportKind {
    /// File name the dashboard saves the document under.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportKind::Summary => "extracted-summary.pdf",
            ExportKind::History => "all-extracted-content.pdf",
        }
    }

    /// Title line at the top of page 1.
    pub fn title(self) -> &'static str {
        match self {
            ExportKind::Summary => "Extractly: AI-powered Content Extractor",
            ExportKind::History => "All Extracted Content",
        }
    }
}

/// Label above the summary paragraphs.
pub const SUMMARY_LABEL: &str = "Summary:";
/// Label above the numbered key points.
pub const KEY_POINTS_LABEL: &str = "Key Points:";

/// Geometry and section styles of both export documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLayout {
    /// Page size and margins shared by every section.
    pub geometry: PageGeometry,
    /// Summary paragraphs and the "Summary:" label.
    pub summary: SectionStyle,
    /// Numbered key points and the "Key Points:" label.
    pub key_points: SectionStyle,
    /// History entries: url label and wrapped content.
    pub history: SectionStyle,
    /// Gap between the summary and the key points.
    pub section_skip: u32,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            summary: SectionStyle {
                metric: LineMetric::Heuristic {
                    chars_per_line: 90,
                    advance_per_line: 5,
                },
                line_height: 5,
                label_height: 8,
                block_gap: 8,
                indent: 10,
                label_indent: 10,
            },
            key_points: SectionStyle {
                metric: LineMetric::Heuristic {
                    chars_per_line: 90,
                    advance_per_line: 4,
                },
                line_height: 4,
                label_height: 8,
                block_gap: 7,
                indent: 12,
                label_indent: 10,
            },
            history: SectionStyle {
                metric: LineMetric::Exact,
                line_height: 6,
                label_height: 7,
                block_gap: 4,
                indent: 12,
                label_indent: 10,
            },
            section_skip: 4,
        }
    }
}

impl ExportLayout {
    /// Use the true wrapped line count for the summary document too.
    pub fn with_exact_summary(mut self) -> Self {
        self.summary.metric = LineMetric::Exact;
        self.key_points.metric = LineMetric::Exact;
        self
    }
}

/// A laid-out document ready for a writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Which export this is.
    pub kind: ExportKind,
    /// Geometry the pages were laid out with.
    pub geometry: PageGeometry,
    /// Laid-out pages, page 1 first.
    pub pages: Vec<LayoutPage>,
}

impl Document {
    /// Title of the document kind.
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// File name the document is saved under.
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// Lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|page| page.lines.len()).sum()
    }
}

/// Lay out the summary document.
///
/// `key_points` are the rows as currently shown, so local edits and deletes
/// are exported. They are renumbered from 1 in their current order; the
/// heuristic estimate counts the point text without its number. Under the
/// heuristic metric each point is painted as one unwrapped line.
pub fn summary_document(
    response: &SummaryResponse,
    key_points: &[KeyPoint],
    layout: &ExportLayout,
) -> Document {
    let kind = ExportKind::Summary;
    let mut session = LayoutSession::new(layout.geometry);
    session.title(kind.title());

    // Blank paragraphs paint nothing but still advance the cursor.
    let blocks: Vec<DocumentBlock> = response
        .paragraphs()
        .into_iter()
        .enumerate()
        .map(|(index, paragraph)| match index {
            0 => DocumentBlock::labeled(SUMMARY_LABEL, paragraph),
            _ => DocumentBlock::new(paragraph),
        })
        .collect();
    session.section(&blocks, &layout.summary);

    session.skip(layout.section_skip);
    session.label(KEY_POINTS_LABEL, &layout.key_points);
    let single_line = matches!(layout.key_points.metric, LineMetric::Heuristic { .. });
    let blocks: Vec<DocumentBlock> = key_points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let block = DocumentBlock::new(format!("{}. {}", index + 1, point.text))
                .measured_by(point.text.as_str());
            if single_line {
                block.single_line()
            } else {
                block
            }
        })
        .collect();
    session.section(&blocks, &layout.key_points);

    let pages = session.finish();
    debug!(pages = pages.len(), key_points = key_points.len(), "Summary document laid out");
    Document {
        kind,
        geometry: layout.geometry,
        pages,
    }
}

/// Lay out the history document, numbering entries from 1.
pub fn history_document(entries: &[HistoryEntry], layout: &ExportLayout) -> Document {
    let kind = ExportKind::History;
    let mut session = LayoutSession::new(layout.geometry);
    session.title(kind.title());

    let blocks: Vec<DocumentBlock> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            DocumentBlock::labeled(format!("{}. {}", index + 1, entry.url), entry.content.as_str())
        })
        .collect();
    session.section(&blocks, &layout.history);

    let pages = session.finish();
    debug!(pages = pages.len(), entries = entries.len(), "History document laid out");
    Document {
        kind,
        geometry: layout.geometry,
        pages,
    }
}
