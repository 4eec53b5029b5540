//! Export pipeline behind the `extractly` binary.
//!
//! Parse a service payload, load it into a list view model, lay out the
//! matching export document and hand it to a page writer.

use crate::config::ResolvedConfig;
use crate::export::{history_document, summary_document, write_document, Document, DocumentWriter};
use crate::model::error::AppError;
use crate::model::{HistoryEntry, HistoryPage, KeyPoint, SummaryResponse};
use crate::state::ListViewModel;
use std::path::PathBuf;
use tracing::{debug, info};

/// Which payload the input holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadKind {
    /// `POST /extract` response: summary and key points.
    #[default]
    Summary,
    /// `GET /extracted` response: one page of history.
    History,
}

/// What to export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRequest {
    /// Payload type of the input.
    pub payload: PayloadKind,
    /// Only export history entries whose url or content contain this term.
    pub search: Option<String>,
}

/// Result of a finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// File the writer produced.
    pub path: PathBuf,
    /// Pages in the document.
    pub pages: usize,
    /// Laid-out lines across all pages.
    pub lines: usize,
    /// Rows that made it into the document.
    pub rows: usize,
}

/// Lay out the document for `json` without writing it.
pub fn build_document(
    json: &str,
    request: &ExportRequest,
    config: &ResolvedConfig,
) -> Result<(Document, usize), AppError> {
    let layout = config.export_layout();
    match request.payload {
        PayloadKind::Summary => {
            let response = SummaryResponse::from_json(json)?;
            if request.search.is_some() {
                debug!("Search term ignored for summary export");
            }
            let model: ListViewModel<KeyPoint> =
                ListViewModel::new(response.key_point_rows(), config.key_point_options());
            let document = summary_document(&response, model.rows(), &layout);
            Ok((document, model.rows().len()))
        }
        PayloadKind::History => {
            let page = HistoryPage::from_json(json)?;
            let mut model: ListViewModel<HistoryEntry> =
                ListViewModel::new(Vec::new(), config.history_options());
            model.on_page_loaded(page.content, page.page, page.total_pages);
            if let Some(term) = &request.search {
                model.set_search(term.as_str());
            }
            let entries: Vec<HistoryEntry> = model.filtered().into_iter().cloned().collect();
            debug!(
                loaded = model.rows().len(),
                matched = entries.len(),
                "History entries selected for export"
            );
            let document = history_document(&entries, &layout);
            Ok((document, entries.len()))
        }
    }
}

/// Build the document for `json` and write it with `writer`.
pub fn run_export<W: DocumentWriter + ?Sized>(
    json: &str,
    request: &ExportRequest,
    config: &ResolvedConfig,
    writer: &mut W,
) -> Result<ExportReport, AppError> {
    let (document, rows) = build_document(json, request, config)?;
    let path = write_document(&document, writer)?;
    let report = ExportReport {
        path,
        pages: document.pages.len(),
        lines: document.line_count(),
        rows,
    };
    info!(
        path = %report.path.display(),
        pages = report.pages,
        rows = report.rows,
        "Export finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::TextPageWriter;
    use crate::model::error::ApiError;

    const SUMMARY_JSON: &str =
        r#"{"summary":"This is a test summary.","keyPoints":["Point 1","Point 2"]}"#;

    const HISTORY_JSON: &str = r#"{
        "content": [
            {"id": 1, "url": "https://rust-lang.org", "content": "Systems programming"},
            {"id": 2, "url": "https://go.dev", "content": "Simple concurrency"}
        ],
        "totalElements": 2, "totalPages": 1, "page": 0, "size": 5
    }"#;

    #[test]
    fn summary_payload_builds_summary_document() {
        let (document, rows) =
            build_document(SUMMARY_JSON, &ExportRequest::default(), &ResolvedConfig::default())
                .unwrap();
        assert_eq!(document.file_name(), "extracted-summary.pdf");
        assert_eq!(rows, 2);
    }

    #[test]
    fn history_search_filters_entries() {
        let request = ExportRequest {
            payload: PayloadKind::History,
            search: Some("RUST".to_string()),
        };
        let (document, rows) =
            build_document(HISTORY_JSON, &request, &ResolvedConfig::default()).unwrap();
        assert_eq!(rows, 1);
        assert!(document.pages[0]
            .lines
            .iter()
            .any(|line| line.text == "1. https://rust-lang.org"));
    }

    #[test]
    fn service_error_body_is_reported() {
        let err = build_document(
            r#"{"error":"Failed to extract"}"#,
            &ExportRequest::default(),
            &ResolvedConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::Service { .. })));
    }

    #[test]
    fn run_export_writes_through_writer() {
        let dir = std::env::temp_dir().join(format!("extractly-app-{}", std::process::id()));
        let mut writer = TextPageWriter::new(&dir);

        let report = run_export(
            SUMMARY_JSON,
            &ExportRequest::default(),
            &ResolvedConfig::default(),
            &mut writer,
        )
        .unwrap();

        assert_eq!(report.path, dir.join("extracted-summary.txt"));
        assert_eq!(report.pages, 1);
        assert_eq!(report.lines, 6);
        assert!(report.path.exists());
        std::fs::remove_dir_all(&dir).ok();
    }
}
