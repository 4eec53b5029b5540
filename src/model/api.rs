//! Data contracts of the extraction and history service.
//!
//! Only the payload shapes live here; issuing the HTTP requests is the
//! caller's concern. Field names follow the service's camelCase JSON.

use super::error::ApiError;
use super::record::{HistoryDraft, HistoryEntry, KeyPoint};
use serde::{Deserialize, Serialize};

/// Body of `POST /extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Article address, absolute http(s).
    pub url: String,
}

impl ExtractRequest {
    /// Build a request, rejecting anything that is not an absolute http(s) URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ApiError> {
        let url = url.into();
        let trimmed = url.trim();
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match host {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => Ok(Self {
                url: trimmed.to_string(),
            }),
            _ => Err(ApiError::InvalidUrl { url }),
        }
    }
}

/// Successful response of `POST /extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Generated summary text.
    pub summary: String,
    /// Key points in service order.
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl SummaryResponse {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        parse_body(body)
    }

    /// Key points as rows numbered from 1.
    pub fn key_point_rows(&self) -> Vec<KeyPoint> {
        KeyPoint::from_texts(self.key_points.iter().cloned())
    }

    /// Summary split into paragraphs.
    ///
    /// A blank line (`\n\n`) separates like a single newline. Any further
    /// empty or whitespace-only pieces are kept, so `"a\n\n\nb"` gives
    /// `["a", "", "b"]`. Always at least one paragraph.
    pub fn paragraphs(&self) -> Vec<&str> {
        let mut pieces = Vec::new();
        let mut rest = self.summary.as_str();
        while let Some(at) = rest.find('\n') {
            pieces.push(&rest[..at]);
            let separator = if rest[at + 1..].starts_with('\n') { 2 } else { 1 };
            rest = &rest[at + separator..];
        }
        pieces.push(rest);
        pieces
    }
}

/// Error body returned by the service with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable failure message.
    pub error: String,
}

/// Parse `body` as `T`, recognising the service's error body when `T` does
/// not match.
fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(err) => match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(ApiErrorBody { error }) => Err(ApiError::Service { message: error }),
            Err(_) => Err(err.into()),
        },
    }
}

/// Query of `GET /extracted`. Pages are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Zero-based page index.
    pub page: usize,
    /// Rows per page.
    pub size: usize,
    /// Search term; omitted when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl HistoryQuery {
    /// Query parameters in the order the dashboard sends them. An empty
    /// search is omitted rather than sent blank.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

/// Response of `GET /extracted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    /// Entries of the requested page.
    pub content: Vec<HistoryEntry>,
    /// Entries across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Number of pages for the query.
    #[serde(default)]
    pub total_pages: usize,
    /// Zero-based index of this page.
    #[serde(default)]
    pub page: usize,
    /// Rows per page.
    #[serde(default)]
    pub size: usize,
}

impl HistoryPage {
    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        parse_body(body)
    }
}

/// Body of `PUT /extracted/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// New article address.
    pub url: String,
    /// New extracted content.
    pub content: String,
}

impl From<&HistoryDraft> for UpdateRequest {
    fn from(draft: &HistoryDraft) -> Self {
        Self {
            url: draft.url.clone(),
            content: draft.content.clone(),
        }
    }
}
