//! Row types held by the list view model.
//!
//! A [`Record`] is anything with a stable [`RowId`], searchable text, and an
//! editable draft. Two record types exist: key points of the current
//! extraction and entries of the extraction history.

use super::RowId;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Characters of the summary shown in the history table before truncation.
pub const SUMMARY_PREVIEW_CHARS: usize = 300;

/// A row that the list view model can filter, edit and delete.
pub trait Record: Clone + Debug + 'static {
    /// Snapshot of the editable fields taken when an edit session starts.
    type Draft: Clone + Debug + PartialEq;

    /// Stable identity of the row.
    fn id(&self) -> RowId;

    /// Fields matched against the search term. A row is kept by the filter if
    /// any field contains the term.
    fn search_fields(&self) -> Vec<&str>;

    /// Copy the editable fields into a draft.
    fn draft(&self) -> Self::Draft;

    /// Write a draft back into the row. Identity is unchanged.
    fn apply(&mut self, draft: Self::Draft);
}

// ===== KeyPoint =====

/// One key point of an extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    /// Row id, the 1-based ordinal in the response.
    pub id: RowId,
    /// Point text.
    pub text: String,
}

impl KeyPoint {
    /// Key point with the given id.
    pub fn new(id: RowId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Number a list of key point texts from 1 in order.
    ///
    /// Ids are assigned once here and never recomputed from positions, so a
    /// delete does not shift the identity of later rows.
    pub fn from_texts<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Self::new(RowId::from_position(index), text))
            .collect()
    }

    /// The plain texts, as the export and the parent view consume them.
    pub fn texts(rows: &[Self]) -> Vec<String> {
        rows.iter().map(|row| row.text.clone()).collect()
    }
}

impl Record for KeyPoint {
    type Draft = String;

    fn id(&self) -> RowId {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.text.as_str()]
    }

    fn draft(&self) -> String {
        self.text.clone()
    }

    fn apply(&mut self, draft: String) {
        self.text = draft;
    }
}

// ===== HistoryEntry =====

/// A stored extraction, as returned by `GET /extracted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Service id.
    pub id: RowId,
    /// Source address.
    #[serde(default)]
    pub url: String,
    /// Extracted content.
    #[serde(default)]
    pub content: String,
    /// Stored summary, if one was generated.
    #[serde(default)]
    pub summary: Option<String>,
}

impl HistoryEntry {
    /// Summary shortened for the table, with an ellipsis when truncated.
    pub fn summary_preview(&self) -> String {
        let Some(summary) = self.summary.as_deref() else {
            return String::new();
        };
        match summary.char_indices().nth(SUMMARY_PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &summary[..cut]),
            None => summary.to_string(),
        }
    }
}

/// Editable fields of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDraft {
    /// Edited address.
    pub url: String,
    /// Edited content.
    pub content: String,
}

impl Record for HistoryEntry {
    type Draft = HistoryDraft;

    fn id(&self) -> RowId {
        self.id
    }

    // Same fields the service searches: url or content.
    fn search_fields(&self) -> Vec<&str> {
        vec![self.url.as_str(), self.content.as_str()]
    }

    fn draft(&self) -> HistoryDraft {
        HistoryDraft {
            url: self.url.clone(),
            content: self.content.clone(),
        }
    }

    fn apply(&mut self, draft: HistoryDraft) {
        self.url = draft.url;
        self.content = draft.content;
    }
}
