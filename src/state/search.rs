//! Case-insensitive substring search and match highlighting.
//!
//! The user's term is always escaped before it is compiled, so any input is a
//! literal: `"a.b"` never matches `"axb"` and `"(("` never fails to compile.
//! Matching uses Unicode simple case folding, and match positions always refer
//! to the original text, so highlighted spans can be sliced out of it directly.

use regex::{Regex, RegexBuilder};
use tracing::warn;

// ===== Segment =====

/// A run of text that is either part of a match or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Slice of the original text.
    pub text: &'a str,
    /// Whether the slice matched the term.
    pub matched: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }

    fn hit(text: &'a str) -> Self {
        Self {
            text,
            matched: true,
        }
    }
}

// ===== SearchTerm =====

#[derive(Debug, Clone)]
enum Pattern {
    /// Empty term: everything passes the filter, nothing is highlighted.
    Empty,
    Compiled(Regex),
    /// Term too large for the regex size limit. Matches nothing.
    Oversized,
}

/// A search term compiled once and reused for every row.
///
/// Any string is a valid term, including the empty string.
#[derive(Debug, Clone)]
pub struct SearchTerm {
    raw: String,
    pattern: Pattern,
}

impl SearchTerm {
    /// Compile `raw` as a literal, case-insensitive term.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let pattern = if raw.is_empty() {
            Pattern::Empty
        } else {
            match RegexBuilder::new(&regex::escape(&raw))
                .case_insensitive(true)
                .build()
            {
                Ok(regex) => Pattern::Compiled(regex),
                Err(err) => {
                    warn!(term_len = raw.len(), error = %err, "Search term could not be compiled");
                    Pattern::Oversized
                }
            }
        };
        Self { raw, pattern }
    }

    /// Raw term as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the term is blank and matches everything.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// True when `text` contains the term, ignoring case. Every text contains
    /// the empty term.
    pub fn matches(&self, text: &str) -> bool {
        match &self.pattern {
            Pattern::Empty => true,
            Pattern::Compiled(regex) => regex.is_match(text),
            Pattern::Oversized => false,
        }
    }

    /// Split `text` into matched and unmatched segments.
    ///
    /// Concatenating the segment texts reproduces `text`. With an empty term
    /// the result is the whole text as one unmatched segment. Empty text has
    /// no segments.
    pub fn highlight<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        if text.is_empty() {
            return Vec::new();
        }
        let regex = match &self.pattern {
            Pattern::Compiled(regex) => regex,
            Pattern::Empty | Pattern::Oversized => return vec![Segment::plain(text)],
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in regex.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::plain(&text[last..m.start()]));
            }
            segments.push(Segment::hit(m.as_str()));
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::plain(&text[last..]));
        }
        segments
    }

    /// Number of non-overlapping matches in `text`.
    pub fn match_count(&self, text: &str) -> usize {
        match &self.pattern {
            Pattern::Compiled(regex) => regex.find_iter(text).count(),
            Pattern::Empty | Pattern::Oversized => 0,
        }
    }
}

impl Default for SearchTerm {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl PartialEq for SearchTerm {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for SearchTerm {}

// ===== Free functions =====

/// Highlight every occurrence of `term` in `text`.
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    SearchTerm::new(term).highlight(text)
}

/// Case-insensitive substring test.
pub fn contains(text: &str, term: &str) -> bool {
    SearchTerm::new(term).matches(text)
}

/// Number of highlighted spans `highlight` would produce.
pub fn match_count(text: &str, term: &str) -> usize {
    SearchTerm::new(term).match_count(text)
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
