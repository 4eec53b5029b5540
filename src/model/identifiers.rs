//! Row identifier newtype with a smart constructor.
//!
//! Ids are positive integers: key points are numbered from 1 when a result is
//! loaded, history entries carry the id assigned by the service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a row in a list.
///
/// Identity never changes through edits or deletes of other rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RowId(u64);

impl RowId {
    /// Smart constructor: validates the id is non-zero.
    pub fn new(raw: u64) -> Result<Self, InvalidRowId> {
        if raw == 0 {
            Err(InvalidRowId::Zero)
        } else {
            Ok(Self(raw))
        }
    }

    /// Id for the key point at 0-based position `index`.
    pub fn from_position(index: usize) -> Self {
        Self(index as u64 + 1)
    }

    /// Raw id value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for RowId {
    type Error = InvalidRowId;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<RowId> for u64 {
    fn from(id: RowId) -> Self {
        id.0
    }
}

// ===== Error Types =====

/// Why a raw value is not a [`RowId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRowId {
    /// Ids start at 1.
    #[error("Row id must be a positive integer")]
    Zero,
}

// ===== Tests =====
