use thiserror::Error;

use crate::id::MalformedId;

/// Errors reported by a [`BlogStore`](super::BlogStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend rejected an identifier as syntactically invalid.
    #[error("malformed id: {0}")]
    MalformedId(String),
    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<MalformedId> for StoreError {
    fn from(err: MalformedId) -> Self {
        Self::MalformedId(err.0)
    }
}
