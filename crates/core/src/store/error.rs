//! Store error types.

use thiserror::Error;

use super::Collection;

/// Errors raised while reading from the document store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The collection could not be scanned.
    #[error("failed to scan collection '{collection}': {message}")]
    Scan {
        /// Collection being scanned.
        collection: Collection,
        /// Backend error message.
        message: String,
    },

    /// A stored document could not be decoded.
    #[error("malformed document '{key}' in collection '{collection}': {message}")]
    Malformed {
        /// Collection holding the document.
        collection: Collection,
        /// Document key.
        key: String,
        /// Decoding error message.
        message: String,
    },
}

impl StoreError {
    /// Create a scan error.
    #[must_use]
    pub fn scan(collection: Collection, message: impl Into<String>) -> Self {
        Self::Scan {
            collection,
            message: message.into(),
        }
    }

    /// Create a malformed document error.
    #[must_use]
    pub fn malformed(
        collection: Collection,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            collection,
            key: key.into(),
            message: message.into(),
        }
    }

    /// Collection the error relates to.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Scan { collection, .. } | Self::Malformed { collection, .. } => *collection,
        }
    }
}
