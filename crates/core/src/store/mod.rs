//! Read-side abstraction over the document store.
//!
//! The dashboard only ever performs full scans of a named collection. Each
//! scanned document is a key plus a bag of loosely typed fields; typed entity
//! views are decoded from it in [`crate::dashboard::entity`].

mod document;
mod error;
mod memory;

pub use document::{Collection, Document, FieldValue, StoreTimestamp};
pub use error::StoreError;
pub use memory::MemoryStore;

use async_trait::async_trait;

/// A keyed collection store that supports full collection scans.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads every document in `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    async fn scan(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;
}
