//! In-memory document store.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{Collection, Document, DocumentStore, StoreError};

/// Thread-safe in-memory store.
///
/// Used by tests and local previews. Collections can be marked as failing to
/// exercise the dashboard's degraded paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<Collection, Vec<Document>>,
    failures: DashMap<Collection, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents of a collection.
    #[must_use]
    pub fn with_collection(self, collection: Collection, documents: Vec<Document>) -> Self {
        self.collections.insert(collection, documents);
        self
    }

    /// Makes every scan of `collection` fail with `message`.
    #[must_use]
    pub fn with_failure(self, collection: Collection, message: impl Into<String>) -> Self {
        self.failures.insert(collection, message.into());
        self
    }

    /// Inserts or replaces a document, keyed by its document key.
    pub fn upsert(&self, collection: Collection, document: Document) {
        let mut documents = self.collections.entry(collection).or_default();
        match documents.iter_mut().find(|d| d.key == document.key) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
    }

    /// Clears an injected failure.
    pub fn heal(&self, collection: Collection) {
        self.failures.remove(&collection);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn scan(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        if let Some(message) = self.failures.get(&collection) {
            return Err(StoreError::scan(collection, message.value().clone()));
        }

        Ok(self
            .collections
            .get(&collection)
            .map(|documents| documents.value().clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scan_missing_collection_is_empty() {
        let store = MemoryStore::new();
        let docs = store.scan(Collection::Rotas).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_key() {
        let store = MemoryStore::new();
        store.upsert(Collection::Cidades, Document::new("c1").with("nome", "Porto"));
        store.upsert(Collection::Cidades, Document::new("c1").with("nome", "Braga"));
        store.upsert(Collection::Cidades, Document::new("c2").with("nome", "Faro"));

        let docs = store.scan(Collection::Cidades).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text("nome"), Some("Braga"));
    }

    #[tokio::test]
    async fn test_injected_failure_and_heal() {
        let store = MemoryStore::new().with_failure(Collection::Cidades, "offline");

        let err = store.scan(Collection::Cidades).await.unwrap_err();
        assert_eq!(err.collection(), Collection::Cidades);
        assert!(err.to_string().contains("offline"));

        store.heal(Collection::Cidades);
        assert!(store.scan(Collection::Cidades).await.is_ok());
    }
}
