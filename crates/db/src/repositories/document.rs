//! Document repository: the PostgreSQL-backed document store.

use async_trait::async_trait;
use chrono::Utc;
use painel_core::store::{Collection, Document, DocumentStore, StoreError};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, sea_query::OnConflict,
};
use tracing::{debug, error};

use crate::codec::{decode_document, encode_document};
use crate::entities::documents;

/// Repository over the `documents` table.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads every row of a collection, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_all(&self, collection: Collection) -> Result<Vec<documents::Model>, DbErr> {
        documents::Entity::find()
            .filter(documents::Column::Collection.eq(collection.name()))
            .order_by_asc(documents::Column::Key)
            .all(&self.db)
            .await
    }

    /// Inserts a document or replaces the data of an existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn upsert(&self, collection: Collection, document: &Document) -> Result<(), DbErr> {
        let now = Utc::now().fixed_offset();
        let model = documents::ActiveModel {
            collection: Set(collection.name().to_string()),
            key: Set(document.key.clone()),
            data: Set(encode_document(document)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        documents::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([documents::Column::Collection, documents::Column::Key])
                    .update_columns([documents::Column::Data, documents::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn scan(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let rows = self.find_all(collection).await.map_err(|e| {
            error!(error = %e, %collection, "Failed to scan collection");
            StoreError::scan(collection, e.to_string())
        })?;

        debug!(%collection, rows = rows.len(), "Scanned collection");

        rows.iter()
            .map(|row| decode_document(collection, &row.key, &row.data))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    fn row(key: &str, data: serde_json::Value) -> documents::Model {
        let at = Utc::now().fixed_offset();
        documents::Model {
            collection: "rotas".to_string(),
            key: key.to_string(),
            data,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_scan_decodes_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                row("r1", json!({ "destino": "Porto", "motoristaId": "e1" })),
                row("r2", json!({ "cidadeDestino": "Braga" })),
            ]])
            .into_connection();
        let repo = DocumentRepository::new(db);

        let docs = repo.scan(Collection::Rotas).await.unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].key, "r1");
        assert_eq!(docs[0].text("destino"), Some("Porto"));
        assert_eq!(docs[1].text("cidadeDestino"), Some("Braga"));
    }

    #[tokio::test]
    async fn test_scan_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = DocumentRepository::new(db);

        let err = repo.scan(Collection::Cidades).await.unwrap_err();

        assert!(matches!(
            err,
            StoreError::Scan {
                collection: Collection::Cidades,
                ..
            }
        ));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_scan_rejects_malformed_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("r1", json!("oops"))]])
            .into_connection();
        let repo = DocumentRepository::new(db);

        let err = repo.scan(Collection::Rotas).await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_upsert_executes_single_statement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = DocumentRepository::new(db.clone());

        repo.upsert(
            Collection::Cidades,
            &Document::new("c1").with("nome", "Porto"),
        )
        .await
        .unwrap();

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }
}
