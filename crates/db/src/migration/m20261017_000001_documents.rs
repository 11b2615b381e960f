//! Documents migration.
//!
//! Creates the single table backing all dashboard collections.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS documents CASCADE;")
            .await?;
        Ok(())
    }
}

const DOCUMENTS_SQL: &str = r"
-- One row per document; the key is unique within its collection
CREATE TABLE documents (
    collection VARCHAR(64) NOT NULL,
    key VARCHAR(255) NOT NULL,
    data JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (collection, key),
    CONSTRAINT chk_documents_data_object CHECK (jsonb_typeof(data) = 'object')
);
";
