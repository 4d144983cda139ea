//! Issuance result persistence.
//!
//! All functions take a `&PgPool` and operate on the `nfe_documents` table.
//! Stored documents are immutable once written; there are no update
//! operations. The document column holds the provider's issuance response
//! verbatim, so schema changes on the provider side never require a
//! migration here.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Insert one issuance result. Returns the generated row id.
pub async fn insert(pool: &PgPool, document: &serde_json::Value) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO nfe_documents (id, document, stored_at) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(document)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(id)
}
