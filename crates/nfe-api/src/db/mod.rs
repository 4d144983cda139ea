//! # Database Persistence Layer
//!
//! Postgres persistence for issuance results via SQLx.
//!
//! The layer is **optional**. When `DATABASE_URL` is set, every successful
//! issuance response is stored verbatim in the `nfe_documents` table by a
//! detached task. When absent, the gateway runs without persistence and
//! every other operation behaves identically.
//!
//! Nothing here sits on a request path: a slow or failing database changes
//! log output, never a response.

pub mod invoices;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (persistence disabled).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set; issuance persistence disabled. \
                 Provider responses will not be stored."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    // Run embedded migrations.
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
