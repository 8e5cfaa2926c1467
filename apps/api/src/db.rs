use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the document tables if they do not exist yet. Idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applicants (
            id UUID PRIMARY KEY,
            resume_url TEXT NOT NULL,
            analysis_result JSONB NOT NULL,
            uploaded_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS scraped_candidates (
            id UUID PRIMARY KEY,
            collection TEXT NOT NULL,
            profile JSONB NOT NULL,
            scraped_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS scraped_candidates_collection_idx ON scraped_candidates (collection)",
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}
