use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::models::applicant::ApplicantRecord;
use crate::storage::{RecordStore, StorageError};

/// Record store over PostgreSQL JSONB columns. Shares the process-wide pool.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert_applicant(&self, record: &ApplicantRecord) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO applicants (id, resume_url, analysis_result, uploaded_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(&record.resume_url)
        .bind(&record.analysis_result)
        .bind(record.uploaded_at)
        .execute(&self.pool)
        .await?;

        info!("Stored applicant record {id}");
        Ok(id)
    }

    async fn insert_candidates(
        &self,
        collection: &str,
        candidates: &[Value],
    ) -> Result<u64, StorageError> {
        if candidates.is_empty() {
            return Ok(0);
        }

        // One multi-row statement: either every profile lands or none does.
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO scraped_candidates (id, collection, profile) ");
        builder.push_values(candidates, |mut row, profile| {
            row.push_bind(Uuid::new_v4())
                .push_bind(collection)
                .push_bind(profile);
        });

        let result = builder.build().execute(&self.pool).await?;
        info!(
            "Stored {} candidate profiles in collection '{collection}'",
            result.rows_affected()
        );
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}
