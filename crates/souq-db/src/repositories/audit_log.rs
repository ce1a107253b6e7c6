//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use souq_core::entities::{AuditAction, AuditLogEntry};
use souq_core::traits::{AuditLogRepository, RepoResult};
use souq_core::value_objects::Snowflake;

use crate::models::AuditLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AuditLogRepository
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new PgAuditLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry))]
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO audit_logs (id, actor_id, action, entity_type, entity_id,
                                    before, after, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.actor_id.into_inner())
        .bind(entry.action.as_str())
        .bind(&entry.entity_type)
        .bind(entry.entity_id.into_inner())
        .bind(entry.before.as_ref())
        .bind(entry.after.as_ref())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, actions))]
    async fn find_by_actor(
        &self,
        actor_id: Snowflake,
        actions: &[AuditAction],
        limit: i64,
    ) -> RepoResult<Vec<AuditLogEntry>> {
        let action_strs: Vec<String> = actions
            .iter()
            .map(|a| a.as_str().to_string())
            .collect();

        let models = sqlx::query_as::<_, AuditLogModel>(
            r"
            SELECT id, actor_id, action, entity_type, entity_id, before, after, created_at
            FROM audit_logs
            WHERE actor_id = $1 AND action = ANY($2)
            ORDER BY created_at DESC
            LIMIT $3
            ",
        )
        .bind(actor_id.into_inner())
        .bind(action_strs)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(AuditLogEntry::from).collect())
    }
}
