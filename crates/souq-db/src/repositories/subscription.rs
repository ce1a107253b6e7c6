//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use souq_core::entities::Subscription;
use souq_core::traits::{RepoResult, SubscriptionRepository};
use souq_core::value_objects::Snowflake;

use crate::models::SubscriptionModel;

use super::error::map_db_error;

const SUBSCRIPTION_COLUMNS: &str = r"user_id, package_id, status, start_date, end_date,
       listings_used, paid_amount_fils, created_at, updated_at";

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Subscription>> {
        let result = sqlx::query_as::<_, SubscriptionModel>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE user_id = $1"
        ))
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Subscription::from))
    }

    #[instrument(skip(self, subscription))]
    async fn upsert(&self, subscription: &Subscription) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO subscriptions (user_id, package_id, status, start_date, end_date,
                                       listings_used, paid_amount_fils, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE
            SET package_id = EXCLUDED.package_id,
                status = EXCLUDED.status,
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                listings_used = EXCLUDED.listings_used,
                paid_amount_fils = EXCLUDED.paid_amount_fils,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(subscription.user_id.into_inner())
        .bind(subscription.package_id.into_inner())
        .bind(subscription.status.as_str())
        .bind(subscription.start_date)
        .bind(subscription.end_date)
        .bind(subscription.listings_used)
        .bind(subscription.paid_amount_fils)
        .bind(subscription.created_at)
        .bind(subscription.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn consume_slot(&self, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool> {
        // Single statement, so the quota check and the increment cannot race
        let result = sqlx::query(
            r"
            UPDATE subscriptions s
            SET listings_used = s.listings_used + 1, updated_at = $2
            FROM subscription_packages p
            WHERE s.user_id = $1
              AND p.id = s.package_id
              AND s.status = 'ACTIVE'
              AND s.end_date > $2
              AND s.listings_used < p.max_listings
            ",
        )
        .bind(user_id.into_inner())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn expire_ended(&self, now: DateTime<Utc>) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE subscriptions
            SET status = 'EXPIRED', updated_at = $1
            WHERE status = 'ACTIVE' AND end_date <= $1
            RETURNING user_id
            ",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn find_ending_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepoResult<Vec<Subscription>> {
        let models = sqlx::query_as::<_, SubscriptionModel>(&format!(
            r"
            SELECT {SUBSCRIPTION_COLUMNS}
            FROM subscriptions
            WHERE status = 'ACTIVE' AND end_date BETWEEN $1 AND $2
            ORDER BY end_date ASC
            "
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Subscription::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSubscriptionRepository>();
    }
}
