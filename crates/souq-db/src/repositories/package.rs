//! PostgreSQL implementation of PackageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use souq_core::entities::{FeaturedPackage, SubscriptionPackage};
use souq_core::traits::{PackageRepository, RepoResult};
use souq_core::value_objects::Snowflake;

use crate::models::{FeaturedPackageModel, SubscriptionPackageModel};

use super::error::{map_db_error, package_not_found};

const PACKAGE_COLUMNS: &str = r"id, name, description, price_monthly_fils, max_listings,
       duration_days, sort_order, is_active, created_at, updated_at";

/// PostgreSQL implementation of PackageRepository
#[derive(Clone)]
pub struct PgPackageRepository {
    pool: PgPool,
}

impl PgPackageRepository {
    /// Create a new PgPackageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackageRepository for PgPackageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SubscriptionPackage>> {
        let result = sqlx::query_as::<_, SubscriptionPackageModel>(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM subscription_packages WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SubscriptionPackage::from))
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<SubscriptionPackage>> {
        let models = sqlx::query_as::<_, SubscriptionPackageModel>(&format!(
            r"
            SELECT {PACKAGE_COLUMNS}
            FROM subscription_packages
            WHERE is_active = TRUE
            ORDER BY sort_order ASC, id ASC
            "
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(SubscriptionPackage::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<SubscriptionPackage>> {
        let models = sqlx::query_as::<_, SubscriptionPackageModel>(&format!(
            r"
            SELECT {PACKAGE_COLUMNS}
            FROM subscription_packages
            ORDER BY sort_order ASC, id ASC
            "
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(SubscriptionPackage::from).collect())
    }

    #[instrument(skip(self, package))]
    async fn create(&self, package: &SubscriptionPackage) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO subscription_packages (id, name, description, price_monthly_fils,
                                               max_listings, duration_days, sort_order,
                                               is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(package.id.into_inner())
        .bind(&package.name)
        .bind(package.description.as_deref())
        .bind(package.price_monthly_fils)
        .bind(package.max_listings)
        .bind(package.duration_days)
        .bind(package.sort_order)
        .bind(package.is_active)
        .bind(package.created_at)
        .bind(package.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, package))]
    async fn update(&self, package: &SubscriptionPackage) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE subscription_packages
            SET name = $2, description = $3, price_monthly_fils = $4, max_listings = $5,
                duration_days = $6, sort_order = $7, is_active = $8, updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(package.id.into_inner())
        .bind(&package.name)
        .bind(package.description.as_deref())
        .bind(package.price_monthly_fils)
        .bind(package.max_listings)
        .bind(package.duration_days)
        .bind(package.sort_order)
        .bind(package.is_active)
        .bind(package.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(package_not_found(package.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn subscriber_count(&self, id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM subscriptions WHERE package_id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM subscription_packages WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(package_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_featured_by_id(&self, id: Snowflake) -> RepoResult<Option<FeaturedPackage>> {
        let result = sqlx::query_as::<_, FeaturedPackageModel>(
            r"
            SELECT id, name, price_fils, duration_days, is_active, created_at, updated_at
            FROM featured_packages
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FeaturedPackage::from))
    }

    #[instrument(skip(self))]
    async fn find_active_featured(&self) -> RepoResult<Vec<FeaturedPackage>> {
        let models = sqlx::query_as::<_, FeaturedPackageModel>(
            r"
            SELECT id, name, price_fils, duration_days, is_active, created_at, updated_at
            FROM featured_packages
            WHERE is_active = TRUE
            ORDER BY price_fils ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(FeaturedPackage::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPackageRepository>();
    }
}
