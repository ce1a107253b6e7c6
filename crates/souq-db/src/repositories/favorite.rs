//! PostgreSQL implementation of FavoriteRepository
//!
//! The favorites_count column on listings is maintained in the same
//! transaction as the favorites row, so the counter can never drift.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use souq_core::entities::Listing;
use souq_core::traits::{FavoriteRepository, Page, RepoResult};
use souq_core::value_objects::Snowflake;

use crate::models::ListingModel;

use super::error::{is_unique_violation, map_db_error};

/// PostgreSQL implementation of FavoriteRepository
#[derive(Clone)]
pub struct PgFavoriteRepository {
    pool: PgPool,
}

impl PgFavoriteRepository {
    /// Create a new PgFavoriteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    #[instrument(skip(self))]
    async fn add(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let insert = sqlx::query(
            r"
            INSERT INTO favorites (user_id, listing_id, created_at)
            VALUES ($1, $2, NOW())
            ",
        )
        .bind(user_id.into_inner())
        .bind(listing_id.into_inner())
        .execute(&mut *tx)
        .await;

        match insert {
            Ok(_) => {}
            // Already favorited: idempotent no-op, counter untouched
            Err(e) if is_unique_violation(&e) => {
                tx.rollback().await.map_err(map_db_error)?;
                return Ok(false);
            }
            Err(e) => return Err(map_db_error(e)),
        }

        sqlx::query(
            r"
            UPDATE listings
            SET favorites_count = favorites_count + 1
            WHERE id = $1
            ",
        )
        .bind(listing_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(true)
    }

    #[instrument(skip(self))]
    async fn remove(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = sqlx::query(
            r"
            DELETE FROM favorites
            WHERE user_id = $1 AND listing_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(listing_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(false);
        }

        sqlx::query(
            r"
            UPDATE listings
            SET favorites_count = GREATEST(favorites_count - 1, 0)
            WHERE id = $1
            ",
        )
        .bind(listing_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(true)
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND listing_id = $2)
            ",
        )
        .bind(user_id.into_inner())
        .bind(listing_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn find_listings(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM favorites WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let models = sqlx::query_as::<_, ListingModel>(
            r"
            SELECT l.id, l.owner_id, l.owner_type, l.listing_type, l.title, l.description,
                   l.price_fils, l.currency, l.location_governorate, l.location_area,
                   l.contact_preference, l.status, l.rejection_reason, l.posted_at,
                   l.approved_at, l.rejected_at, l.is_featured, l.featured_until,
                   l.views_count, l.favorites_count, l.created_at, l.updated_at
            FROM favorites f
            JOIN listings l ON l.id = f.listing_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((models.into_iter().map(Listing::from).collect(), total))
    }
}
