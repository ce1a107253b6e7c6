//! PostgreSQL implementation of MediaRepository
//!
//! Covers both the listing_details document and the listing_media rows.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use souq_core::entities::{ListingDetails, MediaItem};
use souq_core::traits::{MediaRepository, RepoResult};
use souq_core::value_objects::Snowflake;

use crate::mappers::details_from_model;
use crate::models::{ListingDetailsModel, MediaModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MediaRepository
#[derive(Clone)]
pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    /// Create a new PgMediaRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    #[instrument(skip(self))]
    async fn find_details(&self, listing_id: Snowflake) -> RepoResult<Option<ListingDetails>> {
        let result = sqlx::query_as::<_, ListingDetailsModel>(
            r"
            SELECT listing_id, details
            FROM listing_details
            WHERE listing_id = $1
            ",
        )
        .bind(listing_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.and_then(details_from_model))
    }

    #[instrument(skip(self, details))]
    async fn upsert_details(
        &self,
        listing_id: Snowflake,
        details: &ListingDetails,
    ) -> RepoResult<()> {
        let doc = serde_json::to_value(details)
            .map_err(|e| souq_core::DomainError::InternalError(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO listing_details (listing_id, details)
            VALUES ($1, $2)
            ON CONFLICT (listing_id) DO UPDATE SET details = EXCLUDED.details
            ",
        )
        .bind(listing_id.into_inner())
        .bind(doc)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_media(&self, listing_id: Snowflake) -> RepoResult<Vec<MediaItem>> {
        let models = sqlx::query_as::<_, MediaModel>(
            r"
            SELECT id, listing_id, media_type, url, public_id, sort_order, created_at
            FROM listing_media
            WHERE listing_id = $1
            ORDER BY sort_order ASC, created_at ASC
            ",
        )
        .bind(listing_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(MediaItem::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_images(&self, listing_id: Snowflake) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM listing_media
            WHERE listing_id = $1 AND media_type = 'IMAGE'
            ",
        )
        .bind(listing_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self, ordered_ids))]
    async fn reorder_media(
        &self,
        listing_id: Snowflake,
        ordered_ids: &[Snowflake],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for (position, media_id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                r"
                UPDATE listing_media
                SET sort_order = $3
                WHERE id = $1 AND listing_id = $2
                ",
            )
            .bind(media_id.into_inner())
            .bind(listing_id.into_inner())
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
