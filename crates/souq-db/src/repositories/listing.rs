//! PostgreSQL implementation of ListingRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::instrument;

use souq_core::entities::{Listing, ListingType};
use souq_core::traits::{ListingFilter, ListingRepository, ModerationCounts, Page, RepoResult};
use souq_core::value_objects::Snowflake;

use crate::models::ListingModel;

use super::error::{listing_not_found, map_db_error};

const LISTING_COLUMNS: &str = r"id, owner_id, owner_type, listing_type, title, description,
       price_fils, currency, location_governorate, location_area, contact_preference,
       status, rejection_reason, posted_at, approved_at, rejected_at,
       is_featured, featured_until, views_count, favorites_count, created_at, updated_at";

/// PostgreSQL implementation of ListingRepository
#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    /// Create a new PgListingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ListingFilter) {
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(listing_type) = filter.listing_type {
            builder
                .push(" AND listing_type = ")
                .push_bind(listing_type.as_str());
        }
        if let Some(owner_type) = filter.owner_type {
            builder
                .push(" AND owner_type = ")
                .push_bind(owner_type.as_str());
        }
        if let Some(from) = filter.submitted_from {
            builder.push(" AND updated_at >= ").push_bind(from);
        }
        if let Some(to) = filter.submitted_to {
            builder.push(" AND updated_at <= ").push_bind(to);
        }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Listing>> {
        let result = sqlx::query_as::<_, ListingModel>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Listing::from))
    }

    #[instrument(skip(self, listing))]
    async fn create(&self, listing: &Listing) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO listings (id, owner_id, owner_type, listing_type, title, description,
                                  price_fils, currency, location_governorate, location_area,
                                  contact_preference, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(listing.id.into_inner())
        .bind(listing.owner_id.into_inner())
        .bind(listing.owner_type.as_str())
        .bind(listing.listing_type.as_str())
        .bind(&listing.title)
        .bind(listing.description.as_deref())
        .bind(listing.price_fils)
        .bind(&listing.currency)
        .bind(listing.location_governorate.as_deref())
        .bind(listing.location_area.as_deref())
        .bind(&listing.contact_preference)
        .bind(listing.status.as_str())
        .bind(listing.created_at)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, listing))]
    async fn update(&self, listing: &Listing) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE listings
            SET title = $2, description = $3, price_fils = $4, currency = $5,
                location_governorate = $6, location_area = $7, contact_preference = $8,
                status = $9, rejection_reason = $10, posted_at = $11, approved_at = $12,
                rejected_at = $13, is_featured = $14, featured_until = $15, updated_at = $16
            WHERE id = $1
            ",
        )
        .bind(listing.id.into_inner())
        .bind(&listing.title)
        .bind(listing.description.as_deref())
        .bind(listing.price_fils)
        .bind(&listing.currency)
        .bind(listing.location_governorate.as_deref())
        .bind(listing.location_area.as_deref())
        .bind(&listing.contact_preference)
        .bind(listing.status.as_str())
        .bind(listing.rejection_reason.as_deref())
        .bind(listing.posted_at)
        .bind(listing.approved_at)
        .bind(listing.rejected_at)
        .bind(listing.is_featured)
        .bind(listing.featured_until)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(listing_not_found(listing.id));
        }

        Ok(())
    }

    #[instrument(skip(self, filter))]
    async fn find_by_owner(
        &self,
        owner_id: Snowflake,
        filter: &ListingFilter,
        page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)> {
        let mut count_builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM listings WHERE owner_id = ");
        count_builder.push_bind(owner_id.into_inner());
        Self::push_filter(&mut count_builder, filter);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE owner_id = "
        ));
        builder.push_bind(owner_id.into_inner());
        Self::push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY updated_at DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let models: Vec<ListingModel> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok((models.into_iter().map(Listing::from).collect(), total))
    }

    #[instrument(skip(self, filter))]
    async fn find_pending(
        &self,
        filter: &ListingFilter,
        page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)> {
        let mut count_builder = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM listings WHERE status = 'PENDING_REVIEW'",
        );
        Self::push_filter(&mut count_builder, filter);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        // Oldest submission first, so no listing waits forever
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE status = 'PENDING_REVIEW'"
        ));
        Self::push_filter(&mut builder, filter);
        builder
            .push(" ORDER BY updated_at ASC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset());

        let models: Vec<ListingModel> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok((models.into_iter().map(Listing::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn owner_counts(&self, owner_id: Snowflake) -> RepoResult<(i64, i64)> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'APPROVED') AS approved
            FROM listings
            WHERE owner_id = $1
            ",
        )
        .bind(owner_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((row.get::<i64, _>("total"), row.get::<i64, _>("approved")))
    }

    #[instrument(skip(self))]
    async fn moderation_counts(&self, today_start: DateTime<Utc>) -> RepoResult<ModerationCounts> {
        let row = sqlx::query(
            r"
            SELECT COUNT(*) FILTER (WHERE status = 'PENDING_REVIEW') AS pending_total,
                   COUNT(*) FILTER (WHERE status = 'APPROVED' AND approved_at >= $1) AS approved_today,
                   COUNT(*) FILTER (WHERE status = 'REJECTED' AND rejected_at >= $1) AS rejected_today
            FROM listings
            ",
        )
        .bind(today_start)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let by_type_rows = sqlx::query(
            r"
            SELECT listing_type, COUNT(*) AS cnt
            FROM listings
            WHERE status = 'PENDING_REVIEW'
            GROUP BY listing_type
            ORDER BY listing_type
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let pending_by_type = by_type_rows
            .into_iter()
            .filter_map(|r| {
                let type_str: String = r.get("listing_type");
                type_str
                    .parse::<ListingType>()
                    .ok()
                    .map(|t| (t, r.get::<i64, _>("cnt")))
            })
            .collect();

        Ok(ModerationCounts {
            pending_total: row.get("pending_total"),
            approved_today: row.get("approved_today"),
            rejected_today: row.get("rejected_today"),
            pending_by_type,
        })
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE listings
            SET views_count = views_count + 1
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(listing_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn expire_posted_before(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE listings
            SET status = 'EXPIRED', updated_at = NOW()
            WHERE status = 'APPROVED'
              AND posted_at IS NOT NULL
              AND posted_at <= $1
            ",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn find_approved_posted_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepoResult<Vec<Listing>> {
        let models = sqlx::query_as::<_, ListingModel>(&format!(
            r"
            SELECT {LISTING_COLUMNS}
            FROM listings
            WHERE status = 'APPROVED'
              AND posted_at IS NOT NULL
              AND posted_at BETWEEN $1 AND $2
            ORDER BY posted_at ASC
            "
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Listing::from).collect())
    }
}
