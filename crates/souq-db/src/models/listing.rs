//! Listing database models

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for listings table
#[derive(Debug, Clone, FromRow)]
pub struct ListingModel {
    pub id: i64,
    pub owner_id: i64,
    /// Role of the owner at creation time: PostgreSQL enum stored as string
    pub owner_type: String,
    /// Listing category: PostgreSQL enum stored as string
    pub listing_type: String,
    pub title: String,
    pub description: Option<String>,
    pub price_fils: i64,
    pub currency: String,
    pub location_governorate: Option<String>,
    pub location_area: Option<String>,
    pub contact_preference: String,
    /// Lifecycle status: PostgreSQL enum stored as string
    pub status: String,
    pub rejection_reason: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
    pub featured_until: Option<DateTime<Utc>>,
    pub views_count: i64,
    pub favorites_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for listing_details table
///
/// Type-specific attributes are kept as one tagged JSON document per listing;
/// the tag discriminates car/motorcycle/plate/part payloads.
#[derive(Debug, Clone, FromRow)]
pub struct ListingDetailsModel {
    pub listing_id: i64,
    pub details: JsonValue,
}
