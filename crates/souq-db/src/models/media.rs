//! Listing media database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for listing_media table
#[derive(Debug, Clone, FromRow)]
pub struct MediaModel {
    pub id: i64,
    pub listing_id: i64,
    /// Media kind: PostgreSQL enum stored as string
    pub media_type: String,
    pub url: String,
    pub public_id: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}
