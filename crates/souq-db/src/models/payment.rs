//! Payment transaction database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for payment_transactions table
#[derive(Debug, Clone, FromRow)]
pub struct PaymentModel {
    pub id: i64,
    pub user_id: i64,
    pub listing_id: Option<i64>,
    pub package_id: Option<i64>,
    /// Payment purpose: PostgreSQL enum stored as string
    pub payment_type: String,
    pub amount_fils: i64,
    pub currency: String,
    /// Transaction state: PostgreSQL enum stored as string
    pub status: String,
    pub proof_image_url: Option<String>,
    pub provider: String,
    pub provider_ref: Option<String>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub admin_note: Option<String>,
    /// Initiation-time snapshot (package name, duration, ...)
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
