//! Notification database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub user_id: i64,
    /// Notification kind: PostgreSQL enum stored as string
    pub notification_type: String,
    pub title: String,
    pub body: String,
    pub metadata: Option<JsonValue>,
    /// Unique where present; backs the once-per-day warning guard
    pub dedup_key: Option<String>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
