//! Audit log database model

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// Database model for audit_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    pub actor_id: i64,
    /// Audit action type: PostgreSQL enum stored as string
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    /// Snapshot before the change
    pub before: Option<JsonValue>,
    /// Snapshot after the change
    pub after: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}
