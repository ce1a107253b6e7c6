//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
///
/// Accounts are managed by the auth frontend; this side only reads them.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub phone: Option<String>,
    /// Account role: PostgreSQL enum stored as string
    pub role: String,
    pub is_active: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}
