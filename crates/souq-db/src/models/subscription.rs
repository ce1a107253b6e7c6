//! Subscription and package database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for subscriptions table (one row per merchant)
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionModel {
    pub user_id: i64,
    pub package_id: i64,
    /// Subscription state: PostgreSQL enum stored as string
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub listings_used: i32,
    pub paid_amount_fils: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for subscription_packages table
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionPackageModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_monthly_fils: i64,
    pub max_listings: i32,
    pub duration_days: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for featured_packages table
#[derive(Debug, Clone, FromRow)]
pub struct FeaturedPackageModel {
    pub id: i64,
    pub name: String,
    pub price_fils: i64,
    pub duration_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
