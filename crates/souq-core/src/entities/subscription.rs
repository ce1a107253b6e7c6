//! Merchant subscriptions and the admin-managed package catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Subscription lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    Expired,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(()),
        }
    }
}

/// One active-or-historical subscription per merchant (1:1 with user)
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub user_id: Snowflake,
    pub package_id: Snowflake,
    pub status: SubscriptionStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub listings_used: i32,
    /// Amount paid in fils
    pub paid_amount_fils: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Usable for posting: ACTIVE and not past its window
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && self.end_date > now
    }
}

/// Admin-managed merchant subscription tier
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPackage {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    /// Monthly price in fils
    pub price_monthly_fils: i64,
    pub max_listings: i32,
    pub duration_days: i32,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin-managed featured-placement tier
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedPackage {
    pub id: Snowflake,
    pub name: String,
    /// Price in fils
    pub price_fils: i64,
    pub duration_days: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_usable_requires_active_and_unexpired() {
        let now = Utc::now();
        let mut sub = Subscription {
            user_id: Snowflake::new(1),
            package_id: Snowflake::new(2),
            status: SubscriptionStatus::Active,
            start_date: now - Duration::days(10),
            end_date: now + Duration::days(20),
            listings_used: 0,
            paid_amount_fils: 10_000,
            created_at: now,
            updated_at: now,
        };
        assert!(sub.is_usable(now));

        sub.end_date = now - Duration::days(1);
        assert!(!sub.is_usable(now));

        sub.end_date = now + Duration::days(20);
        sub.status = SubscriptionStatus::Expired;
        assert!(!sub.is_usable(now));
    }
}
