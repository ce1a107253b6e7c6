//! In-app notifications
//!
//! Rows are written by the core; push delivery is fire-and-forget through an
//! external sender. Scheduler warnings carry a `dedup_key` so the same-day
//! duplicate guard is a unique constraint, not a read-then-write check.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::value_objects::Snowflake;

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    System,
    ListingSubmitted,
    ListingApproved,
    ListingRejected,
    ListingExpiryWarning,
    PaymentProofSubmitted,
    PaymentApproved,
    PaymentRejected,
    SubscriptionActivated,
    SubscriptionExpired,
    SubscriptionExpiryWarning,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::ListingSubmitted => "LISTING_SUBMITTED",
            Self::ListingApproved => "LISTING_APPROVED",
            Self::ListingRejected => "LISTING_REJECTED",
            Self::ListingExpiryWarning => "LISTING_EXPIRY_WARNING",
            Self::PaymentProofSubmitted => "PAYMENT_PROOF_SUBMITTED",
            Self::PaymentApproved => "PAYMENT_APPROVED",
            Self::PaymentRejected => "PAYMENT_REJECTED",
            Self::SubscriptionActivated => "SUBSCRIPTION_ACTIVATED",
            Self::SubscriptionExpired => "SUBSCRIPTION_EXPIRED",
            Self::SubscriptionExpiryWarning => "SUBSCRIPTION_EXPIRY_WARNING",
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SYSTEM" => Ok(Self::System),
            "LISTING_SUBMITTED" => Ok(Self::ListingSubmitted),
            "LISTING_APPROVED" => Ok(Self::ListingApproved),
            "LISTING_REJECTED" => Ok(Self::ListingRejected),
            "LISTING_EXPIRY_WARNING" => Ok(Self::ListingExpiryWarning),
            "PAYMENT_PROOF_SUBMITTED" => Ok(Self::PaymentProofSubmitted),
            "PAYMENT_APPROVED" => Ok(Self::PaymentApproved),
            "PAYMENT_REJECTED" => Ok(Self::PaymentRejected),
            "SUBSCRIPTION_ACTIVATED" => Ok(Self::SubscriptionActivated),
            "SUBSCRIPTION_EXPIRED" => Ok(Self::SubscriptionExpired),
            "SUBSCRIPTION_EXPIRY_WARNING" => Ok(Self::SubscriptionExpiryWarning),
            _ => Err(()),
        }
    }
}

/// One delivered notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    pub metadata: Option<JsonValue>,
    /// Unique per (warning target, day); None for ordinary notifications
    pub dedup_key: Option<String>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Day-bucketed dedup key for scheduler warnings
    ///
    /// The unique index on this column makes the once-per-day guard
    /// race-proof even if two sweeps run concurrently.
    pub fn warning_dedup_key(
        notification_type: NotificationType,
        entity_id: Snowflake,
        day: NaiveDate,
    ) -> String {
        format!("{}:{}:{}", notification_type.as_str(), entity_id, day)
    }
}
