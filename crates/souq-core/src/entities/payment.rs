//! Payment transaction entity and the approval side-effect sum type
//!
//! A transaction tracks one money-movement intent through the manual Benefit
//! bank-transfer flow. The approval side effect is dispatched on
//! [`PaymentKind`], built from fields captured at initiation time, so a
//! package edited after initiation never changes an already-initiated grant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// What the money is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    ListingFee,
    FeaturedListing,
    Subscription,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListingFee => "LISTING_FEE",
            Self::FeaturedListing => "FEATURED_LISTING",
            Self::Subscription => "SUBSCRIPTION",
        }
    }
}

impl std::str::FromStr for PaymentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LISTING_FEE" => Ok(Self::ListingFee),
            "FEATURED_LISTING" => Ok(Self::FeaturedListing),
            "SUBSCRIPTION" => Ok(Self::Subscription),
            _ => Err(()),
        }
    }
}

/// Transaction lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    PendingProof,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::PendingProof => "PENDING_PROOF",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
            Self::Refunded => "REFUNDED",
        }
    }

    /// Terminal statuses admit no further transitions (except PAID → REFUNDED)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed | Self::Refunded)
    }

    /// Still counts against the one-open-transaction-per-listing rule
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::PendingProof)
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PENDING_PROOF" => Ok(Self::PendingProof),
            "PAID" => Ok(Self::Paid),
            "FAILED" => Ok(Self::Failed),
            "REFUNDED" => Ok(Self::Refunded),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One money-movement intent through the Benefit transfer flow
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentTransaction {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub listing_id: Option<Snowflake>,
    pub package_id: Option<Snowflake>,
    pub payment_type: PaymentType,
    /// Amount in fils
    pub amount_fils: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub proof_image_url: Option<String>,
    pub provider: String,
    pub provider_ref: Option<String>,
    pub reviewed_by: Option<Snowflake>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub admin_note: Option<String>,
    /// Initiation-time snapshot (package name, duration, ...)
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tagged approval side effect, one variant per payment type
///
/// Built exhaustively from the transaction's stored references and metadata;
/// adding a new payment type forces a new variant and a new match arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentKind {
    /// Fee gating car-listing submission; no side effect beyond PAID status
    ListingFee { listing_id: Snowflake },
    /// Paid placement boost, duration captured at initiation
    FeaturedListing {
        listing_id: Snowflake,
        duration_days: i64,
    },
    /// Merchant subscription purchase, duration captured at initiation
    Subscription {
        package_id: Snowflake,
        duration_days: i64,
    },
}

impl PaymentTransaction {
    /// Default featured-placement duration when the initiation snapshot is
    /// missing one (matches the original product behavior)
    pub const DEFAULT_FEATURED_DAYS: i64 = 7;

    /// Default subscription window in days
    pub const DEFAULT_SUBSCRIPTION_DAYS: i64 = 30;

    fn metadata_duration_days(&self) -> Option<i64> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("duration_days"))
            .and_then(JsonValue::as_i64)
    }

    /// Resolve the tagged side-effect descriptor for this transaction
    pub fn kind(&self) -> Result<PaymentKind, DomainError> {
        match self.payment_type {
            PaymentType::ListingFee => {
                let listing_id = self
                    .listing_id
                    .ok_or_else(|| DomainError::corrupt_transaction(self.id, "missing listing"))?;
                Ok(PaymentKind::ListingFee { listing_id })
            }
            PaymentType::FeaturedListing => {
                let listing_id = self
                    .listing_id
                    .ok_or_else(|| DomainError::corrupt_transaction(self.id, "missing listing"))?;
                Ok(PaymentKind::FeaturedListing {
                    listing_id,
                    duration_days: self
                        .metadata_duration_days()
                        .unwrap_or(Self::DEFAULT_FEATURED_DAYS),
                })
            }
            PaymentType::Subscription => {
                let package_id = self
                    .package_id
                    .ok_or_else(|| DomainError::corrupt_transaction(self.id, "missing package"))?;
                Ok(PaymentKind::Subscription {
                    package_id,
                    duration_days: self
                        .metadata_duration_days()
                        .unwrap_or(Self::DEFAULT_SUBSCRIPTION_DAYS),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transaction(payment_type: PaymentType) -> PaymentTransaction {
        let now = Utc::now();
        PaymentTransaction {
            id: Snowflake::new(10),
            user_id: Snowflake::new(20),
            listing_id: Some(Snowflake::new(30)),
            package_id: Some(Snowflake::new(40)),
            payment_type,
            amount_fils: 3000,
            currency: "BHD".to_string(),
            status: PaymentStatus::Pending,
            proof_image_url: None,
            provider: "benefit".to_string(),
            provider_ref: None,
            reviewed_by: None,
            reviewed_at: None,
            paid_at: None,
            admin_note: None,
            metadata: Some(json!({ "duration_days": 14 })),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_featured_kind_reads_stored_duration() {
        let tx = transaction(PaymentType::FeaturedListing);
        assert_eq!(
            tx.kind().unwrap(),
            PaymentKind::FeaturedListing {
                listing_id: Snowflake::new(30),
                duration_days: 14,
            }
        );
    }

    #[test]
    fn test_featured_kind_falls_back_to_default_duration() {
        let mut tx = transaction(PaymentType::FeaturedListing);
        tx.metadata = None;
        let PaymentKind::FeaturedListing { duration_days, .. } = tx.kind().unwrap() else {
            panic!("wrong kind");
        };
        assert_eq!(duration_days, PaymentTransaction::DEFAULT_FEATURED_DAYS);
    }

    #[test]
    fn test_subscription_kind_requires_package() {
        let mut tx = transaction(PaymentType::Subscription);
        tx.package_id = None;
        assert!(tx.kind().is_err());
    }

    #[test]
    fn test_open_and_terminal_statuses() {
        assert!(PaymentStatus::Pending.is_open());
        assert!(PaymentStatus::PendingProof.is_open());
        assert!(!PaymentStatus::Paid.is_open());
        assert!(PaymentStatus::Paid.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
        assert!(PaymentStatus::Refunded.is_terminal());
        assert!(!PaymentStatus::Pending.is_terminal());
    }
}
