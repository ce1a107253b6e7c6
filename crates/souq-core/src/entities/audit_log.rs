//! Audit log entry - append-only record of admin actions
//!
//! Entries are written once and never mutated; they are the sole source of
//! moderation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::value_objects::Snowflake;

/// Admin action tag recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    ListingApproved,
    ListingRejected,
    PaymentApproved,
    PaymentRejected,
    PaymentMarkedPaid,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListingApproved => "LISTING_APPROVED",
            Self::ListingRejected => "LISTING_REJECTED",
            Self::PaymentApproved => "PAYMENT_APPROVED",
            Self::PaymentRejected => "PAYMENT_REJECTED",
            Self::PaymentMarkedPaid => "PAYMENT_MARKED_PAID",
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LISTING_APPROVED" => Ok(Self::ListingApproved),
            "LISTING_REJECTED" => Ok(Self::ListingRejected),
            "PAYMENT_APPROVED" => Ok(Self::PaymentApproved),
            "PAYMENT_REJECTED" => Ok(Self::PaymentRejected),
            "PAYMENT_MARKED_PAID" => Ok(Self::PaymentMarkedPaid),
            _ => Err(()),
        }
    }
}

/// One admin action with before/after snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub id: Snowflake,
    pub actor_id: Snowflake,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: Snowflake,
    pub before: Option<JsonValue>,
    pub after: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Build an entry for a state change on an entity
    pub fn new(
        id: Snowflake,
        actor_id: Snowflake,
        action: AuditAction,
        entity_type: impl Into<String>,
        entity_id: Snowflake,
        before: JsonValue,
        after: JsonValue,
    ) -> Self {
        Self {
            id,
            actor_id,
            action,
            entity_type: entity_type.into(),
            entity_id,
            before: Some(before),
            after: Some(after),
            created_at: Utc::now(),
        }
    }
}
