//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use souq_core::entities::{ListingDetails, ListingStatus, ListingType};
use souq_core::traits::Page;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Simple message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Paginated response with page-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: Page, total: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(page, total),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: Page, total: i64) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total,
            total_pages: (total + page.limit - 1) / page.limit,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: bool,
}

impl ReadinessResponse {
    pub fn new(database: bool) -> Self {
        Self {
            ready: database,
            database,
        }
    }
}

// ============================================================================
// Listing Responses
// ============================================================================

/// One media item on a listing
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub id: String,
    pub media_type: String,
    pub url: String,
    pub sort_order: i32,
}

/// Full listing response, including the detail record and media
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub id: String,
    pub owner_id: String,
    pub owner_type: String,
    pub listing_type: ListingType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in fils
    pub price_fils: i64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_governorate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_area: Option<String>,
    pub contact_preference: String,
    pub status: ListingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Derived from `posted_at` plus the listing lifetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_until: Option<DateTime<Utc>>,
    pub views_count: i64,
    pub favorites_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ListingDetails>,
    pub media: Vec<MediaResponse>,
}

/// Listing owner summary shown to moderators
#[derive(Debug, Serialize)]
pub struct OwnerSummaryResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: String,
    pub total_listings: i64,
    pub approved_listings: i64,
}

/// Moderation review view: the listing plus its owner's track record
#[derive(Debug, Serialize)]
pub struct ReviewListingResponse {
    pub listing: ListingResponse,
    pub owner: OwnerSummaryResponse,
}

/// Whether the caller has favorited a listing
#[derive(Debug, Serialize)]
pub struct FavoriteStatusResponse {
    pub favorited: bool,
}

// ============================================================================
// Moderation Responses
// ============================================================================

/// Pending count for one listing type
#[derive(Debug, Serialize)]
pub struct PendingTypeCount {
    pub listing_type: ListingType,
    pub count: i64,
}

/// Moderation dashboard counters
#[derive(Debug, Serialize)]
pub struct ModerationStatsResponse {
    pub pending_total: i64,
    pub approved_today: i64,
    pub rejected_today: i64,
    pub pending_by_type: Vec<PendingTypeCount>,
}

/// One audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntryResponse {
    pub id: String,
    pub actor_id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Payment Responses
// ============================================================================

/// One payment transaction
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    pub payment_type: String,
    /// Amount in fils
    pub amount_fils: i64,
    pub currency: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_image_url: Option<String>,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The marketplace's Benefit transfer coordinates
#[derive(Debug, Serialize)]
pub struct BenefitDetailsResponse {
    pub iban: String,
    pub account_name: String,
}

/// Manual bank-transfer instructions shown to the payer
#[derive(Debug, Serialize)]
pub struct BankTransferInstructions {
    pub iban: String,
    pub account_name: String,
    /// Amount to transfer, in fils
    pub amount_fils: i64,
    pub currency: String,
    /// Reference the payer must quote: the transaction id
    pub reference: String,
}

/// Initiated transaction plus how to pay it
#[derive(Debug, Serialize)]
pub struct StartedPaymentResponse {
    pub payment: PaymentResponse,
    pub instructions: BankTransferInstructions,
}

// ============================================================================
// Subscription Responses
// ============================================================================

/// Subscription package catalog entry
#[derive(Debug, Serialize)]
pub struct PackageResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Monthly price in fils
    pub price_monthly_fils: i64,
    pub max_listings: i32,
    pub duration_days: i32,
    pub sort_order: i32,
    pub is_active: bool,
}

/// Featured placement catalog entry
#[derive(Debug, Serialize)]
pub struct FeaturedPackageResponse {
    pub id: String,
    pub name: String,
    /// Price in fils
    pub price_fils: i64,
    pub duration_days: i32,
    pub is_active: bool,
}

/// A merchant's subscription state
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub package_id: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub listings_used: i32,
    /// Paid amount in fils
    pub paid_amount_fils: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageResponse>,
}

/// Whether a merchant may submit another listing, and why not
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PostingGateResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PostingGateResponse {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

// ============================================================================
// Notification Responses
// ============================================================================

/// One in-app notification
#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub notification_type: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
    pub is_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Unread notification counter
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_rounds_up() {
        let meta = PaginationMeta::new(Page::new(1, 20), 41);
        assert_eq!(meta.total_pages, 3);

        let meta = PaginationMeta::new(Page::new(2, 20), 40);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.page, 2);
    }

    #[test]
    fn test_posting_gate_serializes_without_null_reason() {
        let gate = PostingGateResponse::allowed();
        let json = serde_json::to_value(&gate).unwrap();
        assert_eq!(json, serde_json::json!({ "allowed": true }));

        let gate = PostingGateResponse::denied("No active subscription");
        let json = serde_json::to_value(&gate).unwrap();
        assert_eq!(json["reason"], "No active subscription");
    }
}
