//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Snowflake IDs arrive as strings and are parsed at the
//! service boundary.

use serde::Deserialize;
use validator::Validate;

use souq_core::entities::ListingType;

// ============================================================================
// Listing Requests
// ============================================================================

/// Create listing request (always lands as a DRAFT)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateListingRequest {
    pub listing_type: ListingType,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    /// Asking price in fils (1 BHD = 1000 fils)
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_fils: i64,

    #[validate(length(max = 100))]
    pub location_governorate: Option<String>,

    #[validate(length(max = 100))]
    pub location_area: Option<String>,

    /// CALL, WHATSAPP, or CHAT
    #[validate(length(max = 20))]
    pub contact_preference: Option<String>,
}

/// Update listing request (partial update; only provided fields change)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_fils: Option<i64>,

    #[validate(length(max = 100))]
    pub location_governorate: Option<String>,

    #[validate(length(max = 100))]
    pub location_area: Option<String>,

    #[validate(length(max = 20))]
    pub contact_preference: Option<String>,
}

/// Reorder a listing's media by id
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderMediaRequest {
    #[validate(length(min = 1, message = "At least one media id is required"))]
    pub media_ids: Vec<String>,
}

/// Reject listing request (moderation)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RejectListingRequest {
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Rejection reason must be 10-1000 characters"
    ))]
    pub reason: String,
}

// ============================================================================
// Payment Requests
// ============================================================================

/// Start a LISTING_FEE transaction for a listing
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartListingFeePaymentRequest {
    pub listing_id: String,
}

/// Start a FEATURED_LISTING transaction for a listing
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartFeaturedPaymentRequest {
    pub listing_id: String,
    pub package_id: String,
}

/// Start a SUBSCRIPTION transaction for a package
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartSubscriptionPaymentRequest {
    pub package_id: String,
}

/// Attach a transfer receipt to a pending transaction
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitProofRequest {
    #[validate(url(message = "Proof image must be a valid URL"))]
    pub proof_image_url: String,
}

/// Approve a reviewed transaction, with an optional note
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct ReviewPaymentRequest {
    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub admin_note: Option<String>,
}

/// Reject a reviewed transaction; the note is relayed to the payer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RejectPaymentRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "A rejection note is required"
    ))]
    pub admin_note: String,
}

/// Super-admin override marking a transaction paid out of band
#[derive(Debug, Clone, Deserialize, Validate, Default)]
pub struct MarkPaidRequest {
    #[validate(length(max = 200))]
    pub provider_ref: Option<String>,
}

// ============================================================================
// Package Requests
// ============================================================================

/// Create subscription package request (admin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePackageRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Monthly price in fils
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_monthly_fils: i64,

    #[validate(range(min = 1, message = "Quota must be at least 1"))]
    pub max_listings: i32,

    #[validate(range(min = 1, message = "Duration must be at least 1 day"))]
    pub duration_days: i32,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Update subscription package request (admin, partial)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePackageRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_monthly_fils: Option<i64>,

    #[validate(range(min = 1, message = "Quota must be at least 1"))]
    pub max_listings: Option<i32>,

    #[validate(range(min = 1, message = "Duration must be at least 1 day"))]
    pub duration_days: Option<i32>,

    pub sort_order: Option<i32>,

    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Plain page/limit query
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Owner listing query: status filter plus pagination
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListingQuery {
    pub status: Option<String>,
    pub listing_type: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Moderation queue query
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ModerationQueueQuery {
    pub listing_type: Option<String>,
    pub owner_type: Option<String>,
    /// ISO-8601 lower bound on submission time
    pub submitted_from: Option<chrono::DateTime<chrono::Utc>>,
    /// ISO-8601 upper bound on submission time
    pub submitted_to: Option<chrono::DateTime<chrono::Utc>>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
