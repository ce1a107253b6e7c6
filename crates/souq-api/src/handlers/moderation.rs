//! Moderation handlers
//!
//! Admin-only endpoints for the review queue, approve/reject decisions,
//! queue statistics, and reviewer activity.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use souq_service::{
    AuditEntryResponse, ListingResponse, ModerationQueueQuery, ModerationService,
    ModerationStatsResponse, PaginatedResponse, RejectListingRequest, ReviewListingResponse,
};

use crate::extractors::{AdminUser, ListingIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// List pending listings in FIFO order
///
/// GET /moderation/queue
pub async fn pending_listings(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<ModerationQueueQuery>,
) -> ApiResult<Json<PaginatedResponse<ListingResponse>>> {
    let service = ModerationService::new(state.service_context());
    let response = service.pending_listings(query).await?;
    Ok(Json(response))
}

/// Full review view of one listing with owner context
///
/// GET /moderation/listings/{listing_id}
pub async fn listing_for_review(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<ReviewListingResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.listing_for_review(path.listing_id()?).await?;
    Ok(Json(response))
}

/// Approve a pending listing
///
/// POST /moderation/listings/{listing_id}/approve
pub async fn approve_listing(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<ListingResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service
        .approve_listing(admin.user_id, path.listing_id()?)
        .await?;
    Ok(Json(response))
}

/// Reject a pending listing with a reason
///
/// POST /moderation/listings/{listing_id}/reject
pub async fn reject_listing(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(path): Path<ListingIdPath>,
    ValidatedJson(request): ValidatedJson<RejectListingRequest>,
) -> ApiResult<Json<ListingResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service
        .reject_listing(admin.user_id, path.listing_id()?, request)
        .await?;
    Ok(Json(response))
}

/// Moderation queue statistics
///
/// GET /moderation/stats
pub async fn stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<ModerationStatsResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.stats().await?;
    Ok(Json(response))
}

/// Recent review decisions by the calling admin
///
/// GET /moderation/activity
pub async fn recent_activity(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> ApiResult<Json<Vec<AuditEntryResponse>>> {
    let service = ModerationService::new(state.service_context());
    let response = service.recent_activity(admin.user_id).await?;
    Ok(Json(response))
}
