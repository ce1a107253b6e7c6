//! Listing handlers
//!
//! Endpoints for the owner-facing listing lifecycle, media ordering,
//! public detail views, and favorites.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use souq_core::ListingDetails;
use souq_service::{
    CreateListingRequest, FavoriteStatusResponse, ListingQuery, ListingResponse, ListingService,
    MediaResponse, PaginatedResponse, ReorderMediaRequest, UpdateListingRequest,
};

use crate::extractors::{AuthUser, ListingIdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a draft listing
///
/// POST /listings
pub async fn create_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateListingRequest>,
) -> ApiResult<Created<Json<ListingResponse>>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .create_listing(auth.user_id, auth.role, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List own listings with status filter
///
/// GET /listings/mine
pub async fn my_listings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Json<PaginatedResponse<ListingResponse>>> {
    let service = ListingService::new(state.service_context());
    let response = service.my_listings(auth.user_id, query).await?;
    Ok(Json(response))
}

/// Get an own listing regardless of status
///
/// GET /listings/mine/{listing_id}
pub async fn my_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<ListingResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service.my_listing(auth.user_id, path.listing_id()?).await?;
    Ok(Json(response))
}

/// Get a publicly visible listing (no auth required)
///
/// GET /listings/{listing_id}
pub async fn get_public_listing(
    State(state): State<AppState>,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<ListingResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service.get_public_listing(path.listing_id()?).await?;
    Ok(Json(response))
}

/// Update base listing fields
///
/// PATCH /listings/{listing_id}
pub async fn update_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateListingRequest>,
) -> ApiResult<Json<ListingResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .update_listing(auth.user_id, path.listing_id()?, request)
        .await?;
    Ok(Json(response))
}

/// Replace the type-specific detail record
///
/// PUT /listings/{listing_id}/details
pub async fn upsert_details(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
    Json(details): Json<ListingDetails>,
) -> ApiResult<Json<ListingResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .upsert_details(auth.user_id, path.listing_id()?, details)
        .await?;
    Ok(Json(response))
}

/// Submit a listing for moderation review
///
/// POST /listings/{listing_id}/submit
pub async fn submit_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<ListingResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .submit_listing(auth.user_id, auth.role, path.listing_id()?)
        .await?;
    Ok(Json(response))
}

/// Mark an approved listing as sold
///
/// POST /listings/{listing_id}/sold
pub async fn mark_sold(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<ListingResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service.mark_sold(auth.user_id, path.listing_id()?).await?;
    Ok(Json(response))
}

/// Archive (soft-delete) an own listing
///
/// DELETE /listings/{listing_id}
pub async fn archive_listing(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<NoContent> {
    let service = ListingService::new(state.service_context());
    service
        .archive_listing(auth.user_id, path.listing_id()?)
        .await?;
    Ok(NoContent)
}

/// Get media for an own listing
///
/// GET /listings/{listing_id}/media
pub async fn listing_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<Vec<MediaResponse>>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .listing_media(auth.user_id, path.listing_id()?)
        .await?;
    Ok(Json(response))
}

/// Reorder media on an own listing
///
/// PUT /listings/{listing_id}/media/order
pub async fn reorder_media(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
    ValidatedJson(request): ValidatedJson<ReorderMediaRequest>,
) -> ApiResult<Json<Vec<MediaResponse>>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .reorder_media(auth.user_id, path.listing_id()?, request)
        .await?;
    Ok(Json(response))
}

/// Favorite a public listing
///
/// PUT /listings/{listing_id}/favorite
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<FavoriteStatusResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .add_favorite(auth.user_id, path.listing_id()?)
        .await?;
    Ok(Json(response))
}

/// Remove a favorite
///
/// DELETE /listings/{listing_id}/favorite
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<FavoriteStatusResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .remove_favorite(auth.user_id, path.listing_id()?)
        .await?;
    Ok(Json(response))
}

/// Check favorite status for a listing
///
/// GET /listings/{listing_id}/favorite
pub async fn favorite_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<FavoriteStatusResponse>> {
    let service = ListingService::new(state.service_context());
    let response = service
        .favorite_status(auth.user_id, path.listing_id()?)
        .await?;
    Ok(Json(response))
}

/// List own favorited listings
///
/// GET /users/@me/favorites
pub async fn my_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<ListingResponse>>> {
    let service = ListingService::new(state.service_context());
    let response = service.my_favorites(auth.user_id, page).await?;
    Ok(Json(response))
}
