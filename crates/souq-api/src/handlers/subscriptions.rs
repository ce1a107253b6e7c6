//! Subscription and package handlers
//!
//! Endpoints for the posting gate, the caller's subscription, public
//! package catalogs, and admin package management.

use axum::{
    extract::{Path, State},
    Json,
};
use souq_service::{
    CreatePackageRequest, FeaturedPackageResponse, MessageResponse, PackageResponse,
    PostingGateResponse, SubscriptionResponse, SubscriptionService, UpdatePackageRequest,
};

use crate::extractors::{AdminUser, AuthUser, PackageIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Check whether the caller may post a new listing
///
/// GET /subscriptions/gate
pub async fn posting_gate(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<PostingGateResponse>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.posting_gate(auth.user_id, auth.role).await?;
    Ok(Json(response))
}

/// Current subscription with package details
///
/// GET /subscriptions/@me
pub async fn my_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SubscriptionResponse>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.my_subscription(auth.user_id).await?;
    Ok(Json(response))
}

/// Active subscription packages (public catalog)
///
/// GET /packages
pub async fn catalog(State(state): State<AppState>) -> ApiResult<Json<Vec<PackageResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.catalog().await?;
    Ok(Json(response))
}

/// Active featured-listing packages (public catalog)
///
/// GET /packages/featured
pub async fn featured_catalog(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<FeaturedPackageResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.featured_catalog().await?;
    Ok(Json(response))
}

/// All subscription packages including inactive ones
///
/// GET /admin/packages
pub async fn list_packages(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<Vec<PackageResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.list_packages().await?;
    Ok(Json(response))
}

/// Create a subscription package
///
/// POST /admin/packages
pub async fn create_package(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreatePackageRequest>,
) -> ApiResult<Created<Json<PackageResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.create_package(request).await?;
    Ok(Created(Json(response)))
}

/// Partially update a subscription package
///
/// PATCH /admin/packages/{package_id}
pub async fn update_package(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(path): Path<PackageIdPath>,
    ValidatedJson(request): ValidatedJson<UpdatePackageRequest>,
) -> ApiResult<Json<PackageResponse>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.update_package(path.package_id()?, request).await?;
    Ok(Json(response))
}

/// Delete a package, or deactivate it if it still has subscribers
///
/// DELETE /admin/packages/{package_id}
pub async fn delete_package(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(path): Path<PackageIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = SubscriptionService::new(state.service_context());
    let message = service.delete_package(path.package_id()?).await?;
    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}
