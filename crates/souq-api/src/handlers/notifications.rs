//! Notification handlers
//!
//! Endpoints for the caller's notification inbox.

use axum::{
    extract::{Path, State},
    Json,
};
use souq_service::{
    NotificationResponse, NotificationService, PaginatedResponse, UnreadCountResponse,
};

use crate::extractors::{AuthUser, NotificationIdPath, Pagination};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List own notifications, newest first
///
/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.list(auth.user_id, page).await?;
    Ok(Json(response))
}

/// Count of unread notifications
///
/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.unread_count(auth.user_id).await?;
    Ok(Json(response))
}

/// Mark one notification as read
///
/// POST /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<NotificationIdPath>,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service
        .mark_read(auth.user_id, path.notification_id()?)
        .await?;
    Ok(NoContent)
}

/// Mark all own notifications as read
///
/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_all_read(auth.user_id).await?;
    Ok(NoContent)
}
