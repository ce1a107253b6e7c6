//! Payment handlers
//!
//! Endpoints for the manual bank-transfer flow: starting transactions,
//! submitting proof, and the admin review queue.

use axum::{
    extract::{Path, State},
    Json,
};
use souq_service::{
    BenefitDetailsResponse, MarkPaidRequest, PaginatedResponse, PaymentResponse, PaymentService,
    RejectPaymentRequest, ReviewPaymentRequest, StartFeaturedPaymentRequest,
    StartListingFeePaymentRequest, StartSubscriptionPaymentRequest, StartedPaymentResponse,
    SubmitProofRequest,
};

use crate::extractors::{
    AdminUser, AuthUser, ListingIdPath, OptionalValidatedJson, Pagination, SuperAdminUser,
    TransactionIdPath, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Bank transfer destination details
///
/// GET /payments/benefit-details
pub async fn benefit_details(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<BenefitDetailsResponse>> {
    let service = PaymentService::new(state.service_context());
    Ok(Json(service.benefit_details()))
}

/// Start a listing fee transaction
///
/// POST /payments/listing-fee
pub async fn start_listing_fee(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<StartListingFeePaymentRequest>,
) -> ApiResult<Created<Json<StartedPaymentResponse>>> {
    let service = PaymentService::new(state.service_context());
    let response = service.start_listing_fee(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Start a featured listing transaction
///
/// POST /payments/featured
pub async fn start_featured(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<StartFeaturedPaymentRequest>,
) -> ApiResult<Created<Json<StartedPaymentResponse>>> {
    let service = PaymentService::new(state.service_context());
    let response = service.start_featured(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Start a subscription transaction (showroom accounts only)
///
/// POST /payments/subscription
pub async fn start_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<StartSubscriptionPaymentRequest>,
) -> ApiResult<Created<Json<StartedPaymentResponse>>> {
    let service = PaymentService::new(state.service_context());
    let response = service
        .start_subscription(auth.user_id, auth.role, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Submit transfer proof for a transaction
///
/// POST /payments/{transaction_id}/proof
pub async fn submit_proof(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<TransactionIdPath>,
    ValidatedJson(request): ValidatedJson<SubmitProofRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    let service = PaymentService::new(state.service_context());
    let response = service
        .submit_proof(auth.user_id, path.transaction_id()?, request)
        .await?;
    Ok(Json(response))
}

/// Own transaction history
///
/// GET /payments/mine
pub async fn my_payments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PaymentResponse>>> {
    let service = PaymentService::new(state.service_context());
    let response = service.my_payments(auth.user_id).await?;
    Ok(Json(response))
}

/// Transactions attached to an own listing
///
/// GET /listings/{listing_id}/payments
pub async fn listing_payments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ListingIdPath>,
) -> ApiResult<Json<Vec<PaymentResponse>>> {
    let service = PaymentService::new(state.service_context());
    let response = service
        .listing_payments(auth.user_id, path.listing_id()?)
        .await?;
    Ok(Json(response))
}

/// Transactions with submitted proof awaiting review
///
/// GET /payments/review-queue
pub async fn review_queue(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<Vec<PaymentResponse>>> {
    let service = PaymentService::new(state.service_context());
    let response = service.review_queue().await?;
    Ok(Json(response))
}

/// All transactions, paginated
///
/// GET /payments
pub async fn all_payments(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Pagination(page): Pagination,
) -> ApiResult<Json<PaginatedResponse<PaymentResponse>>> {
    let service = PaymentService::new(state.service_context());
    let response = service.all_payments(page).await?;
    Ok(Json(response))
}

/// Approve a transaction and apply what it bought
///
/// POST /payments/{transaction_id}/approve
pub async fn approve_payment(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(path): Path<TransactionIdPath>,
    OptionalValidatedJson(request): OptionalValidatedJson<ReviewPaymentRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    let service = PaymentService::new(state.service_context());
    let response = service
        .approve_payment(
            admin.user_id,
            path.transaction_id()?,
            request.unwrap_or_default(),
        )
        .await?;
    Ok(Json(response))
}

/// Reject a transaction with a note for the payer
///
/// POST /payments/{transaction_id}/reject
pub async fn reject_payment(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(path): Path<TransactionIdPath>,
    ValidatedJson(request): ValidatedJson<RejectPaymentRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    let service = PaymentService::new(state.service_context());
    let response = service
        .reject_payment(admin.user_id, path.transaction_id()?, request)
        .await?;
    Ok(Json(response))
}

/// Force a transaction to PAID without applying side effects
///
/// POST /payments/{transaction_id}/mark-paid
pub async fn mark_paid(
    State(state): State<AppState>,
    SuperAdminUser(admin): SuperAdminUser,
    Path(path): Path<TransactionIdPath>,
    OptionalValidatedJson(request): OptionalValidatedJson<MarkPaidRequest>,
) -> ApiResult<Json<PaymentResponse>> {
    let service = PaymentService::new(state.service_context());
    let response = service
        .mark_paid(
            admin.user_id,
            path.transaction_id()?,
            request.unwrap_or_default(),
        )
        .await?;
    Ok(Json(response))
}
