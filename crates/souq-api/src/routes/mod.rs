//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{routing::{delete, get, patch, post, put}, Router};

use crate::handlers::{health, listings, moderation, notifications, payments, subscriptions};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(listing_routes())
        .merge(moderation_routes())
        .merge(payment_routes())
        .merge(subscription_routes())
        .merge(notification_routes())
}

/// Listing lifecycle, media, and favorite routes
fn listing_routes() -> Router<AppState> {
    Router::new()
        // Listing CRUD
        .route("/listings", post(listings::create_listing))
        .route("/listings/mine", get(listings::my_listings))
        .route("/listings/mine/:listing_id", get(listings::my_listing))
        .route("/listings/:listing_id", get(listings::get_public_listing))
        .route("/listings/:listing_id", patch(listings::update_listing))
        .route("/listings/:listing_id", delete(listings::archive_listing))
        .route("/listings/:listing_id/details", put(listings::upsert_details))
        // Lifecycle transitions
        .route("/listings/:listing_id/submit", post(listings::submit_listing))
        .route("/listings/:listing_id/sold", post(listings::mark_sold))
        // Media
        .route("/listings/:listing_id/media", get(listings::listing_media))
        .route("/listings/:listing_id/media/order", put(listings::reorder_media))
        // Favorites
        .route("/listings/:listing_id/favorite", put(listings::add_favorite))
        .route("/listings/:listing_id/favorite", delete(listings::remove_favorite))
        .route("/listings/:listing_id/favorite", get(listings::favorite_status))
        .route("/users/@me/favorites", get(listings::my_favorites))
}

/// Moderation routes (admin only)
fn moderation_routes() -> Router<AppState> {
    Router::new()
        .route("/moderation/queue", get(moderation::pending_listings))
        .route("/moderation/listings/:listing_id", get(moderation::listing_for_review))
        .route("/moderation/listings/:listing_id/approve", post(moderation::approve_listing))
        .route("/moderation/listings/:listing_id/reject", post(moderation::reject_listing))
        .route("/moderation/stats", get(moderation::stats))
        .route("/moderation/activity", get(moderation::recent_activity))
}

/// Payment routes
fn payment_routes() -> Router<AppState> {
    Router::new()
        // Payer-facing
        .route("/payments/benefit-details", get(payments::benefit_details))
        .route("/payments/listing-fee", post(payments::start_listing_fee))
        .route("/payments/featured", post(payments::start_featured))
        .route("/payments/subscription", post(payments::start_subscription))
        .route("/payments/mine", get(payments::my_payments))
        .route("/payments/:transaction_id/proof", post(payments::submit_proof))
        .route("/listings/:listing_id/payments", get(payments::listing_payments))
        // Admin review
        .route("/payments", get(payments::all_payments))
        .route("/payments/review-queue", get(payments::review_queue))
        .route("/payments/:transaction_id/approve", post(payments::approve_payment))
        .route("/payments/:transaction_id/reject", post(payments::reject_payment))
        .route("/payments/:transaction_id/mark-paid", post(payments::mark_paid))
}

/// Subscription and package routes
fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/subscriptions/gate", get(subscriptions::posting_gate))
        .route("/subscriptions/@me", get(subscriptions::my_subscription))
        .route("/packages", get(subscriptions::catalog))
        .route("/packages/featured", get(subscriptions::featured_catalog))
        // Admin package management
        .route("/admin/packages", get(subscriptions::list_packages))
        .route("/admin/packages", post(subscriptions::create_package))
        .route("/admin/packages/:package_id", patch(subscriptions::update_package))
        .route("/admin/packages/:package_id", delete(subscriptions::delete_package))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route("/notifications/:notification_id/read", post(notifications::mark_read))
}
