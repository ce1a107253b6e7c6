//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with the schema applied
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, car_details_body, check_test_env, seed_featured_package,
    seed_images, seed_user, test_config, test_pool, CreateListingBody, ErrorEnvelope,
    FavoriteBody, GateBody, ListingBody, StartedPaymentBody, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;
use souq_core::{Snowflake, UserRole};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_missing_token_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/listings/mine").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server
        .get_auth("/api/v1/listings/mine", "not-a-real-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Listing Lifecycle Tests
// ============================================================================

async fn individual_with_token(server: &TestServer) -> (Snowflake, String) {
    let pool = test_pool().await.unwrap();
    let user_id = seed_user(&pool, UserRole::UserIndividual).await.unwrap();
    let token = server.token_for(user_id, UserRole::UserIndividual).unwrap();
    (user_id, token)
}

async fn admin_with_token(server: &TestServer, role: UserRole) -> (Snowflake, String) {
    let pool = test_pool().await.unwrap();
    let admin_id = seed_user(&pool, role).await.unwrap();
    let token = server.token_for(admin_id, role).unwrap();
    (admin_id, token)
}

/// Create a car draft with details and enough images to pass the checklist
async fn complete_car_draft(server: &TestServer, token: &str) -> ListingBody {
    let response = server
        .post_auth("/api/v1/listings", token, &CreateListingBody::car())
        .await
        .unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_auth(
            &format!("/api/v1/listings/{}/details", listing.id),
            token,
            &car_details_body(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let pool = test_pool().await.unwrap();
    let listing_id: Snowflake = listing.id.parse().unwrap();
    seed_images(&pool, listing_id, 3).await.unwrap();

    listing
}

#[tokio::test]
async fn test_create_draft_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;

    let body = CreateListingBody::car();
    let response = server.post_auth("/api/v1/listings", &token, &body).await.unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(listing.status, "DRAFT");
    assert_eq!(listing.title, body.title);

    // Drafts are not publicly visible
    let response = server
        .get(&format!("/api/v1/listings/{}", listing.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // But the owner can fetch them
    let response = server
        .get_auth(&format!("/api/v1/listings/mine/{}", listing.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_update_draft_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;

    let response = server
        .post_auth("/api/v1/listings", &token, &CreateListingBody::car())
        .await
        .unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/listings/{}", listing.id),
            &token,
            &json!({ "title": "Updated title", "price_fils": 5_000_000 }),
        )
        .await
        .unwrap();
    let updated: ListingBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.title, "Updated title");
    assert_eq!(updated.price_fils, 5_000_000);
    assert_eq!(updated.status, "DRAFT");
}

#[tokio::test]
async fn test_only_owner_can_update() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, owner_token) = individual_with_token(&server).await;
    let (_, other_token) = individual_with_token(&server).await;

    let response = server
        .post_auth("/api/v1/listings", &owner_token, &CreateListingBody::car())
        .await
        .unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/listings/{}", listing.id),
            &other_token,
            &json!({ "title": "Hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_submit_incomplete_reports_all_defects() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;

    let response = server
        .post_auth("/api/v1/listings", &token, &CreateListingBody::bare())
        .await
        .unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &token)
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(envelope.error.code, "LISTING_INCOMPLETE");
    let errors = envelope
        .error
        .details
        .and_then(|d| d.get("errors").cloned())
        .and_then(|e| e.as_array().cloned())
        .expect("defect list missing");
    // Price, details, and images are all missing; every defect is reported
    assert!(errors.len() >= 3, "expected multiple defects, got {errors:?}");
}

#[tokio::test]
async fn test_submit_complete_car() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;
    let listing = complete_car_draft(&server, &token).await;

    let response = server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &token)
        .await
        .unwrap();
    let submitted: ListingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(submitted.status, "PENDING_REVIEW");

    // A pending listing cannot be submitted again
    let response = server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_moderation_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;

    let response = server.get_auth("/api/v1/moderation/queue", &token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_approve_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;
    let (_, admin_token) = admin_with_token(&server, UserRole::Admin).await;

    let listing = complete_car_draft(&server, &token).await;
    let response = server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/moderation/listings/{}/approve", listing.id),
            &admin_token,
        )
        .await
        .unwrap();
    let approved: ListingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(approved.status, "APPROVED");

    // Now publicly visible, and the view counts
    let response = server
        .get(&format!("/api/v1/listings/{}", listing.id))
        .await
        .unwrap();
    let public: ListingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public.status, "APPROVED");
    assert!(public.views_count >= 1);

    // Approving twice is a state-guard failure, not a conflict
    let response = server
        .post_auth_empty(
            &format!("/api/v1/moderation/listings/{}/approve", listing.id),
            &admin_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_reject_listing_and_resubmit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;
    let (_, admin_token) = admin_with_token(&server, UserRole::Admin).await;

    let listing = complete_car_draft(&server, &token).await;
    server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &token)
        .await
        .unwrap();

    // Reasons shorter than 10 characters are refused
    let response = server
        .post_auth(
            &format!("/api/v1/moderation/listings/{}/reject", listing.id),
            &admin_token,
            &json!({ "reason": "too short" }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .post_auth(
            &format!("/api/v1/moderation/listings/{}/reject", listing.id),
            &admin_token,
            &json!({ "reason": "Photos do not match the declared vehicle" }),
        )
        .await
        .unwrap();
    let rejected: ListingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected.status, "REJECTED");

    // A rejected listing can be fixed and resubmitted
    let response = server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &token)
        .await
        .unwrap();
    let resubmitted: ListingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(resubmitted.status, "PENDING_REVIEW");
}

// ============================================================================
// Payment Tests
// ============================================================================

#[tokio::test]
async fn test_listing_fee_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let config = test_config().unwrap();
    let (_, token) = individual_with_token(&server).await;
    let (_, admin_token) = admin_with_token(&server, UserRole::Admin).await;

    let response = server
        .post_auth("/api/v1/listings", &token, &CreateListingBody::car())
        .await
        .unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Start the fee transaction; instructions echo the configured account
    let response = server
        .post_auth(
            "/api/v1/payments/listing-fee",
            &token,
            &json!({ "listing_id": listing.id }),
        )
        .await
        .unwrap();
    let started: StartedPaymentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(started.payment.status, "PENDING");
    assert_eq!(started.payment.payment_type, "LISTING_FEE");
    assert_eq!(started.payment.amount_fils, config.listing_policy.listing_fee_fils);
    assert_eq!(started.instructions.iban, config.benefit.iban);
    assert_eq!(started.instructions.reference, started.payment.id);

    // A second open transaction for the same purchase is refused
    let response = server
        .post_auth(
            "/api/v1/payments/listing-fee",
            &token,
            &json!({ "listing_id": listing.id }),
        )
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "PAYMENT_ALREADY_OPEN");

    // Submit transfer proof
    let response = server
        .post_auth(
            &format!("/api/v1/payments/{}/proof", started.payment.id),
            &token,
            &json!({ "proof_image_url": "https://cdn.example.com/proof.jpg" }),
        )
        .await
        .unwrap();
    let proof: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(proof["status"], "PENDING_PROOF");

    // Review is admin-only
    let response = server
        .post_auth_empty(
            &format!("/api/v1/payments/{}/approve", started.payment.id),
            &token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/payments/{}/approve", started.payment.id),
            &admin_token,
        )
        .await
        .unwrap();
    let paid: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(paid["status"], "PAID");

    // The fee cannot be bought twice
    let response = server
        .post_auth(
            "/api/v1/payments/listing-fee",
            &token,
            &json!({ "listing_id": listing.id }),
        )
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "ALREADY_PAID");
}

#[tokio::test]
async fn test_mark_paid_is_super_admin_only_and_applies_no_grant() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let pool = test_pool().await.unwrap();
    let (_, token) = individual_with_token(&server).await;
    let (_, admin_token) = admin_with_token(&server, UserRole::Admin).await;
    let (_, super_token) = admin_with_token(&server, UserRole::SuperAdmin).await;

    let response = server
        .post_auth("/api/v1/listings", &token, &CreateListingBody::car())
        .await
        .unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let package_id = seed_featured_package(&pool, 2000).await.unwrap();
    let response = server
        .post_auth(
            "/api/v1/payments/featured",
            &token,
            &json!({ "listing_id": listing.id, "package_id": package_id.to_string() }),
        )
        .await
        .unwrap();
    let started: StartedPaymentBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // A regular admin cannot force-mark
    let response = server
        .post_auth_empty(
            &format!("/api/v1/payments/{}/mark-paid", started.payment.id),
            &admin_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/payments/{}/mark-paid", started.payment.id),
            &super_token,
        )
        .await
        .unwrap();
    let marked: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked["status"], "PAID");
    let provider_ref = marked["provider_ref"].as_str().unwrap_or_default();
    assert!(provider_ref.starts_with("MANUAL_"), "got {provider_ref}");

    // Bookkeeping only: the purchased feature placement was not applied
    let response = server
        .get_auth(&format!("/api/v1/listings/mine/{}", listing.id), &token)
        .await
        .unwrap();
    let after: ListingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!after.is_featured);
}

#[tokio::test]
async fn test_featured_approval_applies_placement() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let pool = test_pool().await.unwrap();
    let (_, token) = individual_with_token(&server).await;
    let (_, admin_token) = admin_with_token(&server, UserRole::Admin).await;

    let response = server
        .post_auth("/api/v1/listings", &token, &CreateListingBody::car())
        .await
        .unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    let package_id = seed_featured_package(&pool, 2000).await.unwrap();
    let response = server
        .post_auth(
            "/api/v1/payments/featured",
            &token,
            &json!({ "listing_id": listing.id, "package_id": package_id.to_string() }),
        )
        .await
        .unwrap();
    let started: StartedPaymentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(started.payment.payment_type, "FEATURED_LISTING");
    assert_eq!(started.payment.amount_fils, 2000);

    server
        .post_auth(
            &format!("/api/v1/payments/{}/proof", started.payment.id),
            &token,
            &json!({ "proof_image_url": "https://cdn.example.com/proof.jpg" }),
        )
        .await
        .unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/payments/{}/approve", started.payment.id),
            &admin_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/listings/mine/{}", listing.id), &token)
        .await
        .unwrap();
    let after: ListingBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(after.is_featured);
}

// ============================================================================
// Subscription Gate Tests
// ============================================================================

#[tokio::test]
async fn test_posting_gate_individual_always_allowed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;

    let response = server.get_auth("/api/v1/subscriptions/gate", &token).await.unwrap();
    let gate: GateBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(gate.allowed);
    assert!(gate.reason.is_none());
}

#[tokio::test]
async fn test_showroom_without_subscription_cannot_submit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let pool = test_pool().await.unwrap();
    let merchant_id = seed_user(&pool, UserRole::UserShowroom).await.unwrap();
    let token = server.token_for(merchant_id, UserRole::UserShowroom).unwrap();

    let response = server.get_auth("/api/v1/subscriptions/gate", &token).await.unwrap();
    let gate: GateBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!gate.allowed);
    assert_eq!(gate.reason.as_deref(), Some("No active subscription"));

    // The same reason appears on the submission checklist
    let listing = complete_car_draft(&server, &token).await;
    let response = server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &token)
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "LISTING_INCOMPLETE");
    let errors = envelope
        .error
        .details
        .and_then(|d| d.get("errors").cloned())
        .map(|e| e.to_string())
        .unwrap_or_default();
    assert!(errors.contains("No active subscription"), "got {errors}");
}

#[tokio::test]
async fn test_subscription_purchase_opens_gate() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let pool = test_pool().await.unwrap();
    let merchant_id = seed_user(&pool, UserRole::UserShowroom).await.unwrap();
    let token = server.token_for(merchant_id, UserRole::UserShowroom).unwrap();
    let (_, admin_token) = admin_with_token(&server, UserRole::Admin).await;

    // Admin publishes a package
    let response = server
        .post_auth(
            "/api/v1/admin/packages",
            &admin_token,
            &json!({
                "name": format!("Showroom Basic {}", integration_tests::unique_suffix()),
                "description": "Entry tier",
                "price_monthly_fils": 10_000,
                "max_listings": 5,
                "duration_days": 30
            }),
        )
        .await
        .unwrap();
    let package: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let package_id = package["id"].as_str().unwrap().to_string();

    // Merchant buys it through the manual transfer flow
    let response = server
        .post_auth(
            "/api/v1/payments/subscription",
            &token,
            &json!({ "package_id": package_id }),
        )
        .await
        .unwrap();
    let started: StartedPaymentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(started.payment.payment_type, "SUBSCRIPTION");

    server
        .post_auth(
            &format!("/api/v1/payments/{}/proof", started.payment.id),
            &token,
            &json!({ "proof_image_url": "https://cdn.example.com/proof.jpg" }),
        )
        .await
        .unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/payments/{}/approve", started.payment.id),
            &admin_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The gate now admits the merchant
    let response = server.get_auth("/api/v1/subscriptions/gate", &token).await.unwrap();
    let gate: GateBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(gate.allowed, "gate still denies: {:?}", gate.reason);

    let response = server.get_auth("/api/v1/subscriptions/@me", &token).await.unwrap();
    let subscription: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(subscription["status"], "ACTIVE");
}

// ============================================================================
// Favorites Tests
// ============================================================================

#[tokio::test]
async fn test_favorites_require_public_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, owner_token) = individual_with_token(&server).await;
    let (_, other_token) = individual_with_token(&server).await;

    let response = server
        .post_auth("/api/v1/listings", &owner_token, &CreateListingBody::car())
        .await
        .unwrap();
    let listing: ListingBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Drafts cannot be favorited
    let response = server
        .put_auth_empty(&format!("/api/v1/listings/{}/favorite", listing.id), &other_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_favorite_toggle_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, owner_token) = individual_with_token(&server).await;
    let (_, fan_token) = individual_with_token(&server).await;
    let (_, admin_token) = admin_with_token(&server, UserRole::Admin).await;

    let listing = complete_car_draft(&server, &owner_token).await;
    server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &owner_token)
        .await
        .unwrap();
    server
        .post_auth_empty(
            &format!("/api/v1/moderation/listings/{}/approve", listing.id),
            &admin_token,
        )
        .await
        .unwrap();

    let path = format!("/api/v1/listings/{}/favorite", listing.id);

    let response = server.put_auth_empty(&path, &fan_token).await.unwrap();
    let fav: FavoriteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(fav.favorited);

    // Favoriting twice stays favorited
    let response = server.put_auth_empty(&path, &fan_token).await.unwrap();
    let fav: FavoriteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(fav.favorited);

    let response = server.delete_auth(&path, &fan_token).await.unwrap();
    let fav: FavoriteBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!fav.favorited);
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_rejection_notifies_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, token) = individual_with_token(&server).await;
    let (_, admin_token) = admin_with_token(&server, UserRole::Admin).await;

    let listing = complete_car_draft(&server, &token).await;
    server
        .post_auth_empty(&format!("/api/v1/listings/{}/submit", listing.id), &token)
        .await
        .unwrap();
    server
        .post_auth(
            &format!("/api/v1/moderation/listings/{}/reject", listing.id),
            &admin_token,
            &json!({ "reason": "Photos do not match the declared vehicle" }),
        )
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/notifications/unread-count", &token)
        .await
        .unwrap();
    let count: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(count["count"].as_i64().unwrap_or(0) >= 1);

    let response = server.get_auth("/api/v1/notifications", &token).await.unwrap();
    let page: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let body = page["data"].to_string();
    // The verbatim rejection reason reaches the owner
    assert!(body.contains("Photos do not match the declared vehicle"), "got {body}");

    let response = server
        .post_auth_empty("/api/v1/notifications/read-all", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/api/v1/notifications/unread-count", &token)
        .await
        .unwrap();
    let count: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count["count"].as_i64(), Some(0));
}
