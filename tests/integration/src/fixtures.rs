//! Test fixtures and data generators
//!
//! Accounts are owned by the auth frontend in production, so tests seed
//! user rows (and other upstream data) directly through the pool.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use souq_core::{Snowflake, SnowflakeGenerator, UserRole};
use souq_db::PgPool;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// ID generator reserved for fixture rows
pub fn test_id() -> Snowflake {
    // Worker 1023 keeps fixture IDs clear of server-generated ones
    SnowflakeGenerator::new(1023).generate()
}

/// Seed a user row and return its ID
pub async fn seed_user(pool: &PgPool, role: UserRole) -> Result<Snowflake> {
    let id = test_id();
    let email = format!("test{}@example.com", unique_suffix());

    sqlx::query(
        r"
        INSERT INTO users (id, email, phone, role, is_active, is_banned, created_at)
        VALUES ($1, $2, NULL, $3, TRUE, FALSE, NOW())
        ",
    )
    .bind(id.into_inner())
    .bind(email)
    .bind(role.as_str())
    .execute(pool)
    .await?;

    Ok(id)
}

/// Seed `count` image rows on a listing (uploads are an external concern)
pub async fn seed_images(pool: &PgPool, listing_id: Snowflake, count: i32) -> Result<()> {
    for sort_order in 0..count {
        sqlx::query(
            r"
            INSERT INTO listing_media (id, listing_id, media_type, url, public_id, sort_order, created_at)
            VALUES ($1, $2, 'IMAGE', $3, NULL, $4, NOW())
            ",
        )
        .bind(test_id().into_inner())
        .bind(listing_id.into_inner())
        .bind(format!("https://cdn.example.com/test/{}.jpg", unique_suffix()))
        .bind(sort_order)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Seed an active featured-listing package and return its ID
pub async fn seed_featured_package(pool: &PgPool, price_fils: i64) -> Result<Snowflake> {
    let id = test_id();

    sqlx::query(
        r"
        INSERT INTO featured_packages (id, name, price_fils, duration_days, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, 7, TRUE, NOW(), NOW())
        ",
    )
    .bind(id.into_inner())
    .bind(format!("Featured {}", unique_suffix()))
    .bind(price_fils)
    .execute(pool)
    .await?;

    Ok(id)
}

// ============================================================================
// Request bodies
// ============================================================================

/// Create listing request body
#[derive(Debug, Serialize)]
pub struct CreateListingBody {
    pub listing_type: &'static str,
    pub title: String,
    pub description: Option<String>,
    pub price_fils: i64,
    pub location_governorate: Option<String>,
}

impl CreateListingBody {
    /// A car draft complete enough to pass the submission checklist
    /// (once details and images are attached)
    pub fn car() -> Self {
        Self {
            listing_type: "CAR",
            title: format!("Test Car {}", unique_suffix()),
            description: Some("Clean, single owner".to_string()),
            price_fils: 4_500_000,
            location_governorate: Some("Capital".to_string()),
        }
    }

    /// A bare draft that should fail the submission checklist
    pub fn bare() -> Self {
        Self {
            listing_type: "CAR",
            title: format!("Car {}", unique_suffix()),
            description: None,
            price_fils: 0,
            location_governorate: None,
        }
    }
}

/// Car detail body matching the tagged detail record format
pub fn car_details_body() -> serde_json::Value {
    serde_json::json!({
        "kind": "CAR",
        "make": "Toyota",
        "model": "Corolla",
        "year": 2021,
        "trim": null,
        "mileage_km": 45000,
        "transmission": "AUTOMATIC",
        "fuel": "PETROL",
        "condition": "USED",
        "color": "White",
        "vin": null,
        "body_type": null,
        "engine_size": null,
        "specs": null
    })
}

// ============================================================================
// Response bodies
// ============================================================================

/// Listing response
#[derive(Debug, Deserialize)]
pub struct ListingBody {
    pub id: String,
    pub status: String,
    pub title: String,
    pub price_fils: i64,
    pub views_count: i64,
    pub is_featured: bool,
}

/// Payment response
#[derive(Debug, Deserialize)]
pub struct PaymentBody {
    pub id: String,
    pub payment_type: String,
    pub status: String,
    pub amount_fils: i64,
}

/// Started payment response with transfer instructions
#[derive(Debug, Deserialize)]
pub struct StartedPaymentBody {
    pub payment: PaymentBody,
    pub instructions: InstructionsBody,
}

/// Bank transfer instructions
#[derive(Debug, Deserialize)]
pub struct InstructionsBody {
    pub iban: String,
    pub account_name: String,
    pub amount_fils: i64,
    pub currency: String,
    pub reference: String,
}

/// Posting gate response
#[derive(Debug, Deserialize)]
pub struct GateBody {
    pub allowed: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Favorite status response
#[derive(Debug, Deserialize)]
pub struct FavoriteBody {
    pub favorited: bool,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
