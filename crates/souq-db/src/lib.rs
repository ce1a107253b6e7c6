//! # souq-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `souq-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use souq_db::pool::{create_pool, DatabaseConfig};
//! use souq_db::repositories::PgListingRepository;
//! use souq_core::traits::ListingRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let listing_repo = PgListingRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_lazy_pool, create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAuditLogRepository, PgFavoriteRepository, PgListingRepository, PgMediaRepository,
    PgNotificationRepository, PgPackageRepository, PgPaymentRepository, PgSubscriptionRepository,
    PgUserRepository,
};
