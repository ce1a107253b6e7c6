//! # souq-core
//!
//! Domain layer containing entities, value objects, and repository traits for
//! the marketplace. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AuditAction, AuditLogEntry, CarDetails, FeaturedPackage, Listing, ListingDetails,
    ListingStatus, ListingType, MediaItem, MediaType, MotorcycleDetails, Notification,
    NotificationType, PartDetails, PaymentKind, PaymentStatus, PaymentTransaction, PaymentType,
    PlateDetails, Subscription, SubscriptionPackage, SubscriptionStatus, User, UserRole,
};
pub use error::DomainError;
pub use traits::{
    AuditLogRepository, FavoriteRepository, ListingFilter, ListingRepository, MediaRepository,
    NotificationRepository, PackageRepository, Page, PaymentRepository, RepoResult,
    SubscriptionRepository, UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
