//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AdminUser, AuthUser, OptionalAuthUser, SuperAdminUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{ListingIdPath, NotificationIdPath, PackageIdPath, TransactionIdPath};
pub use validated::{OptionalValidatedJson, ValidatedJson};
