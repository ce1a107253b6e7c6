//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in souq-core.
//! Each repository handles database operations for a specific domain entity.

mod audit_log;
mod error;
mod favorite;
mod listing;
mod media;
mod notification;
mod package;
mod payment;
mod subscription;
mod user;

pub use audit_log::PgAuditLogRepository;
pub use favorite::PgFavoriteRepository;
pub use listing::PgListingRepository;
pub use media::PgMediaRepository;
pub use notification::PgNotificationRepository;
pub use package::PgPackageRepository;
pub use payment::PgPaymentRepository;
pub use subscription::PgSubscriptionRepository;
pub use user::PgUserRepository;
