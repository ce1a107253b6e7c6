//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audit_log;
mod listing;
mod media;
mod notification;
mod payment;
mod subscription;
mod user;

pub use audit_log::AuditLogModel;
pub use listing::{ListingDetailsModel, ListingModel};
pub use media::MediaModel;
pub use notification::NotificationModel;
pub use payment::PaymentModel;
pub use subscription::{FeaturedPackageModel, SubscriptionModel, SubscriptionPackageModel};
pub use user::UserModel;
