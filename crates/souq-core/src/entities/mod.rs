//! Domain entities - core business objects

mod audit_log;
mod details;
mod listing;
mod media;
mod notification;
mod payment;
mod subscription;
mod user;

pub use audit_log::{AuditAction, AuditLogEntry};
pub use details::{CarDetails, ListingDetails, MotorcycleDetails, PartDetails, PlateDetails};
pub use listing::{Listing, ListingStatus, ListingType};
pub use media::{MediaItem, MediaType};
pub use notification::{Notification, NotificationType};
pub use payment::{PaymentKind, PaymentStatus, PaymentTransaction, PaymentType};
pub use subscription::{
    FeaturedPackage, Subscription, SubscriptionPackage, SubscriptionStatus,
};
pub use user::{User, UserRole};
