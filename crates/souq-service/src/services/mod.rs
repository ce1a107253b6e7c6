//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod error;
pub mod listing;
pub mod moderation;
pub mod notification;
pub mod payment;
pub mod subscription;
pub mod sweeper;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use listing::ListingService;
pub use moderation::ModerationService;
pub use notification::{LogPushSender, NotificationService, PushSender};
pub use payment::PaymentService;
pub use subscription::SubscriptionService;
pub use sweeper::{SweepReport, SweeperService};
