//! # souq-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    ListingService, LogPushSender, ModerationService, NotificationService, PaymentService,
    PushSender, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SubscriptionService,
    SweepReport, SweeperService,
};
