//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod listings;
pub mod moderation;
pub mod notifications;
pub mod payments;
pub mod subscriptions;
