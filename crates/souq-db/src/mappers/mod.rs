//! Entity to model mappers
//!
//! This module provides conversions between domain entities (souq-core) and
//! database models. Enum columns are stored as strings; unknown values fall
//! back to a safe default rather than failing the whole row.

mod audit_log;
mod listing;
mod media;
mod notification;
mod payment;
mod subscription;
mod user;

pub use listing::details_from_model;
