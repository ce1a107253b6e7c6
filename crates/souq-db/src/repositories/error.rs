//! Error handling utilities for repositories

use souq_core::error::DomainError;
use souq_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Returns true when the error is a unique-constraint violation
pub fn is_unique_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

/// Create a "listing not found" error
pub fn listing_not_found(id: Snowflake) -> DomainError {
    DomainError::ListingNotFound(id)
}

/// Create a "transaction not found" error
pub fn transaction_not_found(id: Snowflake) -> DomainError {
    DomainError::TransactionNotFound(id)
}

/// Create a "package not found" error
pub fn package_not_found(id: Snowflake) -> DomainError {
    DomainError::PackageNotFound(id)
}

/// Create a "notification not found" error
pub fn notification_not_found(id: Snowflake) -> DomainError {
    DomainError::NotificationNotFound(id)
}
