//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use souq_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with listing_id
#[derive(Debug, serde::Deserialize)]
pub struct ListingIdPath {
    pub listing_id: String,
}

impl ListingIdPath {
    /// Parse listing_id as Snowflake
    pub fn listing_id(&self) -> Result<Snowflake, ApiError> {
        self.listing_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid listing_id format"))
    }
}

/// Path parameters with transaction_id
#[derive(Debug, serde::Deserialize)]
pub struct TransactionIdPath {
    pub transaction_id: String,
}

impl TransactionIdPath {
    /// Parse transaction_id as Snowflake
    pub fn transaction_id(&self) -> Result<Snowflake, ApiError> {
        self.transaction_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid transaction_id format"))
    }
}

/// Path parameters with package_id
#[derive(Debug, serde::Deserialize)]
pub struct PackageIdPath {
    pub package_id: String,
}

impl PackageIdPath {
    /// Parse package_id as Snowflake
    pub fn package_id(&self) -> Result<Snowflake, ApiError> {
        self.package_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid package_id format"))
    }
}

/// Path parameters with notification_id
#[derive(Debug, serde::Deserialize)]
pub struct NotificationIdPath {
    pub notification_id: String,
}

impl NotificationIdPath {
    /// Parse notification_id as Snowflake
    pub fn notification_id(&self) -> Result<Snowflake, ApiError> {
        self.notification_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid notification_id format"))
    }
}
