//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Listing not found: {0}")]
    ListingNotFound(Snowflake),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(Snowflake),

    #[error("Package not found: {0}")]
    PackageNotFound(Snowflake),

    #[error("Subscription not found for user: {0}")]
    SubscriptionNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Listing validation failed")]
    ListingIncomplete { errors: Vec<String> },

    #[error("This listing is not a {expected} listing")]
    DetailTypeMismatch { expected: &'static str },

    #[error("Rejection reason must be at least {min} characters")]
    RejectionReasonTooShort { min: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("You can only manage your own listings")]
    NotListingOwner,

    #[error("Not your transaction")]
    NotTransactionPayer,

    #[error("Admin role required")]
    AdminRequired,

    #[error("Super-admin role required")]
    SuperAdminRequired,

    #[error("Only showroom accounts can subscribe to packages")]
    NotShowroomAccount,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Can only edit draft, rejected, or approved listings")]
    ListingNotEditable,

    #[error("Listing cannot be submitted in current status")]
    ListingNotSubmittable,

    #[error("Listing is not pending review")]
    ListingNotPendingReview,

    #[error("Only approved listings can be marked as sold")]
    ListingNotApproved,

    #[error("Payment already submitted for this listing")]
    PaymentAlreadyOpen,

    #[error("Transaction already paid")]
    AlreadyPaid,

    #[error("Proof already submitted, awaiting admin review")]
    ProofAlreadySubmitted,

    #[error("Transaction is not awaiting review")]
    NotAwaitingReview,

    #[error("You already have an active subscription")]
    SubscriptionStillActive,

    #[error("{0}")]
    MerchantCannotPost(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ListingNotFound(_) => "UNKNOWN_LISTING",
            Self::TransactionNotFound(_) => "UNKNOWN_TRANSACTION",
            Self::PackageNotFound(_) => "UNKNOWN_PACKAGE",
            Self::SubscriptionNotFound(_) => "UNKNOWN_SUBSCRIPTION",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ListingIncomplete { .. } => "LISTING_INCOMPLETE",
            Self::DetailTypeMismatch { .. } => "DETAIL_TYPE_MISMATCH",
            Self::RejectionReasonTooShort { .. } => "REJECTION_REASON_TOO_SHORT",

            // Authorization
            Self::NotListingOwner => "NOT_LISTING_OWNER",
            Self::NotTransactionPayer => "NOT_TRANSACTION_PAYER",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::SuperAdminRequired => "SUPER_ADMIN_REQUIRED",
            Self::NotShowroomAccount => "NOT_SHOWROOM_ACCOUNT",

            // Business Rules
            Self::ListingNotEditable => "LISTING_NOT_EDITABLE",
            Self::ListingNotSubmittable => "LISTING_NOT_SUBMITTABLE",
            Self::ListingNotPendingReview => "LISTING_NOT_PENDING_REVIEW",
            Self::ListingNotApproved => "LISTING_NOT_APPROVED",
            Self::PaymentAlreadyOpen => "PAYMENT_ALREADY_OPEN",
            Self::AlreadyPaid => "ALREADY_PAID",
            Self::ProofAlreadySubmitted => "PROOF_ALREADY_SUBMITTED",
            Self::NotAwaitingReview => "NOT_AWAITING_REVIEW",
            Self::SubscriptionStillActive => "SUBSCRIPTION_STILL_ACTIVE",
            Self::MerchantCannotPost(_) => "MERCHANT_CANNOT_POST",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ListingNotFound(_)
                | Self::TransactionNotFound(_)
                | Self::PackageNotFound(_)
                | Self::SubscriptionNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }

    /// Check if this is a validation or state-guard error
    ///
    /// Double-submission races degrade to these, never to a conflict class;
    /// the API maps them all to 400.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::ListingIncomplete { .. }
                | Self::DetailTypeMismatch { .. }
                | Self::RejectionReasonTooShort { .. }
                | Self::ListingNotEditable
                | Self::ListingNotSubmittable
                | Self::ListingNotPendingReview
                | Self::ListingNotApproved
                | Self::PaymentAlreadyOpen
                | Self::AlreadyPaid
                | Self::ProofAlreadySubmitted
                | Self::NotAwaitingReview
                | Self::SubscriptionStillActive
                | Self::MerchantCannotPost(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotListingOwner
                | Self::NotTransactionPayer
                | Self::AdminRequired
                | Self::SuperAdminRequired
                | Self::NotShowroomAccount
        )
    }

    /// Internal error for a transaction whose stored references are
    /// inconsistent with its payment type
    pub fn corrupt_transaction(id: Snowflake, what: &str) -> Self {
        Self::InternalError(format!("transaction {id} is corrupt: {what}"))
    }
}
