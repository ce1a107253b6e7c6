//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateListingRequest, CreatePackageRequest, ListingQuery, MarkPaidRequest,
    ModerationQueueQuery, PageQuery, RejectListingRequest, RejectPaymentRequest,
    ReorderMediaRequest, ReviewPaymentRequest, StartFeaturedPaymentRequest,
    StartListingFeePaymentRequest, StartSubscriptionPaymentRequest, SubmitProofRequest,
    UpdateListingRequest, UpdatePackageRequest,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, AuditEntryResponse, BankTransferInstructions, BenefitDetailsResponse,
    FavoriteStatusResponse,
    FeaturedPackageResponse, HealthResponse, ListingResponse, MediaResponse, MessageResponse,
    ModerationStatsResponse, NotificationResponse, OwnerSummaryResponse, PackageResponse,
    PaginatedResponse, PaginationMeta, PaymentResponse, PendingTypeCount, PostingGateResponse,
    ReadinessResponse, ReviewListingResponse, StartedPaymentResponse, SubscriptionResponse,
    UnreadCountResponse,
};

// Re-export mappers and helper structs
pub use mappers::{ListingWithAssets, OwnerWithCounts, SubscriptionWithPackage};
