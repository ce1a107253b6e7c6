//! Repository traits (ports) - define the interface for data access

mod repositories;

pub use repositories::{
    AuditLogRepository, FavoriteRepository, ListingFilter, ListingRepository, MediaRepository,
    ModerationCounts, NotificationRepository, PackageRepository, Page, PaymentRepository,
    RepoResult, SubscriptionRepository, UserRepository,
};
