//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the PostgreSQL implementation. Counter updates (views, favorites,
//! quota) are expressed as atomic storage-level operations, never as
//! read-modify-write in application code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AuditAction, AuditLogEntry, FeaturedPackage, Listing, ListingDetails, ListingStatus,
    ListingType, MediaItem, Notification, PaymentStatus, PaymentTransaction, PaymentType,
    Subscription,
    SubscriptionPackage, User, UserRole,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Offset pagination window
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, 100),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// Filters for listing queries (moderation queue and owner views)
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub status: Option<ListingStatus>,
    pub listing_type: Option<ListingType>,
    pub owner_type: Option<UserRole>,
    pub submitted_from: Option<DateTime<Utc>>,
    pub submitted_to: Option<DateTime<Utc>>,
}

/// Aggregate counts for the moderation dashboard
#[derive(Debug, Clone, Default)]
pub struct ModerationCounts {
    pub pending_total: i64,
    pub approved_today: i64,
    pub rejected_today: i64,
    pub pending_by_type: Vec<(ListingType, i64)>,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// All admin and super-admin user ids, for notification fan-out
    async fn find_admin_ids(&self) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Listing Repository
// ============================================================================

#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Find listing by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Listing>>;

    /// Create a new listing
    async fn create(&self, listing: &Listing) -> RepoResult<()>;

    /// Persist all mutable listing fields
    async fn update(&self, listing: &Listing) -> RepoResult<()>;

    /// Listings owned by a user, newest-updated first
    async fn find_by_owner(
        &self,
        owner_id: Snowflake,
        filter: &ListingFilter,
        page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)>;

    /// PENDING_REVIEW listings, oldest submission first (FIFO fairness)
    async fn find_pending(
        &self,
        filter: &ListingFilter,
        page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)>;

    /// Count the owner's listings: (total, approved)
    async fn owner_counts(&self, owner_id: Snowflake) -> RepoResult<(i64, i64)>;

    /// Dashboard counts for the moderation queue
    async fn moderation_counts(&self, today_start: DateTime<Utc>) -> RepoResult<ModerationCounts>;

    /// Atomically bump the public view counter
    async fn increment_views(&self, id: Snowflake) -> RepoResult<()>;

    /// Batch-expire APPROVED listings posted on or before the cutoff;
    /// returns the number of rows transitioned
    async fn expire_posted_before(&self, cutoff: DateTime<Utc>) -> RepoResult<u64>;

    /// APPROVED listings inside the expiry-warning window
    /// (`posted_at` between `from` and `to`)
    async fn find_approved_posted_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepoResult<Vec<Listing>>;
}

// ============================================================================
// Details / Media Repositories
// ============================================================================

#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Detail record for a listing, if any
    async fn find_details(&self, listing_id: Snowflake) -> RepoResult<Option<ListingDetails>>;

    /// Insert-or-replace the detail record for a listing
    async fn upsert_details(
        &self,
        listing_id: Snowflake,
        details: &ListingDetails,
    ) -> RepoResult<()>;

    /// Media items for a listing, by sort order
    async fn find_media(&self, listing_id: Snowflake) -> RepoResult<Vec<MediaItem>>;

    /// Number of IMAGE items attached to a listing
    async fn count_images(&self, listing_id: Snowflake) -> RepoResult<i64>;

    /// Apply a new sort order to the listing's media in one transaction
    async fn reorder_media(
        &self,
        listing_id: Snowflake,
        ordered_ids: &[Snowflake],
    ) -> RepoResult<()>;
}

// ============================================================================
// Payment Repository
// ============================================================================

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Find transaction by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PaymentTransaction>>;

    /// Create a new transaction
    async fn create(&self, transaction: &PaymentTransaction) -> RepoResult<()>;

    /// Persist all mutable transaction fields
    async fn update(&self, transaction: &PaymentTransaction) -> RepoResult<()>;

    /// Whether the listing has a transaction of the given purpose in any of
    /// the given statuses
    async fn exists_for_listing(
        &self,
        listing_id: Snowflake,
        payment_type: PaymentType,
        statuses: &[PaymentStatus],
    ) -> RepoResult<bool>;

    /// Existing open (PENDING/PENDING_PROOF) subscription transaction for
    /// this user and package, used for idempotent initiation
    async fn find_open_subscription(
        &self,
        user_id: Snowflake,
        package_id: Snowflake,
    ) -> RepoResult<Option<PaymentTransaction>>;

    /// Transactions awaiting review, oldest proof first
    async fn find_pending_proof(&self) -> RepoResult<Vec<PaymentTransaction>>;

    /// All transactions, newest first, paginated
    async fn find_all(&self, page: Page) -> RepoResult<(Vec<PaymentTransaction>, i64)>;

    /// A user's transactions, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PaymentTransaction>>;

    /// A listing's transactions, newest first
    async fn find_by_listing(&self, listing_id: Snowflake) -> RepoResult<Vec<PaymentTransaction>>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// The user's subscription row, if any (1:1)
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Subscription>>;

    /// Insert-or-replace the user's subscription row
    async fn upsert(&self, subscription: &Subscription) -> RepoResult<()>;

    /// Atomic check-and-increment of the quota counter: succeeds only when
    /// the subscription is ACTIVE, unexpired, and below its package quota.
    /// Returns false when the guard fails (no row changed).
    async fn consume_slot(&self, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool>;

    /// Expire ACTIVE subscriptions whose window has closed; returns affected
    /// user ids so each can be notified
    async fn expire_ended(&self, now: DateTime<Utc>) -> RepoResult<Vec<Snowflake>>;

    /// ACTIVE subscriptions ending within the warning horizon
    async fn find_ending_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepoResult<Vec<Subscription>>;
}

// ============================================================================
// Package Repository
// ============================================================================

#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Find subscription package by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SubscriptionPackage>>;

    /// Active subscription packages in catalog order
    async fn find_active(&self) -> RepoResult<Vec<SubscriptionPackage>>;

    /// All subscription packages in catalog order (admin view)
    async fn find_all(&self) -> RepoResult<Vec<SubscriptionPackage>>;

    /// Create a subscription package
    async fn create(&self, package: &SubscriptionPackage) -> RepoResult<()>;

    /// Persist package edits
    async fn update(&self, package: &SubscriptionPackage) -> RepoResult<()>;

    /// Number of subscriptions referencing a package
    async fn subscriber_count(&self, id: Snowflake) -> RepoResult<i64>;

    /// Hard-delete a package (caller must ensure it is unreferenced)
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Find featured package by ID
    async fn find_featured_by_id(&self, id: Snowflake) -> RepoResult<Option<FeaturedPackage>>;

    /// Active featured packages
    async fn find_active_featured(&self) -> RepoResult<Vec<FeaturedPackage>>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append one entry; entries are never updated or deleted
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()>;

    /// Recent entries by one actor, filtered to the given actions
    async fn find_by_actor(
        &self,
        actor_id: Snowflake,
        actions: &[AuditAction],
        limit: i64,
    ) -> RepoResult<Vec<AuditLogEntry>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification row
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Insert unless the dedup key already exists; returns whether a row was
    /// written (`ON CONFLICT DO NOTHING` semantics)
    async fn create_deduped(&self, notification: &Notification) -> RepoResult<bool>;

    /// A user's notifications, newest first
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> RepoResult<(Vec<Notification>, i64)>;

    /// Count of unread notifications
    async fn unread_count(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Mark one notification read; errors if it does not belong to the user
    async fn mark_read(&self, user_id: Snowflake, id: Snowflake) -> RepoResult<()>;

    /// Mark all of the user's notifications read
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Add a favorite and bump the listing counter in one transaction;
    /// returns false (and leaves the counter alone) when already favorited
    async fn add(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool>;

    /// Remove a favorite and drop the counter in one transaction;
    /// returns false when it was not favorited
    async fn remove(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool>;

    /// Whether the user has favorited the listing
    async fn exists(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool>;

    /// Listings the user has favorited, newest favorite first
    async fn find_listings(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)>;
}
