//! In-memory repositories for service tests
//!
//! Each fake keeps its rows behind a `Mutex` and mirrors the storage-level
//! guarantees the Postgres implementations provide (dedup-key conflicts,
//! atomic quota consumption, status-guarded batch updates), so service
//! tests exercise real control flow without a database.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use souq_common::auth::JwtService;
use souq_common::config::{BenefitConfig, ListingPolicyConfig};
use souq_core::entities::{
    AuditAction, AuditLogEntry, FeaturedPackage, Listing, ListingDetails, ListingStatus,
    Notification, PaymentStatus, PaymentTransaction, PaymentType, Subscription,
    SubscriptionPackage, SubscriptionStatus, User,
};
use souq_core::traits::{
    AuditLogRepository, FavoriteRepository, ListingFilter, ListingRepository, MediaRepository,
    ModerationCounts, NotificationRepository, PackageRepository, Page, PaymentRepository,
    RepoResult, SubscriptionRepository, UserRepository,
};
use souq_core::{DomainError, Snowflake, SnowflakeGenerator};
use souq_db::{create_lazy_pool, DatabaseConfig};

use super::context::{ServiceContext, ServiceContextBuilder};
use super::notification::LogPushSender;

#[derive(Default)]
pub struct FakeUserRepository {
    pub admin_ids: Mutex<Vec<Snowflake>>,
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, _id: Snowflake) -> RepoResult<Option<User>> {
        Ok(None)
    }

    async fn find_admin_ids(&self) -> RepoResult<Vec<Snowflake>> {
        Ok(self.admin_ids.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct FakeListingRepository {
    pub listings: Mutex<HashMap<Snowflake, Listing>>,
}

impl FakeListingRepository {
    pub fn insert(&self, listing: Listing) {
        self.listings.lock().unwrap().insert(listing.id, listing);
    }

    pub fn get(&self, id: Snowflake) -> Option<Listing> {
        self.listings.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl ListingRepository for FakeListingRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Listing>> {
        Ok(self.get(id))
    }

    async fn create(&self, listing: &Listing) -> RepoResult<()> {
        self.insert(listing.clone());
        Ok(())
    }

    async fn update(&self, listing: &Listing) -> RepoResult<()> {
        self.insert(listing.clone());
        Ok(())
    }

    async fn find_by_owner(
        &self,
        owner_id: Snowflake,
        _filter: &ListingFilter,
        _page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)> {
        let rows: Vec<Listing> = self
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn find_pending(
        &self,
        _filter: &ListingFilter,
        _page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)> {
        let mut rows: Vec<Listing> = self
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.status == ListingStatus::PendingReview)
            .cloned()
            .collect();
        rows.sort_by_key(|l| l.updated_at);
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn owner_counts(&self, owner_id: Snowflake) -> RepoResult<(i64, i64)> {
        let guard = self.listings.lock().unwrap();
        let total = guard.values().filter(|l| l.owner_id == owner_id).count() as i64;
        let approved = guard
            .values()
            .filter(|l| l.owner_id == owner_id && l.status == ListingStatus::Approved)
            .count() as i64;
        Ok((total, approved))
    }

    async fn moderation_counts(
        &self,
        _today_start: DateTime<Utc>,
    ) -> RepoResult<ModerationCounts> {
        Ok(ModerationCounts::default())
    }

    async fn increment_views(&self, id: Snowflake) -> RepoResult<()> {
        if let Some(listing) = self.listings.lock().unwrap().get_mut(&id) {
            listing.views_count += 1;
        }
        Ok(())
    }

    async fn expire_posted_before(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let mut expired = 0;
        for listing in self.listings.lock().unwrap().values_mut() {
            if listing.status == ListingStatus::Approved
                && listing.posted_at.is_some_and(|p| p <= cutoff)
            {
                listing.status = ListingStatus::Expired;
                expired += 1;
            }
        }
        Ok(expired)
    }

    async fn find_approved_posted_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepoResult<Vec<Listing>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| {
                l.status == ListingStatus::Approved
                    && l.posted_at.is_some_and(|p| p >= from && p <= to)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeMediaRepository {
    pub details: Mutex<HashMap<Snowflake, ListingDetails>>,
    pub image_counts: Mutex<HashMap<Snowflake, i64>>,
}

impl FakeMediaRepository {
    pub fn set_details(&self, listing_id: Snowflake, details: ListingDetails) {
        self.details.lock().unwrap().insert(listing_id, details);
    }

    pub fn set_image_count(&self, listing_id: Snowflake, count: i64) {
        self.image_counts.lock().unwrap().insert(listing_id, count);
    }
}

#[async_trait]
impl MediaRepository for FakeMediaRepository {
    async fn find_details(&self, listing_id: Snowflake) -> RepoResult<Option<ListingDetails>> {
        Ok(self.details.lock().unwrap().get(&listing_id).cloned())
    }

    async fn upsert_details(
        &self,
        listing_id: Snowflake,
        details: &ListingDetails,
    ) -> RepoResult<()> {
        self.set_details(listing_id, details.clone());
        Ok(())
    }

    async fn find_media(
        &self,
        _listing_id: Snowflake,
    ) -> RepoResult<Vec<souq_core::entities::MediaItem>> {
        Ok(Vec::new())
    }

    async fn count_images(&self, listing_id: Snowflake) -> RepoResult<i64> {
        Ok(*self.image_counts.lock().unwrap().get(&listing_id).unwrap_or(&0))
    }

    async fn reorder_media(
        &self,
        _listing_id: Snowflake,
        _ordered_ids: &[Snowflake],
    ) -> RepoResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePaymentRepository {
    pub transactions: Mutex<Vec<PaymentTransaction>>,
}

#[async_trait]
impl PaymentRepository for FakePaymentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PaymentTransaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn create(&self, transaction: &PaymentTransaction) -> RepoResult<()> {
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(())
    }

    async fn update(&self, transaction: &PaymentTransaction) -> RepoResult<()> {
        let mut guard = self.transactions.lock().unwrap();
        if let Some(slot) = guard.iter_mut().find(|t| t.id == transaction.id) {
            *slot = transaction.clone();
        }
        Ok(())
    }

    async fn exists_for_listing(
        &self,
        listing_id: Snowflake,
        payment_type: PaymentType,
        statuses: &[PaymentStatus],
    ) -> RepoResult<bool> {
        Ok(self.transactions.lock().unwrap().iter().any(|t| {
            t.listing_id == Some(listing_id)
                && t.payment_type == payment_type
                && statuses.contains(&t.status)
        }))
    }

    async fn find_open_subscription(
        &self,
        user_id: Snowflake,
        package_id: Snowflake,
    ) -> RepoResult<Option<PaymentTransaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| {
                t.user_id == user_id
                    && t.package_id == Some(package_id)
                    && matches!(t.status, PaymentStatus::Pending | PaymentStatus::PendingProof)
            })
            .cloned())
    }

    async fn find_pending_proof(&self) -> RepoResult<Vec<PaymentTransaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.status == PaymentStatus::PendingProof)
            .cloned()
            .collect())
    }

    async fn find_all(&self, _page: Page) -> RepoResult<(Vec<PaymentTransaction>, i64)> {
        let rows = self.transactions.lock().unwrap().clone();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PaymentTransaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_listing(&self, listing_id: Snowflake) -> RepoResult<Vec<PaymentTransaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.listing_id == Some(listing_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeSubscriptionRepository {
    pub subscriptions: Mutex<HashMap<Snowflake, Subscription>>,
    pub quotas: Mutex<HashMap<Snowflake, i32>>,
}

impl FakeSubscriptionRepository {
    pub fn insert(&self, subscription: Subscription, max_listings: i32) {
        self.quotas
            .lock()
            .unwrap()
            .insert(subscription.user_id, max_listings);
        self.subscriptions
            .lock()
            .unwrap()
            .insert(subscription.user_id, subscription);
    }
}

#[async_trait]
impl SubscriptionRepository for FakeSubscriptionRepository {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Subscription>> {
        Ok(self.subscriptions.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert(&self, subscription: &Subscription) -> RepoResult<()> {
        self.subscriptions
            .lock()
            .unwrap()
            .insert(subscription.user_id, subscription.clone());
        Ok(())
    }

    async fn consume_slot(&self, user_id: Snowflake, now: DateTime<Utc>) -> RepoResult<bool> {
        let max = *self.quotas.lock().unwrap().get(&user_id).unwrap_or(&0);
        let mut guard = self.subscriptions.lock().unwrap();
        match guard.get_mut(&user_id) {
            Some(sub)
                if sub.status == SubscriptionStatus::Active
                    && sub.end_date > now
                    && sub.listings_used < max =>
            {
                sub.listings_used += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn expire_ended(&self, now: DateTime<Utc>) -> RepoResult<Vec<Snowflake>> {
        let mut ended = Vec::new();
        for sub in self.subscriptions.lock().unwrap().values_mut() {
            if sub.status == SubscriptionStatus::Active && sub.end_date <= now {
                sub.status = SubscriptionStatus::Expired;
                ended.push(sub.user_id);
            }
        }
        Ok(ended)
    }

    async fn find_ending_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepoResult<Vec<Subscription>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .values()
            .filter(|s| {
                s.status == SubscriptionStatus::Active
                    && s.end_date > from
                    && s.end_date <= to
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakePackageRepository {
    pub packages: Mutex<HashMap<Snowflake, SubscriptionPackage>>,
    pub featured: Mutex<HashMap<Snowflake, FeaturedPackage>>,
}

#[async_trait]
impl PackageRepository for FakePackageRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SubscriptionPackage>> {
        Ok(self.packages.lock().unwrap().get(&id).cloned())
    }

    async fn find_active(&self) -> RepoResult<Vec<SubscriptionPackage>> {
        Ok(self
            .packages
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> RepoResult<Vec<SubscriptionPackage>> {
        Ok(self.packages.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, package: &SubscriptionPackage) -> RepoResult<()> {
        self.packages
            .lock()
            .unwrap()
            .insert(package.id, package.clone());
        Ok(())
    }

    async fn update(&self, package: &SubscriptionPackage) -> RepoResult<()> {
        self.packages
            .lock()
            .unwrap()
            .insert(package.id, package.clone());
        Ok(())
    }

    async fn subscriber_count(&self, _id: Snowflake) -> RepoResult<i64> {
        Ok(0)
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.packages.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn find_featured_by_id(&self, id: Snowflake) -> RepoResult<Option<FeaturedPackage>> {
        Ok(self.featured.lock().unwrap().get(&id).cloned())
    }

    async fn find_active_featured(&self) -> RepoResult<Vec<FeaturedPackage>> {
        Ok(self
            .featured
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeAuditLogRepository {
    pub entries: Mutex<Vec<AuditLogEntry>>,
}

#[async_trait]
impl AuditLogRepository for FakeAuditLogRepository {
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn find_by_actor(
        &self,
        actor_id: Snowflake,
        actions: &[AuditAction],
        limit: i64,
    ) -> RepoResult<Vec<AuditLogEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.actor_id == actor_id && actions.contains(&e.action))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Records every row and honors dedup-key conflicts like the unique index
#[derive(Default)]
pub struct FakeNotificationRepository {
    pub notifications: Mutex<Vec<Notification>>,
    seen_dedup_keys: Mutex<HashSet<String>>,
}

impl FakeNotificationRepository {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationRepository for FakeNotificationRepository {
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn create_deduped(&self, notification: &Notification) -> RepoResult<bool> {
        let Some(key) = notification.dedup_key.clone() else {
            self.notifications.lock().unwrap().push(notification.clone());
            return Ok(true);
        };
        if !self.seen_dedup_keys.lock().unwrap().insert(key) {
            return Ok(false);
        }
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(true)
    }

    async fn find_by_user(
        &self,
        user_id: Snowflake,
        _page: Page,
    ) -> RepoResult<(Vec<Notification>, i64)> {
        let rows: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn unread_count(&self, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, user_id: Snowflake, id: Snowflake) -> RepoResult<()> {
        let mut guard = self.notifications.lock().unwrap();
        let notification = guard
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .ok_or(DomainError::NotificationNotFound(id))?;
        notification.is_read = true;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<()> {
        for notification in self.notifications.lock().unwrap().iter_mut() {
            if notification.user_id == user_id {
                notification.is_read = true;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeFavoriteRepository {
    pub favorites: Mutex<HashSet<(Snowflake, Snowflake)>>,
}

#[async_trait]
impl FavoriteRepository for FakeFavoriteRepository {
    async fn add(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool> {
        Ok(self.favorites.lock().unwrap().insert((user_id, listing_id)))
    }

    async fn remove(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool> {
        Ok(self.favorites.lock().unwrap().remove(&(user_id, listing_id)))
    }

    async fn exists(&self, user_id: Snowflake, listing_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .contains(&(user_id, listing_id)))
    }

    async fn find_listings(
        &self,
        _user_id: Snowflake,
        _page: Page,
    ) -> RepoResult<(Vec<Listing>, i64)> {
        Ok((Vec::new(), 0))
    }
}

/// Bundle of fakes plus the context wired over them
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub users: Arc<FakeUserRepository>,
    pub listings: Arc<FakeListingRepository>,
    pub media: Arc<FakeMediaRepository>,
    pub payments: Arc<FakePaymentRepository>,
    pub subscriptions: Arc<FakeSubscriptionRepository>,
    pub packages: Arc<FakePackageRepository>,
    pub audit: Arc<FakeAuditLogRepository>,
    pub notifications: Arc<FakeNotificationRepository>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_policy(ListingPolicyConfig::default())
    }

    pub fn with_policy(policy: ListingPolicyConfig) -> Self {
        let users = Arc::new(FakeUserRepository::default());
        let listings = Arc::new(FakeListingRepository::default());
        let media = Arc::new(FakeMediaRepository::default());
        let favorites = Arc::new(FakeFavoriteRepository::default());
        let payments = Arc::new(FakePaymentRepository::default());
        let subscriptions = Arc::new(FakeSubscriptionRepository::default());
        let packages = Arc::new(FakePackageRepository::default());
        let audit = Arc::new(FakeAuditLogRepository::default());
        let notifications = Arc::new(FakeNotificationRepository::default());

        // Lazy pool: a handle exists but nothing ever connects
        let pool = create_lazy_pool(&DatabaseConfig::default())
            .expect("lazy pool construction cannot fail on a well-formed url");

        let ctx = ServiceContextBuilder::new()
            .pool(pool)
            .user_repo(users.clone())
            .listing_repo(listings.clone())
            .media_repo(media.clone())
            .favorite_repo(favorites)
            .payment_repo(payments.clone())
            .subscription_repo(subscriptions.clone())
            .package_repo(packages.clone())
            .audit_log_repo(audit.clone())
            .notification_repo(notifications.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .push_sender(Arc::new(LogPushSender))
            .listing_policy(policy)
            .benefit(BenefitConfig {
                iban: "BH00TEST00000000000000".to_string(),
                account_name: "Test Account".to_string(),
            })
            .build()
            .expect("all context fields are provided");

        Self {
            ctx,
            users,
            listings,
            media,
            payments,
            subscriptions,
            packages,
            audit,
            notifications,
        }
    }
}
