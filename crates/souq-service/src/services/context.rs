//! Service context - dependency container for services
//!
//! Holds all repositories, policy configuration, and other dependencies
//! needed by services.

use std::sync::Arc;

use souq_common::auth::JwtService;
use souq_common::config::{BenefitConfig, ListingPolicyConfig};
use souq_core::traits::{
    AuditLogRepository, FavoriteRepository, ListingRepository, MediaRepository,
    NotificationRepository, PackageRepository, PaymentRepository, SubscriptionRepository,
    UserRepository,
};
use souq_core::SnowflakeGenerator;
use souq_db::PgPool;

use super::notification::PushSender;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - Listing policy and Benefit transfer configuration
/// - The push sender used for fire-and-forget delivery
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    listing_repo: Arc<dyn ListingRepository>,
    media_repo: Arc<dyn MediaRepository>,
    favorite_repo: Arc<dyn FavoriteRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,
    package_repo: Arc<dyn PackageRepository>,
    audit_log_repo: Arc<dyn AuditLogRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    push_sender: Arc<dyn PushSender>,

    // Configuration
    listing_policy: ListingPolicyConfig,
    benefit: BenefitConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        listing_repo: Arc<dyn ListingRepository>,
        media_repo: Arc<dyn MediaRepository>,
        favorite_repo: Arc<dyn FavoriteRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        package_repo: Arc<dyn PackageRepository>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        push_sender: Arc<dyn PushSender>,
        listing_policy: ListingPolicyConfig,
        benefit: BenefitConfig,
    ) -> Self {
        Self {
            pool,
            user_repo,
            listing_repo,
            media_repo,
            favorite_repo,
            payment_repo,
            subscription_repo,
            package_repo,
            audit_log_repo,
            notification_repo,
            jwt_service,
            snowflake_generator,
            push_sender,
            listing_policy,
            benefit,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the listing repository
    pub fn listing_repo(&self) -> &dyn ListingRepository {
        self.listing_repo.as_ref()
    }

    /// Get the media repository
    pub fn media_repo(&self) -> &dyn MediaRepository {
        self.media_repo.as_ref()
    }

    /// Get the favorite repository
    pub fn favorite_repo(&self) -> &dyn FavoriteRepository {
        self.favorite_repo.as_ref()
    }

    /// Get the payment repository
    pub fn payment_repo(&self) -> &dyn PaymentRepository {
        self.payment_repo.as_ref()
    }

    /// Get the subscription repository
    pub fn subscription_repo(&self) -> &dyn SubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    /// Get the package repository
    pub fn package_repo(&self) -> &dyn PackageRepository {
        self.package_repo.as_ref()
    }

    /// Get the audit log repository
    pub fn audit_log_repo(&self) -> &dyn AuditLogRepository {
        self.audit_log_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Get the push sender
    pub fn push_sender(&self) -> &dyn PushSender {
        self.push_sender.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> souq_core::Snowflake {
        self.snowflake_generator.generate()
    }

    // === Configuration ===

    /// Get the listing policy configuration
    pub fn listing_policy(&self) -> &ListingPolicyConfig {
        &self.listing_policy
    }

    /// Get the Benefit bank-transfer configuration
    pub fn benefit(&self) -> &BenefitConfig {
        &self.benefit
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("listing_policy", &self.listing_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    listing_repo: Option<Arc<dyn ListingRepository>>,
    media_repo: Option<Arc<dyn MediaRepository>>,
    favorite_repo: Option<Arc<dyn FavoriteRepository>>,
    payment_repo: Option<Arc<dyn PaymentRepository>>,
    subscription_repo: Option<Arc<dyn SubscriptionRepository>>,
    package_repo: Option<Arc<dyn PackageRepository>>,
    audit_log_repo: Option<Arc<dyn AuditLogRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    push_sender: Option<Arc<dyn PushSender>>,
    listing_policy: Option<ListingPolicyConfig>,
    benefit: Option<BenefitConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            listing_repo: None,
            media_repo: None,
            favorite_repo: None,
            payment_repo: None,
            subscription_repo: None,
            package_repo: None,
            audit_log_repo: None,
            notification_repo: None,
            jwt_service: None,
            snowflake_generator: None,
            push_sender: None,
            listing_policy: None,
            benefit: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn listing_repo(mut self, repo: Arc<dyn ListingRepository>) -> Self {
        self.listing_repo = Some(repo);
        self
    }

    pub fn media_repo(mut self, repo: Arc<dyn MediaRepository>) -> Self {
        self.media_repo = Some(repo);
        self
    }

    pub fn favorite_repo(mut self, repo: Arc<dyn FavoriteRepository>) -> Self {
        self.favorite_repo = Some(repo);
        self
    }

    pub fn payment_repo(mut self, repo: Arc<dyn PaymentRepository>) -> Self {
        self.payment_repo = Some(repo);
        self
    }

    pub fn subscription_repo(mut self, repo: Arc<dyn SubscriptionRepository>) -> Self {
        self.subscription_repo = Some(repo);
        self
    }

    pub fn package_repo(mut self, repo: Arc<dyn PackageRepository>) -> Self {
        self.package_repo = Some(repo);
        self
    }

    pub fn audit_log_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_log_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn push_sender(mut self, sender: Arc<dyn PushSender>) -> Self {
        self.push_sender = Some(sender);
        self
    }

    pub fn listing_policy(mut self, policy: ListingPolicyConfig) -> Self {
        self.listing_policy = Some(policy);
        self
    }

    pub fn benefit(mut self, benefit: BenefitConfig) -> Self {
        self.benefit = Some(benefit);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.user_repo.ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.listing_repo.ok_or_else(|| super::error::ServiceError::validation("listing_repo is required"))?,
            self.media_repo.ok_or_else(|| super::error::ServiceError::validation("media_repo is required"))?,
            self.favorite_repo.ok_or_else(|| super::error::ServiceError::validation("favorite_repo is required"))?,
            self.payment_repo.ok_or_else(|| super::error::ServiceError::validation("payment_repo is required"))?,
            self.subscription_repo.ok_or_else(|| super::error::ServiceError::validation("subscription_repo is required"))?,
            self.package_repo.ok_or_else(|| super::error::ServiceError::validation("package_repo is required"))?,
            self.audit_log_repo.ok_or_else(|| super::error::ServiceError::validation("audit_log_repo is required"))?,
            self.notification_repo.ok_or_else(|| super::error::ServiceError::validation("notification_repo is required"))?,
            self.jwt_service.ok_or_else(|| super::error::ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator.ok_or_else(|| super::error::ServiceError::validation("snowflake_generator is required"))?,
            self.push_sender.ok_or_else(|| super::error::ServiceError::validation("push_sender is required"))?,
            self.listing_policy.ok_or_else(|| super::error::ServiceError::validation("listing_policy is required"))?,
            self.benefit.ok_or_else(|| super::error::ServiceError::validation("benefit is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
