//! Subscription service
//!
//! Merchant posting gate, subscription state, and the admin-managed package
//! catalog. The gate fails closed: missing or inconsistent subscription data
//! always reads as "cannot post".

use chrono::{Duration, Utc};
use tracing::{info, instrument};

use souq_core::entities::{Subscription, SubscriptionPackage, SubscriptionStatus, UserRole};
use souq_core::{DomainError, Snowflake};

use crate::dto::{
    CreatePackageRequest, FeaturedPackageResponse, PackageResponse, PostingGateResponse,
    SubscriptionResponse, SubscriptionWithPackage, UpdatePackageRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Evaluate whether this account may submit a listing
    ///
    /// Individual accounts always pass; showroom accounts need an ACTIVE,
    /// unexpired subscription with quota remaining. Each denial carries a
    /// distinct reason the client can surface.
    #[instrument(skip(self))]
    pub async fn posting_gate(
        &self,
        user_id: Snowflake,
        role: UserRole,
    ) -> ServiceResult<PostingGateResponse> {
        if !role.is_merchant() {
            return Ok(PostingGateResponse::allowed());
        }

        let now = Utc::now();
        let Some(subscription) = self.ctx.subscription_repo().find_by_user(user_id).await? else {
            return Ok(PostingGateResponse::denied("No active subscription"));
        };

        if subscription.status != SubscriptionStatus::Active {
            return Ok(PostingGateResponse::denied("Subscription expired"));
        }
        if subscription.end_date <= now {
            return Ok(PostingGateResponse::denied("Subscription expired"));
        }

        let Some(package) = self
            .ctx
            .package_repo()
            .find_by_id(subscription.package_id)
            .await?
        else {
            return Ok(PostingGateResponse::denied(
                "Subscription package no longer exists",
            ));
        };

        if subscription.listings_used >= package.max_listings {
            return Ok(PostingGateResponse::denied(
                "Maximum listings reached for your subscription",
            ));
        }

        Ok(PostingGateResponse::allowed())
    }

    /// Atomically claim one quota slot for a merchant submission
    ///
    /// The storage layer checks and increments in a single statement; when
    /// that fails the gate is re-read only to name the reason.
    #[instrument(skip(self))]
    pub async fn consume_slot(&self, user_id: Snowflake, role: UserRole) -> ServiceResult<()> {
        if !role.is_merchant() {
            return Ok(());
        }

        let consumed = self
            .ctx
            .subscription_repo()
            .consume_slot(user_id, Utc::now())
            .await?;
        if consumed {
            return Ok(());
        }

        let gate = self.posting_gate(user_id, role).await?;
        let reason = gate
            .reason
            .unwrap_or_else(|| "Maximum listings reached for your subscription".to_string());
        Err(ServiceError::from(DomainError::MerchantCannotPost(reason)))
    }

    /// The caller's subscription, with its package when still cataloged
    #[instrument(skip(self))]
    pub async fn my_subscription(&self, user_id: Snowflake) -> ServiceResult<SubscriptionResponse> {
        let subscription = self
            .ctx
            .subscription_repo()
            .find_by_user(user_id)
            .await?
            .ok_or(DomainError::SubscriptionNotFound(user_id))?;

        let package = self
            .ctx
            .package_repo()
            .find_by_id(subscription.package_id)
            .await?;

        Ok(SubscriptionResponse::from(SubscriptionWithPackage {
            subscription,
            package,
        }))
    }

    /// Replace the user's subscription with a fresh window
    ///
    /// Called on payment approval. The quota counter restarts at zero; the
    /// paid amount is the approved transaction's amount.
    #[instrument(skip(self))]
    pub async fn activate(
        &self,
        user_id: Snowflake,
        package_id: Snowflake,
        duration_days: i64,
        paid_amount_fils: i64,
    ) -> ServiceResult<()> {
        let now = Utc::now();
        let subscription = Subscription {
            user_id,
            package_id,
            status: SubscriptionStatus::Active,
            start_date: now,
            end_date: now + Duration::days(duration_days),
            listings_used: 0,
            paid_amount_fils,
            created_at: now,
            updated_at: now,
        };
        self.ctx.subscription_repo().upsert(&subscription).await?;

        info!(
            user_id = %user_id,
            package_id = %package_id,
            duration_days,
            "Subscription activated"
        );
        Ok(())
    }

    // === Catalog ===

    /// Active subscription packages, in catalog order
    #[instrument(skip(self))]
    pub async fn catalog(&self) -> ServiceResult<Vec<PackageResponse>> {
        let packages = self.ctx.package_repo().find_active().await?;
        Ok(packages.into_iter().map(PackageResponse::from).collect())
    }

    /// Active featured-placement packages
    #[instrument(skip(self))]
    pub async fn featured_catalog(&self) -> ServiceResult<Vec<FeaturedPackageResponse>> {
        let packages = self.ctx.package_repo().find_active_featured().await?;
        Ok(packages
            .into_iter()
            .map(FeaturedPackageResponse::from)
            .collect())
    }

    // === Admin package management ===

    /// All subscription packages, including inactive (admin view)
    #[instrument(skip(self))]
    pub async fn list_packages(&self) -> ServiceResult<Vec<PackageResponse>> {
        let packages = self.ctx.package_repo().find_all().await?;
        Ok(packages.into_iter().map(PackageResponse::from).collect())
    }

    /// Create a subscription package
    #[instrument(skip(self, request))]
    pub async fn create_package(
        &self,
        request: CreatePackageRequest,
    ) -> ServiceResult<PackageResponse> {
        let now = Utc::now();
        let package = SubscriptionPackage {
            id: self.ctx.generate_id(),
            name: request.name,
            description: request.description,
            price_monthly_fils: request.price_monthly_fils,
            max_listings: request.max_listings,
            duration_days: request.duration_days,
            sort_order: request.sort_order,
            is_active: request.is_active,
            created_at: now,
            updated_at: now,
        };
        self.ctx.package_repo().create(&package).await?;

        info!(package_id = %package.id, name = %package.name, "Package created");
        Ok(PackageResponse::from(package))
    }

    /// Apply a partial update to a package
    ///
    /// Already-initiated transactions are unaffected: grants read the
    /// snapshot captured at initiation, not the package row.
    #[instrument(skip(self, request))]
    pub async fn update_package(
        &self,
        package_id: Snowflake,
        request: UpdatePackageRequest,
    ) -> ServiceResult<PackageResponse> {
        let mut package = self
            .ctx
            .package_repo()
            .find_by_id(package_id)
            .await?
            .ok_or(DomainError::PackageNotFound(package_id))?;

        if let Some(name) = request.name {
            package.name = name;
        }
        if let Some(description) = request.description {
            package.description = Some(description);
        }
        if let Some(price) = request.price_monthly_fils {
            package.price_monthly_fils = price;
        }
        if let Some(max_listings) = request.max_listings {
            package.max_listings = max_listings;
        }
        if let Some(duration_days) = request.duration_days {
            package.duration_days = duration_days;
        }
        if let Some(sort_order) = request.sort_order {
            package.sort_order = sort_order;
        }
        if let Some(is_active) = request.is_active {
            package.is_active = is_active;
        }
        package.updated_at = Utc::now();

        self.ctx.package_repo().update(&package).await?;

        info!(package_id = %package.id, "Package updated");
        Ok(PackageResponse::from(package))
    }

    /// Remove a package from the catalog
    ///
    /// Packages with subscribers are deactivated instead of deleted so
    /// existing subscriptions keep a valid reference.
    #[instrument(skip(self))]
    pub async fn delete_package(&self, package_id: Snowflake) -> ServiceResult<&'static str> {
        let mut package = self
            .ctx
            .package_repo()
            .find_by_id(package_id)
            .await?
            .ok_or(DomainError::PackageNotFound(package_id))?;

        let subscribers = self.ctx.package_repo().subscriber_count(package_id).await?;
        if subscribers > 0 {
            package.is_active = false;
            package.updated_at = Utc::now();
            self.ctx.package_repo().update(&package).await?;

            info!(package_id = %package_id, subscribers, "Package deactivated");
            return Ok("Package deactivated; existing subscribers are unaffected");
        }

        self.ctx.package_repo().delete(package_id).await?;

        info!(package_id = %package_id, "Package deleted");
        Ok("Package deleted")
    }
}
