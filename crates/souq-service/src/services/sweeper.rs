//! Daily sweep service
//!
//! Three idempotent passes: expire listings past their lifetime, warn owners
//! of listings approaching expiry, and expire-or-warn merchant
//! subscriptions. Warnings dedup through the notification dedup key, so
//! re-running a sweep in the same day sends nothing twice.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{info, instrument};

use souq_common::config::ListingPolicyConfig;
use souq_core::entities::{Notification, NotificationType};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;

/// Days remaining for a listing that is due a warning today, or None
///
/// Warnings start at `expiry_warning_start_days` of live time and repeat
/// every `expiry_warning_interval_days` until the lifetime ends. With the
/// defaults (20/5/35) that is days 20, 25, and 30.
pub fn warning_due(days_live: i64, policy: &ListingPolicyConfig) -> Option<i64> {
    let start = policy.expiry_warning_start_days;
    let interval = policy.expiry_warning_interval_days;
    let lifetime = policy.listing_lifetime_days;

    if days_live < start || days_live >= lifetime {
        return None;
    }
    if interval > 0 && (days_live - start) % interval != 0 {
        return None;
    }
    Some(lifetime - days_live)
}

/// Result of one full sweep
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub listings_expired: u64,
    pub expiry_warnings_sent: u64,
    pub subscriptions_expired: u64,
    pub subscription_warnings_sent: u64,
}

/// Daily sweep service
pub struct SweeperService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SweeperService<'a> {
    /// Create a new SweeperService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Batch-expire APPROVED listings past their lifetime
    #[instrument(skip(self))]
    pub async fn expire_listings(&self, now: DateTime<Utc>) -> ServiceResult<u64> {
        let lifetime = self.ctx.listing_policy().listing_lifetime_days;
        let cutoff = now - Duration::days(lifetime);
        let expired = self.ctx.listing_repo().expire_posted_before(cutoff).await?;
        if expired > 0 {
            info!(expired, "Listings expired");
        }
        Ok(expired)
    }

    /// Warn owners of listings entering the expiry window
    #[instrument(skip(self))]
    pub async fn warn_expiring_listings(&self, now: DateTime<Utc>) -> ServiceResult<u64> {
        let policy = self.ctx.listing_policy();
        let from = now - Duration::days(policy.listing_lifetime_days);
        let to = now - Duration::days(policy.expiry_warning_start_days);
        let listings = self
            .ctx
            .listing_repo()
            .find_approved_posted_between(from, to)
            .await?;

        let notifications = NotificationService::new(self.ctx);
        let today = now.date_naive();
        let mut sent = 0u64;

        for listing in listings {
            let Some(days_live) = listing.days_live(now) else {
                continue;
            };
            let Some(days_remaining) = warning_due(days_live, policy) else {
                continue;
            };

            let dedup_key = Notification::warning_dedup_key(
                NotificationType::ListingExpiryWarning,
                listing.id,
                today,
            );
            let inserted = notifications
                .notify_deduped(
                    listing.owner_id,
                    NotificationType::ListingExpiryWarning,
                    "Listing expiring soon",
                    format!(
                        "Your listing \"{}\" expires in {days_remaining} days.",
                        listing.title
                    ),
                    Some(json!({
                        "listing_id": listing.id.to_string(),
                        "days_remaining": days_remaining,
                    })),
                    dedup_key,
                )
                .await?;
            if inserted {
                sent += 1;
            }
        }

        if sent > 0 {
            info!(sent, "Listing expiry warnings sent");
        }
        Ok(sent)
    }

    /// Expire finished subscriptions and warn ones close to the end
    #[instrument(skip(self))]
    pub async fn sweep_subscriptions(&self, now: DateTime<Utc>) -> ServiceResult<(u64, u64)> {
        let notifications = NotificationService::new(self.ctx);

        let ended = self.ctx.subscription_repo().expire_ended(now).await?;
        let expired = ended.len() as u64;
        for user_id in ended {
            notifications
                .notify(
                    user_id,
                    NotificationType::SubscriptionExpired,
                    "Subscription expired",
                    "Your subscription has expired. Renew to keep posting listings.",
                    None,
                )
                .await?;
        }

        let horizon = now + Duration::days(self.ctx.listing_policy().subscription_warning_days);
        let ending = self
            .ctx
            .subscription_repo()
            .find_ending_between(now, horizon)
            .await?;

        let today = now.date_naive();
        let mut warned = 0u64;
        for subscription in ending {
            let days_remaining = (subscription.end_date - now).num_days().max(0);
            let dedup_key = Notification::warning_dedup_key(
                NotificationType::SubscriptionExpiryWarning,
                subscription.user_id,
                today,
            );
            let inserted = notifications
                .notify_deduped(
                    subscription.user_id,
                    NotificationType::SubscriptionExpiryWarning,
                    "Subscription expiring soon",
                    format!("Your subscription expires in {days_remaining} days."),
                    Some(json!({ "days_remaining": days_remaining })),
                    dedup_key,
                )
                .await?;
            if inserted {
                warned += 1;
            }
        }

        if expired > 0 || warned > 0 {
            info!(expired, warned, "Subscription sweep finished");
        }
        Ok((expired, warned))
    }

    /// Run all three passes concurrently
    #[instrument(skip(self))]
    pub async fn run(&self, now: DateTime<Utc>) -> ServiceResult<SweepReport> {
        let (expired, warnings, subscriptions) = tokio::join!(
            self.expire_listings(now),
            self.warn_expiring_listings(now),
            self.sweep_subscriptions(now),
        );
        let (subscriptions_expired, subscription_warnings_sent) = subscriptions?;

        let report = SweepReport {
            listings_expired: expired?,
            expiry_warnings_sent: warnings?,
            subscriptions_expired,
            subscription_warnings_sent,
        };
        info!(?report, "Daily sweep complete");
        Ok(report)
    }
}
