//! Mappers from domain entities to response DTOs
//!
//! Aggregate helper structs carry an entity together with the related rows a
//! response needs, so services assemble them once and conversion stays pure.

use souq_core::entities::{
    AuditLogEntry, FeaturedPackage, Listing, ListingDetails, MediaItem, Notification,
    PaymentTransaction, Subscription, SubscriptionPackage, User,
};
use souq_core::traits::ModerationCounts;

use super::responses::{
    AuditEntryResponse, FeaturedPackageResponse, ListingResponse, MediaResponse,
    ModerationStatsResponse, NotificationResponse, OwnerSummaryResponse, PackageResponse,
    PaymentResponse, PendingTypeCount, SubscriptionResponse,
};

/// A listing with its dependent detail record and ordered media
#[derive(Debug)]
pub struct ListingWithAssets {
    pub listing: Listing,
    pub details: Option<ListingDetails>,
    pub media: Vec<MediaItem>,
}

/// A listing owner with their listing track record
#[derive(Debug)]
pub struct OwnerWithCounts {
    pub user: User,
    pub total_listings: i64,
    pub approved_listings: i64,
}

/// A subscription with its package, when the package still exists
#[derive(Debug)]
pub struct SubscriptionWithPackage {
    pub subscription: Subscription,
    pub package: Option<SubscriptionPackage>,
}

impl From<MediaItem> for MediaResponse {
    fn from(item: MediaItem) -> Self {
        Self {
            id: item.id.to_string(),
            media_type: item.media_type.as_str().to_string(),
            url: item.url,
            sort_order: item.sort_order,
        }
    }
}

// List views skip the per-listing asset queries; detail views use
// ListingWithAssets instead.
impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        let expires_at = listing.expires_at();
        Self {
            id: listing.id.to_string(),
            owner_id: listing.owner_id.to_string(),
            owner_type: listing.owner_type.as_str().to_string(),
            listing_type: listing.listing_type,
            title: listing.title,
            description: listing.description,
            price_fils: listing.price_fils,
            currency: listing.currency,
            location_governorate: listing.location_governorate,
            location_area: listing.location_area,
            contact_preference: listing.contact_preference,
            status: listing.status,
            rejection_reason: listing.rejection_reason,
            posted_at: listing.posted_at,
            approved_at: listing.approved_at,
            expires_at,
            is_featured: listing.is_featured,
            featured_until: listing.featured_until,
            views_count: listing.views_count,
            favorites_count: listing.favorites_count,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            details: None,
            media: Vec::new(),
        }
    }
}

impl From<ListingWithAssets> for ListingResponse {
    fn from(assets: ListingWithAssets) -> Self {
        let mut response = Self::from(assets.listing);
        response.details = assets.details;
        response.media = assets.media.into_iter().map(MediaResponse::from).collect();
        response
    }
}

impl From<OwnerWithCounts> for OwnerSummaryResponse {
    fn from(owner: OwnerWithCounts) -> Self {
        Self {
            id: owner.user.id.to_string(),
            email: owner.user.email,
            phone: owner.user.phone,
            role: owner.user.role.as_str().to_string(),
            total_listings: owner.total_listings,
            approved_listings: owner.approved_listings,
        }
    }
}

impl From<PaymentTransaction> for PaymentResponse {
    fn from(tx: PaymentTransaction) -> Self {
        Self {
            id: tx.id.to_string(),
            user_id: tx.user_id.to_string(),
            listing_id: tx.listing_id.map(|id| id.to_string()),
            package_id: tx.package_id.map(|id| id.to_string()),
            payment_type: tx.payment_type.as_str().to_string(),
            amount_fils: tx.amount_fils,
            currency: tx.currency,
            status: tx.status.as_str().to_string(),
            proof_image_url: tx.proof_image_url,
            provider: tx.provider,
            provider_ref: tx.provider_ref,
            paid_at: tx.paid_at,
            admin_note: tx.admin_note,
            created_at: tx.created_at,
            updated_at: tx.updated_at,
        }
    }
}

impl From<SubscriptionPackage> for PackageResponse {
    fn from(package: SubscriptionPackage) -> Self {
        Self {
            id: package.id.to_string(),
            name: package.name,
            description: package.description,
            price_monthly_fils: package.price_monthly_fils,
            max_listings: package.max_listings,
            duration_days: package.duration_days,
            sort_order: package.sort_order,
            is_active: package.is_active,
        }
    }
}

impl From<FeaturedPackage> for FeaturedPackageResponse {
    fn from(package: FeaturedPackage) -> Self {
        Self {
            id: package.id.to_string(),
            name: package.name,
            price_fils: package.price_fils,
            duration_days: package.duration_days,
            is_active: package.is_active,
        }
    }
}

impl From<SubscriptionWithPackage> for SubscriptionResponse {
    fn from(sub: SubscriptionWithPackage) -> Self {
        Self {
            package_id: sub.subscription.package_id.to_string(),
            status: sub.subscription.status.as_str().to_string(),
            start_date: sub.subscription.start_date,
            end_date: sub.subscription.end_date,
            listings_used: sub.subscription.listings_used,
            paid_amount_fils: sub.subscription.paid_amount_fils,
            package: sub.package.map(PackageResponse::from),
        }
    }
}

impl From<AuditLogEntry> for AuditEntryResponse {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            actor_id: entry.actor_id.to_string(),
            action: entry.action.as_str().to_string(),
            entity_type: entry.entity_type,
            entity_id: entry.entity_id.to_string(),
            before: entry.before,
            after: entry.after,
            created_at: entry.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            notification_type: notification.notification_type.as_str().to_string(),
            title: notification.title,
            body: notification.body,
            metadata: notification.metadata,
            is_read: notification.is_read,
            read_at: notification.read_at,
            created_at: notification.created_at,
        }
    }
}

impl From<ModerationCounts> for ModerationStatsResponse {
    fn from(counts: ModerationCounts) -> Self {
        Self {
            pending_total: counts.pending_total,
            approved_today: counts.approved_today,
            rejected_today: counts.rejected_today,
            pending_by_type: counts
                .pending_by_type
                .into_iter()
                .map(|(listing_type, count)| PendingTypeCount {
                    listing_type,
                    count,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use souq_core::entities::{ListingStatus, ListingType, UserRole};
    use souq_core::Snowflake;

    #[test]
    fn test_listing_response_derives_expiry() {
        let mut listing = Listing::new_draft(
            Snowflake::new(1),
            Snowflake::new(2),
            UserRole::UserIndividual,
            ListingType::Car,
            "2019 Toyota Camry".to_string(),
            4_500_000,
        );
        let now = Utc::now();
        listing.approve(now);

        let response = ListingResponse::from(listing);
        assert_eq!(response.status, ListingStatus::Approved);
        assert_eq!(
            response.expires_at,
            Some(now + chrono::Duration::days(Listing::LIFETIME_DAYS))
        );
    }
}
