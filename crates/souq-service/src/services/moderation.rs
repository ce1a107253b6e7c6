//! Moderation service
//!
//! Admin review queue: approval, rejection, dashboard counts, and the
//! reviewer's recent activity. Every decision writes an audit entry and
//! notifies the listing owner.

use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument};

use souq_core::entities::{AuditAction, AuditLogEntry, ListingStatus, NotificationType};
use souq_core::traits::{ListingFilter, Page};
use souq_core::{DomainError, Snowflake};

use crate::dto::{
    AuditEntryResponse, ListingResponse, ListingWithAssets, ModerationQueueQuery,
    ModerationStatsResponse, OwnerSummaryResponse, OwnerWithCounts, PaginatedResponse,
    RejectListingRequest, ReviewListingResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The review queue, oldest submission first
    #[instrument(skip(self, query))]
    pub async fn pending_listings(
        &self,
        query: ModerationQueueQuery,
    ) -> ServiceResult<PaginatedResponse<ListingResponse>> {
        let filter = ListingFilter {
            listing_type: query.listing_type.as_deref().and_then(|s| s.parse().ok()),
            owner_type: query.owner_type.as_deref().and_then(|s| s.parse().ok()),
            submitted_from: query.submitted_from,
            submitted_to: query.submitted_to,
            ..ListingFilter::default()
        };
        let page = Page::new(query.page.unwrap_or(1), query.limit.unwrap_or(20));

        let (listings, total) = self.ctx.listing_repo().find_pending(&filter, page).await?;
        Ok(PaginatedResponse::new(
            listings.into_iter().map(ListingResponse::from).collect(),
            page,
            total,
        ))
    }

    /// Everything a reviewer needs for one listing: full content plus the
    /// owner's track record
    #[instrument(skip(self))]
    pub async fn listing_for_review(
        &self,
        listing_id: Snowflake,
    ) -> ServiceResult<ReviewListingResponse> {
        let listing = self
            .ctx
            .listing_repo()
            .find_by_id(listing_id)
            .await?
            .ok_or(DomainError::ListingNotFound(listing_id))?;

        let owner = self
            .ctx
            .user_repo()
            .find_by_id(listing.owner_id)
            .await?
            .ok_or(DomainError::UserNotFound(listing.owner_id))?;
        let (total_listings, approved_listings) =
            self.ctx.listing_repo().owner_counts(listing.owner_id).await?;

        let details = self.ctx.media_repo().find_details(listing_id).await?;
        let media = self.ctx.media_repo().find_media(listing_id).await?;

        Ok(ReviewListingResponse {
            listing: ListingResponse::from(ListingWithAssets {
                listing,
                details,
                media,
            }),
            owner: OwnerSummaryResponse::from(OwnerWithCounts {
                user: owner,
                total_listings,
                approved_listings,
            }),
        })
    }

    /// Approve a PENDING_REVIEW listing
    ///
    /// Stamps the approval, starts the expiry clock, writes the audit entry,
    /// and notifies the owner.
    #[instrument(skip(self))]
    pub async fn approve_listing(
        &self,
        admin_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<ListingResponse> {
        let mut listing = self
            .ctx
            .listing_repo()
            .find_by_id(listing_id)
            .await?
            .ok_or(DomainError::ListingNotFound(listing_id))?;
        if listing.status != ListingStatus::PendingReview {
            return Err(ServiceError::from(DomainError::ListingNotPendingReview));
        }

        let before = json!({ "status": listing.status.as_str() });
        let now = Utc::now();
        listing.approve(now);
        self.ctx.listing_repo().update(&listing).await?;

        let entry = AuditLogEntry::new(
            self.ctx.generate_id(),
            admin_id,
            AuditAction::ListingApproved,
            "listing",
            listing_id,
            before,
            json!({ "status": listing.status.as_str() }),
        );
        self.ctx.audit_log_repo().append(&entry).await?;

        NotificationService::new(self.ctx)
            .notify(
                listing.owner_id,
                NotificationType::ListingApproved,
                "Listing approved",
                format!("Your listing \"{}\" is now live.", listing.title),
                Some(json!({ "listing_id": listing_id.to_string() })),
            )
            .await?;

        info!(listing_id = %listing_id, admin_id = %admin_id, "Listing approved");

        let details = self.ctx.media_repo().find_details(listing_id).await?;
        let media = self.ctx.media_repo().find_media(listing_id).await?;
        Ok(ListingResponse::from(ListingWithAssets {
            listing,
            details,
            media,
        }))
    }

    /// Reject a PENDING_REVIEW listing with a reason the owner will see
    #[instrument(skip(self, request))]
    pub async fn reject_listing(
        &self,
        admin_id: Snowflake,
        listing_id: Snowflake,
        request: RejectListingRequest,
    ) -> ServiceResult<ListingResponse> {
        let reason = request.reason.trim().to_string();
        // Characters, not bytes: Arabic reasons are two bytes per letter
        if reason.chars().count() < 10 {
            return Err(ServiceError::from(DomainError::RejectionReasonTooShort {
                min: 10,
            }));
        }

        let mut listing = self
            .ctx
            .listing_repo()
            .find_by_id(listing_id)
            .await?
            .ok_or(DomainError::ListingNotFound(listing_id))?;
        if listing.status != ListingStatus::PendingReview {
            return Err(ServiceError::from(DomainError::ListingNotPendingReview));
        }

        let before = json!({ "status": listing.status.as_str() });
        listing.reject(reason.clone(), Utc::now());
        self.ctx.listing_repo().update(&listing).await?;

        let entry = AuditLogEntry::new(
            self.ctx.generate_id(),
            admin_id,
            AuditAction::ListingRejected,
            "listing",
            listing_id,
            before,
            json!({ "status": listing.status.as_str(), "reason": reason }),
        );
        self.ctx.audit_log_repo().append(&entry).await?;

        NotificationService::new(self.ctx)
            .notify(
                listing.owner_id,
                NotificationType::ListingRejected,
                "Listing rejected",
                reason,
                Some(json!({ "listing_id": listing_id.to_string() })),
            )
            .await?;

        info!(listing_id = %listing_id, admin_id = %admin_id, "Listing rejected");

        let details = self.ctx.media_repo().find_details(listing_id).await?;
        let media = self.ctx.media_repo().find_media(listing_id).await?;
        Ok(ListingResponse::from(ListingWithAssets {
            listing,
            details,
            media,
        }))
    }

    /// Dashboard counters: queue depth and today's decisions
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<ModerationStatsResponse> {
        let today_start = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        let counts = self.ctx.listing_repo().moderation_counts(today_start).await?;
        Ok(ModerationStatsResponse::from(counts))
    }

    /// The reviewer's recent moderation decisions
    #[instrument(skip(self))]
    pub async fn recent_activity(
        &self,
        admin_id: Snowflake,
    ) -> ServiceResult<Vec<AuditEntryResponse>> {
        let entries = self
            .ctx
            .audit_log_repo()
            .find_by_actor(
                admin_id,
                &[AuditAction::ListingApproved, AuditAction::ListingRejected],
                50,
            )
            .await?;
        Ok(entries.into_iter().map(AuditEntryResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use souq_core::entities::{Listing, ListingType, UserRole};

    use crate::services::test_support::TestHarness;

    fn pending_listing() -> Listing {
        let mut listing = Listing::new_draft(
            Snowflake::new(1),
            Snowflake::new(2),
            UserRole::UserIndividual,
            ListingType::Car,
            "2018 Nissan Patrol".to_string(),
            8_900_000,
        );
        listing.status = ListingStatus::PendingReview;
        listing
    }

    #[tokio::test]
    async fn test_reject_reason_length_counts_characters_not_bytes() {
        let harness = TestHarness::new();
        let listing = pending_listing();
        let listing_id = listing.id;
        let owner_id = listing.owner_id;
        harness.listings.insert(listing);

        let service = ModerationService::new(&harness.ctx);
        let admin = Snowflake::new(50);

        // 8 Arabic letters is 15 bytes; still too short
        let err = service
            .reject_listing(
                admin,
                listing_id,
                RejectListingRequest {
                    reason: "صور سيئة".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::RejectionReasonTooShort { min: 10 })
        ));
        assert!(harness.notifications.all().is_empty());

        // 13 characters clears the minimum
        let reason = "صور غير واضحة".to_string();
        service
            .reject_listing(
                admin,
                listing_id,
                RejectListingRequest {
                    reason: reason.clone(),
                },
            )
            .await
            .unwrap();

        let stored = harness.listings.get(listing_id).unwrap();
        assert_eq!(stored.status, ListingStatus::Rejected);
        assert_eq!(stored.rejection_reason, Some(reason.clone()));

        let notifications = harness.notifications.all();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, owner_id);
        assert_eq!(notifications[0].body, reason);

        let entries = harness.audit.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::ListingRejected);
    }
}
