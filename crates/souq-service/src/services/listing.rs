//! Listing service
//!
//! Owner-facing listing lifecycle: drafts, edits, submission for review,
//! sold/archive transitions, media ordering, and favorites. Moderation
//! decisions live in the moderation service.

use chrono::Utc;
use tracing::{info, instrument};

use souq_common::config::ListingPolicyConfig;
use serde_json::json;
use souq_core::entities::{
    Listing, ListingDetails, ListingStatus, ListingType, NotificationType, PaymentStatus,
    PaymentType, UserRole,
};
use souq_core::traits::{ListingFilter, Page};
use souq_core::{DomainError, Snowflake};

use crate::dto::{
    CreateListingRequest, FavoriteStatusResponse, ListingQuery, ListingResponse,
    ListingWithAssets, MediaResponse, PaginatedResponse, PostingGateResponse,
    ReorderMediaRequest, UpdateListingRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;
use super::subscription::SubscriptionService;

/// Everything the completeness check needs about one listing
#[derive(Debug)]
pub struct SubmissionBundle<'a> {
    pub listing: &'a Listing,
    pub details: Option<&'a ListingDetails>,
    pub image_count: i64,
    pub fee_paid: bool,
    pub gate: &'a PostingGateResponse,
}

/// Collect every defect blocking submission, in checklist order
///
/// Pure over the bundle: all defects are reported at once so the user fixes
/// the listing in one pass instead of replaying submit.
pub fn completeness_defects(
    bundle: &SubmissionBundle<'_>,
    policy: &ListingPolicyConfig,
) -> Vec<String> {
    let mut errors = Vec::new();
    let listing = bundle.listing;

    if listing.title.trim().len() < 5 {
        errors.push("Title must be at least 5 characters".to_string());
    }
    if listing.price_fils <= 0 {
        errors.push("Price must be greater than 0".to_string());
    }
    if listing
        .location_governorate
        .as_deref()
        .is_none_or(|g| g.trim().is_empty())
    {
        errors.push("Location governorate is required".to_string());
    }

    match bundle.details {
        None => {
            errors.push(format!(
                "{} details are required",
                type_label(listing.listing_type)
            ));
        }
        Some(details) if !details.matches(listing.listing_type) => {
            errors.push("Details do not match the listing type".to_string());
        }
        Some(ListingDetails::Car(car)) => {
            if car.make.trim().is_empty() {
                errors.push("Car make is required".to_string());
            }
            if car.model.trim().is_empty() {
                errors.push("Car model is required".to_string());
            }
            if car.year <= 1900 {
                errors.push("Car year is invalid".to_string());
            }
        }
        Some(ListingDetails::Motorcycle(bike)) => {
            if bike.make.trim().is_empty() {
                errors.push("Motorcycle make is required".to_string());
            }
            if bike.model.trim().is_empty() {
                errors.push("Motorcycle model is required".to_string());
            }
            if bike.year <= 1900 {
                errors.push("Motorcycle year is invalid".to_string());
            }
        }
        Some(ListingDetails::Plate(plate)) => {
            if plate.plate_number.trim().is_empty() {
                errors.push("Plate number is required".to_string());
            }
            if plate.plate_category.trim().is_empty() {
                errors.push("Plate category is required".to_string());
            }
        }
        Some(ListingDetails::Part(part)) => {
            if part.part_category.trim().is_empty() {
                errors.push("Part category is required".to_string());
            }
        }
    }

    if listing.listing_type == ListingType::Car && bundle.image_count < policy.min_images_for_car {
        errors.push(format!(
            "Car listings require at least {} photos",
            policy.min_images_for_car
        ));
    }

    if policy.require_payment_for_car_listing
        && listing.listing_type == ListingType::Car
        && !bundle.fee_paid
    {
        errors.push("Listing fee payment is required".to_string());
    }

    if let Some(reason) = &bundle.gate.reason {
        errors.push(reason.clone());
    }

    errors
}

fn type_label(listing_type: ListingType) -> &'static str {
    match listing_type {
        ListingType::Car => "Car",
        ListingType::Motorcycle => "Motorcycle",
        ListingType::Plate => "Plate",
        ListingType::Part => "Part",
    }
}

/// Listing service
pub struct ListingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ListingService<'a> {
    /// Create a new ListingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load_owned(&self, listing_id: Snowflake, user_id: Snowflake) -> ServiceResult<Listing> {
        let listing = self
            .ctx
            .listing_repo()
            .find_by_id(listing_id)
            .await?
            .ok_or(DomainError::ListingNotFound(listing_id))?;
        if listing.owner_id != user_id {
            return Err(ServiceError::from(DomainError::NotListingOwner));
        }
        Ok(listing)
    }

    async fn assemble(&self, listing: Listing) -> ServiceResult<ListingResponse> {
        let details = self.ctx.media_repo().find_details(listing.id).await?;
        let media = self.ctx.media_repo().find_media(listing.id).await?;
        Ok(ListingResponse::from(ListingWithAssets {
            listing,
            details,
            media,
        }))
    }

    /// Create a new DRAFT listing
    #[instrument(skip(self, request))]
    pub async fn create_listing(
        &self,
        user_id: Snowflake,
        role: UserRole,
        request: CreateListingRequest,
    ) -> ServiceResult<ListingResponse> {
        let mut listing = Listing::new_draft(
            self.ctx.generate_id(),
            user_id,
            role,
            request.listing_type,
            request.title,
            request.price_fils,
        );
        listing.description = request.description;
        listing.location_governorate = request.location_governorate;
        listing.location_area = request.location_area;
        if let Some(contact) = request.contact_preference {
            listing.contact_preference = contact;
        }

        self.ctx.listing_repo().create(&listing).await?;

        info!(
            listing_id = %listing.id,
            owner_id = %user_id,
            listing_type = %listing.listing_type,
            "Listing created"
        );
        self.assemble(listing).await
    }

    /// Update listing fields
    ///
    /// Editing an APPROVED or REJECTED listing reverts it to DRAFT: the
    /// changed content must go through review again.
    #[instrument(skip(self, request))]
    pub async fn update_listing(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
        request: UpdateListingRequest,
    ) -> ServiceResult<ListingResponse> {
        let mut listing = self.load_owned(listing_id, user_id).await?;
        if !listing.status.is_editable() {
            return Err(ServiceError::from(DomainError::ListingNotEditable));
        }

        let now = Utc::now();
        if listing.status != ListingStatus::Draft {
            listing.revert_to_draft(now);
        }

        if let Some(title) = request.title {
            listing.title = title;
        }
        if let Some(description) = request.description {
            listing.description = Some(description);
        }
        if let Some(price) = request.price_fils {
            listing.price_fils = price;
        }
        if let Some(governorate) = request.location_governorate {
            listing.location_governorate = Some(governorate);
        }
        if let Some(area) = request.location_area {
            listing.location_area = Some(area);
        }
        if let Some(contact) = request.contact_preference {
            listing.contact_preference = contact;
        }
        listing.updated_at = now;

        self.ctx.listing_repo().update(&listing).await?;

        info!(listing_id = %listing.id, status = %listing.status, "Listing updated");
        self.assemble(listing).await
    }

    /// Insert-or-replace the listing's detail record
    ///
    /// The detail variant must match the listing type. Same revert rule as
    /// field edits.
    #[instrument(skip(self, details))]
    pub async fn upsert_details(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
        details: ListingDetails,
    ) -> ServiceResult<ListingResponse> {
        let mut listing = self.load_owned(listing_id, user_id).await?;
        if !listing.status.is_editable() {
            return Err(ServiceError::from(DomainError::ListingNotEditable));
        }
        if !details.matches(listing.listing_type) {
            return Err(ServiceError::from(DomainError::DetailTypeMismatch {
                expected: listing.listing_type.as_str(),
            }));
        }

        let now = Utc::now();
        if listing.status != ListingStatus::Draft {
            listing.revert_to_draft(now);
        }
        listing.updated_at = now;

        self.ctx.media_repo().upsert_details(listing_id, &details).await?;
        self.ctx.listing_repo().update(&listing).await?;

        self.assemble(listing).await
    }

    /// Submit a listing for review
    ///
    /// Runs the full completeness checklist and reports every defect at
    /// once. A showroom's first submission of a listing claims one quota
    /// slot; resubmitting after rejection does not claim another.
    #[instrument(skip(self))]
    pub async fn submit_listing(
        &self,
        user_id: Snowflake,
        role: UserRole,
        listing_id: Snowflake,
    ) -> ServiceResult<ListingResponse> {
        let mut listing = self.load_owned(listing_id, user_id).await?;
        if !listing.status.can_submit() {
            return Err(ServiceError::from(DomainError::ListingNotSubmittable));
        }

        let details = self.ctx.media_repo().find_details(listing_id).await?;
        let image_count = self.ctx.media_repo().count_images(listing_id).await?;
        let fee_paid = self
            .ctx
            .payment_repo()
            .exists_for_listing(listing_id, PaymentType::ListingFee, &[PaymentStatus::Paid])
            .await?;

        let subscriptions = SubscriptionService::new(self.ctx);
        let gate = subscriptions.posting_gate(user_id, role).await?;

        let bundle = SubmissionBundle {
            listing: &listing,
            details: details.as_ref(),
            image_count,
            fee_paid,
            gate: &gate,
        };
        let errors = completeness_defects(&bundle, self.ctx.listing_policy());
        if !errors.is_empty() {
            return Err(ServiceError::from(DomainError::ListingIncomplete { errors }));
        }

        let first_submission = listing.status == ListingStatus::Draft;
        if first_submission {
            subscriptions.consume_slot(user_id, role).await?;
        }

        listing.status = ListingStatus::PendingReview;
        listing.updated_at = Utc::now();
        self.ctx.listing_repo().update(&listing).await?;

        NotificationService::new(self.ctx)
            .notify_admins(
                NotificationType::ListingSubmitted,
                "Listing submitted for review",
                format!(
                    "\"{}\" ({}) is awaiting moderation.",
                    listing.title,
                    listing.listing_type.as_str()
                ),
                Some(json!({ "listing_id": listing.id.to_string() })),
            )
            .await?;

        info!(
            listing_id = %listing.id,
            owner_id = %user_id,
            first_submission,
            "Listing submitted for review"
        );
        self.assemble(listing).await
    }

    /// Mark an APPROVED listing as sold
    #[instrument(skip(self))]
    pub async fn mark_sold(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<ListingResponse> {
        let mut listing = self.load_owned(listing_id, user_id).await?;
        if listing.status != ListingStatus::Approved {
            return Err(ServiceError::from(DomainError::ListingNotApproved));
        }

        listing.status = ListingStatus::Sold;
        listing.updated_at = Utc::now();
        self.ctx.listing_repo().update(&listing).await?;

        info!(listing_id = %listing.id, "Listing marked sold");
        self.assemble(listing).await
    }

    /// Archive a listing (the owner-facing delete)
    #[instrument(skip(self))]
    pub async fn archive_listing(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<()> {
        let mut listing = self.load_owned(listing_id, user_id).await?;

        listing.status = ListingStatus::Archived;
        listing.updated_at = Utc::now();
        self.ctx.listing_repo().update(&listing).await?;

        info!(listing_id = %listing.id, "Listing archived");
        Ok(())
    }

    /// The caller's listings, newest-updated first
    #[instrument(skip(self, query))]
    pub async fn my_listings(
        &self,
        user_id: Snowflake,
        query: ListingQuery,
    ) -> ServiceResult<PaginatedResponse<ListingResponse>> {
        let filter = ListingFilter {
            status: query.status.as_deref().and_then(|s| s.parse().ok()),
            listing_type: query.listing_type.as_deref().and_then(|s| s.parse().ok()),
            ..ListingFilter::default()
        };
        let page = Page::new(query.page.unwrap_or(1), query.limit.unwrap_or(20));

        let (listings, total) = self
            .ctx
            .listing_repo()
            .find_by_owner(user_id, &filter, page)
            .await?;
        Ok(PaginatedResponse::new(
            listings.into_iter().map(ListingResponse::from).collect(),
            page,
            total,
        ))
    }

    /// One of the caller's listings, with details and media
    #[instrument(skip(self))]
    pub async fn my_listing(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<ListingResponse> {
        let listing = self.load_owned(listing_id, user_id).await?;
        self.assemble(listing).await
    }

    /// Public listing view; bumps the view counter
    ///
    /// Non-public statuses read as not found so drafts and rejected
    /// listings never leak.
    #[instrument(skip(self))]
    pub async fn get_public_listing(&self, listing_id: Snowflake) -> ServiceResult<ListingResponse> {
        let mut listing = self
            .ctx
            .listing_repo()
            .find_by_id(listing_id)
            .await?
            .ok_or(DomainError::ListingNotFound(listing_id))?;
        if !listing.status.is_public() {
            return Err(ServiceError::from(DomainError::ListingNotFound(listing_id)));
        }

        self.ctx.listing_repo().increment_views(listing_id).await?;
        listing.views_count += 1;

        self.assemble(listing).await
    }

    /// Media attached to one of the caller's listings
    #[instrument(skip(self))]
    pub async fn listing_media(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<Vec<MediaResponse>> {
        let listing = self.load_owned(listing_id, user_id).await?;
        let media = self.ctx.media_repo().find_media(listing.id).await?;
        Ok(media.into_iter().map(MediaResponse::from).collect())
    }

    /// Apply a new media order
    #[instrument(skip(self, request))]
    pub async fn reorder_media(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
        request: ReorderMediaRequest,
    ) -> ServiceResult<Vec<MediaResponse>> {
        let listing = self.load_owned(listing_id, user_id).await?;
        if !listing.status.is_editable() {
            return Err(ServiceError::from(DomainError::ListingNotEditable));
        }

        let mut ordered_ids = Vec::with_capacity(request.media_ids.len());
        for raw in &request.media_ids {
            let id = raw
                .parse::<Snowflake>()
                .map_err(|_| ServiceError::validation(format!("Invalid media id: {raw}")))?;
            ordered_ids.push(id);
        }

        self.ctx
            .media_repo()
            .reorder_media(listing_id, &ordered_ids)
            .await?;

        let media = self.ctx.media_repo().find_media(listing_id).await?;
        Ok(media.into_iter().map(MediaResponse::from).collect())
    }

    // === Favorites ===

    /// Favorite a public listing (idempotent)
    #[instrument(skip(self))]
    pub async fn add_favorite(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<FavoriteStatusResponse> {
        let listing = self
            .ctx
            .listing_repo()
            .find_by_id(listing_id)
            .await?
            .ok_or(DomainError::ListingNotFound(listing_id))?;
        if !listing.status.is_public() {
            return Err(ServiceError::from(DomainError::ListingNotFound(listing_id)));
        }

        self.ctx.favorite_repo().add(user_id, listing_id).await?;
        Ok(FavoriteStatusResponse { favorited: true })
    }

    /// Remove a favorite (idempotent)
    #[instrument(skip(self))]
    pub async fn remove_favorite(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<FavoriteStatusResponse> {
        self.ctx.favorite_repo().remove(user_id, listing_id).await?;
        Ok(FavoriteStatusResponse { favorited: false })
    }

    /// Whether the caller has favorited a listing
    #[instrument(skip(self))]
    pub async fn favorite_status(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<FavoriteStatusResponse> {
        let favorited = self.ctx.favorite_repo().exists(user_id, listing_id).await?;
        Ok(FavoriteStatusResponse { favorited })
    }

    /// Listings the caller has favorited, newest favorite first
    #[instrument(skip(self))]
    pub async fn my_favorites(
        &self,
        user_id: Snowflake,
        page: Page,
    ) -> ServiceResult<PaginatedResponse<ListingResponse>> {
        let (listings, total) = self.ctx.favorite_repo().find_listings(user_id, page).await?;
        Ok(PaginatedResponse::new(
            listings.into_iter().map(ListingResponse::from).collect(),
            page,
            total,
        ))
    }
}
