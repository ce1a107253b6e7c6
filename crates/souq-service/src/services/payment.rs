//! Payment service
//!
//! Manual Benefit bank-transfer flow: initiation, proof submission, admin
//! review, and the super-admin mark-paid override. Approval side effects
//! dispatch on the transaction's [`PaymentKind`], so every payment type is
//! handled by an explicit match arm.

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{info, instrument};

use souq_core::entities::{
    NotificationType, PaymentKind, PaymentStatus, PaymentTransaction, PaymentType,
};
use souq_core::traits::Page;
use souq_core::{DomainError, Snowflake, UserRole};

use crate::dto::{
    BankTransferInstructions, BenefitDetailsResponse, MarkPaidRequest, PaginatedResponse,
    PaymentResponse, RejectPaymentRequest, ReviewPaymentRequest, StartFeaturedPaymentRequest,
    StartListingFeePaymentRequest, StartSubscriptionPaymentRequest, StartedPaymentResponse,
    SubmitProofRequest,
};

use souq_core::entities::{AuditAction, AuditLogEntry};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;
use super::subscription::SubscriptionService;

const PROVIDER_BENEFIT: &str = "benefit";

/// Payment service
pub struct PaymentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PaymentService<'a> {
    /// Create a new PaymentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn parse_id(raw: &str, what: &str) -> ServiceResult<Snowflake> {
        raw.parse::<Snowflake>()
            .map_err(|_| ServiceError::validation(format!("Invalid {what} id: {raw}")))
    }

    fn instructions(&self, tx: &PaymentTransaction) -> BankTransferInstructions {
        let benefit = self.ctx.benefit();
        BankTransferInstructions {
            iban: benefit.iban.clone(),
            account_name: benefit.account_name.clone(),
            amount_fils: tx.amount_fils,
            currency: tx.currency.clone(),
            reference: tx.id.to_string(),
        }
    }

    fn new_transaction(
        &self,
        user_id: Snowflake,
        listing_id: Option<Snowflake>,
        package_id: Option<Snowflake>,
        payment_type: PaymentType,
        amount_fils: i64,
        metadata: Option<serde_json::Value>,
    ) -> PaymentTransaction {
        let now = Utc::now();
        PaymentTransaction {
            id: self.ctx.generate_id(),
            user_id,
            listing_id,
            package_id,
            payment_type,
            amount_fils,
            currency: "BHD".to_string(),
            status: PaymentStatus::Pending,
            proof_image_url: None,
            provider: PROVIDER_BENEFIT.to_string(),
            provider_ref: None,
            reviewed_by: None,
            reviewed_at: None,
            paid_at: None,
            admin_note: None,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    async fn load_owned_listing(
        &self,
        listing_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<souq_core::Listing> {
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

    // === Initiation ===

    /// Start a LISTING_FEE transaction for the caller's listing
    #[instrument(skip(self, request))]
    pub async fn start_listing_fee(
        &self,
        user_id: Snowflake,
        request: StartListingFeePaymentRequest,
    ) -> ServiceResult<StartedPaymentResponse> {
        let listing_id = Self::parse_id(&request.listing_id, "listing")?;
        self.load_owned_listing(listing_id, user_id).await?;

        let already_paid = self
            .ctx
            .payment_repo()
            .exists_for_listing(listing_id, PaymentType::ListingFee, &[PaymentStatus::Paid])
            .await?;
        if already_paid {
            return Err(ServiceError::from(DomainError::AlreadyPaid));
        }

        let open = self
            .ctx
            .payment_repo()
            .exists_for_listing(
                listing_id,
                PaymentType::ListingFee,
                &[PaymentStatus::Pending, PaymentStatus::PendingProof],
            )
            .await?;
        if open {
            return Err(ServiceError::from(DomainError::PaymentAlreadyOpen));
        }

        let tx = self.new_transaction(
            user_id,
            Some(listing_id),
            None,
            PaymentType::ListingFee,
            self.ctx.listing_policy().listing_fee_fils,
            None,
        );
        self.ctx.payment_repo().create(&tx).await?;

        info!(transaction_id = %tx.id, listing_id = %listing_id, "Listing fee payment started");
        let instructions = self.instructions(&tx);
        Ok(StartedPaymentResponse {
            payment: PaymentResponse::from(tx),
            instructions,
        })
    }

    /// Start a FEATURED_LISTING transaction
    ///
    /// The package's price and duration are snapshotted into the
    /// transaction, so later package edits cannot change this grant.
    #[instrument(skip(self, request))]
    pub async fn start_featured(
        &self,
        user_id: Snowflake,
        request: StartFeaturedPaymentRequest,
    ) -> ServiceResult<StartedPaymentResponse> {
        let listing_id = Self::parse_id(&request.listing_id, "listing")?;
        let package_id = Self::parse_id(&request.package_id, "package")?;
        self.load_owned_listing(listing_id, user_id).await?;

        let package = self
            .ctx
            .package_repo()
            .find_featured_by_id(package_id)
            .await?
            .ok_or(DomainError::PackageNotFound(package_id))?;
        if !package.is_active {
            return Err(ServiceError::validation("Package is not available"));
        }

        let open = self
            .ctx
            .payment_repo()
            .exists_for_listing(
                listing_id,
                PaymentType::FeaturedListing,
                &[PaymentStatus::Pending, PaymentStatus::PendingProof],
            )
            .await?;
        if open {
            return Err(ServiceError::from(DomainError::PaymentAlreadyOpen));
        }

        let tx = self.new_transaction(
            user_id,
            Some(listing_id),
            Some(package_id),
            PaymentType::FeaturedListing,
            package.price_fils,
            Some(json!({
                "package_name": package.name,
                "duration_days": package.duration_days,
            })),
        );
        self.ctx.payment_repo().create(&tx).await?;

        info!(
            transaction_id = %tx.id,
            listing_id = %listing_id,
            package_id = %package_id,
            "Featured placement payment started"
        );
        let instructions = self.instructions(&tx);
        Ok(StartedPaymentResponse {
            payment: PaymentResponse::from(tx),
            instructions,
        })
    }

    /// Start a SUBSCRIPTION transaction for a showroom account
    ///
    /// Idempotent: an existing open transaction for the same package is
    /// returned instead of creating a second one.
    #[instrument(skip(self, request))]
    pub async fn start_subscription(
        &self,
        user_id: Snowflake,
        role: UserRole,
        request: StartSubscriptionPaymentRequest,
    ) -> ServiceResult<StartedPaymentResponse> {
        if !role.is_merchant() {
            return Err(ServiceError::from(DomainError::NotShowroomAccount));
        }

        let package_id = Self::parse_id(&request.package_id, "package")?;
        let package = self
            .ctx
            .package_repo()
            .find_by_id(package_id)
            .await?
            .ok_or(DomainError::PackageNotFound(package_id))?;
        if !package.is_active {
            return Err(ServiceError::validation("Package is not available"));
        }

        let now = Utc::now();
        if let Some(subscription) = self.ctx.subscription_repo().find_by_user(user_id).await? {
            if subscription.is_usable(now) {
                return Err(ServiceError::from(DomainError::SubscriptionStillActive));
            }
        }

        if let Some(existing) = self
            .ctx
            .payment_repo()
            .find_open_subscription(user_id, package_id)
            .await?
        {
            let instructions = self.instructions(&existing);
            return Ok(StartedPaymentResponse {
                payment: PaymentResponse::from(existing),
                instructions,
            });
        }

        let tx = self.new_transaction(
            user_id,
            None,
            Some(package_id),
            PaymentType::Subscription,
            package.price_monthly_fils,
            Some(json!({
                "package_name": package.name,
                "duration_days": package.duration_days,
                "max_listings": package.max_listings,
            })),
        );
        self.ctx.payment_repo().create(&tx).await?;

        info!(
            transaction_id = %tx.id,
            user_id = %user_id,
            package_id = %package_id,
            "Subscription payment started"
        );
        let instructions = self.instructions(&tx);
        Ok(StartedPaymentResponse {
            payment: PaymentResponse::from(tx),
            instructions,
        })
    }

    // === Proof and review ===

    /// Attach a transfer receipt and queue the transaction for review
    #[instrument(skip(self, request))]
    pub async fn submit_proof(
        &self,
        user_id: Snowflake,
        transaction_id: Snowflake,
        request: SubmitProofRequest,
    ) -> ServiceResult<PaymentResponse> {
        let mut tx = self
            .ctx
            .payment_repo()
            .find_by_id(transaction_id)
            .await?
            .ok_or(DomainError::TransactionNotFound(transaction_id))?;
        if tx.user_id != user_id {
            return Err(ServiceError::from(DomainError::NotTransactionPayer));
        }

        match tx.status {
            PaymentStatus::Pending => {}
            PaymentStatus::PendingProof => {
                return Err(ServiceError::from(DomainError::ProofAlreadySubmitted));
            }
            PaymentStatus::Paid => return Err(ServiceError::from(DomainError::AlreadyPaid)),
            PaymentStatus::Failed | PaymentStatus::Refunded => {
                return Err(ServiceError::from(DomainError::NotAwaitingReview));
            }
        }

        tx.status = PaymentStatus::PendingProof;
        tx.proof_image_url = Some(request.proof_image_url);
        tx.updated_at = Utc::now();
        self.ctx.payment_repo().update(&tx).await?;

        NotificationService::new(self.ctx)
            .notify_admins(
                NotificationType::PaymentProofSubmitted,
                "Payment proof submitted",
                format!(
                    "Transaction {} ({}) is awaiting review.",
                    tx.id,
                    tx.payment_type.as_str()
                ),
                Some(json!({ "transaction_id": tx.id.to_string() })),
            )
            .await?;

        info!(transaction_id = %tx.id, "Payment proof submitted");
        Ok(PaymentResponse::from(tx))
    }

    /// Approve a reviewed transaction and apply its side effect
    #[instrument(skip(self, request))]
    pub async fn approve_payment(
        &self,
        admin_id: Snowflake,
        transaction_id: Snowflake,
        request: ReviewPaymentRequest,
    ) -> ServiceResult<PaymentResponse> {
        let mut tx = self
            .ctx
            .payment_repo()
            .find_by_id(transaction_id)
            .await?
            .ok_or(DomainError::TransactionNotFound(transaction_id))?;

        match tx.status {
            PaymentStatus::PendingProof => {}
            PaymentStatus::Paid => return Err(ServiceError::from(DomainError::AlreadyPaid)),
            _ => return Err(ServiceError::from(DomainError::NotAwaitingReview)),
        }

        // Resolve the side effect before mutating anything; a corrupt
        // transaction fails the whole review.
        let kind = tx.kind()?;

        let before = json!({ "status": tx.status.as_str() });
        let now = Utc::now();
        tx.status = PaymentStatus::Paid;
        tx.reviewed_by = Some(admin_id);
        tx.reviewed_at = Some(now);
        tx.paid_at = Some(now);
        tx.admin_note = request.admin_note;
        tx.updated_at = now;
        self.ctx.payment_repo().update(&tx).await?;

        let entry = AuditLogEntry::new(
            self.ctx.generate_id(),
            admin_id,
            AuditAction::PaymentApproved,
            "payment_transaction",
            tx.id,
            before,
            json!({ "status": tx.status.as_str() }),
        );
        self.ctx.audit_log_repo().append(&entry).await?;

        let notifications = NotificationService::new(self.ctx);
        match kind {
            PaymentKind::ListingFee { listing_id } => {
                notifications
                    .notify(
                        tx.user_id,
                        NotificationType::PaymentApproved,
                        "Payment approved",
                        "Your listing fee payment was approved.",
                        Some(json!({ "listing_id": listing_id.to_string() })),
                    )
                    .await?;
            }
            PaymentKind::FeaturedListing {
                listing_id,
                duration_days,
            } => {
                let mut listing = self
                    .ctx
                    .listing_repo()
                    .find_by_id(listing_id)
                    .await?
                    .ok_or(DomainError::ListingNotFound(listing_id))?;
                listing.is_featured = true;
                listing.featured_until = Some(now + Duration::days(duration_days));
                listing.updated_at = now;
                self.ctx.listing_repo().update(&listing).await?;

                notifications
                    .notify(
                        tx.user_id,
                        NotificationType::PaymentApproved,
                        "Payment approved",
                        format!("Your listing is featured for {duration_days} days."),
                        Some(json!({ "listing_id": listing_id.to_string() })),
                    )
                    .await?;
            }
            PaymentKind::Subscription {
                package_id,
                duration_days,
            } => {
                SubscriptionService::new(self.ctx)
                    .activate(tx.user_id, package_id, duration_days, tx.amount_fils)
                    .await?;

                notifications
                    .notify(
                        tx.user_id,
                        NotificationType::SubscriptionActivated,
                        "Subscription activated",
                        format!("Your subscription is active for {duration_days} days."),
                        Some(json!({ "package_id": package_id.to_string() })),
                    )
                    .await?;
            }
        }

        info!(transaction_id = %tx.id, admin_id = %admin_id, "Payment approved");
        Ok(PaymentResponse::from(tx))
    }

    /// Reject a reviewed transaction; the note is relayed to the payer
    #[instrument(skip(self, request))]
    pub async fn reject_payment(
        &self,
        admin_id: Snowflake,
        transaction_id: Snowflake,
        request: RejectPaymentRequest,
    ) -> ServiceResult<PaymentResponse> {
        let mut tx = self
            .ctx
            .payment_repo()
            .find_by_id(transaction_id)
            .await?
            .ok_or(DomainError::TransactionNotFound(transaction_id))?;

        match tx.status {
            PaymentStatus::PendingProof => {}
            PaymentStatus::Paid => return Err(ServiceError::from(DomainError::AlreadyPaid)),
            _ => return Err(ServiceError::from(DomainError::NotAwaitingReview)),
        }

        let before = json!({ "status": tx.status.as_str() });
        let now = Utc::now();
        tx.status = PaymentStatus::Failed;
        tx.reviewed_by = Some(admin_id);
        tx.reviewed_at = Some(now);
        tx.admin_note = Some(request.admin_note.clone());
        tx.updated_at = now;
        self.ctx.payment_repo().update(&tx).await?;

        let entry = AuditLogEntry::new(
            self.ctx.generate_id(),
            admin_id,
            AuditAction::PaymentRejected,
            "payment_transaction",
            tx.id,
            before,
            json!({ "status": tx.status.as_str(), "note": request.admin_note }),
        );
        self.ctx.audit_log_repo().append(&entry).await?;

        NotificationService::new(self.ctx)
            .notify(
                tx.user_id,
                NotificationType::PaymentRejected,
                "Payment rejected",
                request.admin_note,
                Some(json!({ "transaction_id": tx.id.to_string() })),
            )
            .await?;

        info!(transaction_id = %tx.id, admin_id = %admin_id, "Payment rejected");
        Ok(PaymentResponse::from(tx))
    }

    /// Super-admin override: record a transaction as paid out of band
    ///
    /// Intentionally applies no side effect and sends no notification; it
    /// only reconciles the ledger for money that moved outside the normal
    /// review flow.
    #[instrument(skip(self, request))]
    pub async fn mark_paid(
        &self,
        admin_id: Snowflake,
        transaction_id: Snowflake,
        request: MarkPaidRequest,
    ) -> ServiceResult<PaymentResponse> {
        let mut tx = self
            .ctx
            .payment_repo()
            .find_by_id(transaction_id)
            .await?
            .ok_or(DomainError::TransactionNotFound(transaction_id))?;
        if tx.status == PaymentStatus::Paid {
            return Err(ServiceError::from(DomainError::AlreadyPaid));
        }

        let before = json!({ "status": tx.status.as_str() });
        let now = Utc::now();
        tx.status = PaymentStatus::Paid;
        tx.reviewed_by = Some(admin_id);
        tx.reviewed_at = Some(now);
        tx.paid_at = Some(now);
        tx.provider_ref = Some(
            request
                .provider_ref
                .unwrap_or_else(|| format!("MANUAL_{}", now.timestamp())),
        );
        tx.updated_at = now;
        self.ctx.payment_repo().update(&tx).await?;

        let entry = AuditLogEntry::new(
            self.ctx.generate_id(),
            admin_id,
            AuditAction::PaymentMarkedPaid,
            "payment_transaction",
            tx.id,
            before,
            json!({
                "status": tx.status.as_str(),
                "provider_ref": tx.provider_ref,
            }),
        );
        self.ctx.audit_log_repo().append(&entry).await?;

        info!(transaction_id = %tx.id, admin_id = %admin_id, "Payment marked paid");
        Ok(PaymentResponse::from(tx))
    }

    // === Queries ===

    /// The caller's transactions, newest first
    #[instrument(skip(self))]
    pub async fn my_payments(&self, user_id: Snowflake) -> ServiceResult<Vec<PaymentResponse>> {
        let transactions = self.ctx.payment_repo().find_by_user(user_id).await?;
        Ok(transactions.into_iter().map(PaymentResponse::from).collect())
    }

    /// Transactions for one of the caller's listings
    #[instrument(skip(self))]
    pub async fn listing_payments(
        &self,
        user_id: Snowflake,
        listing_id: Snowflake,
    ) -> ServiceResult<Vec<PaymentResponse>> {
        self.load_owned_listing(listing_id, user_id).await?;
        let transactions = self.ctx.payment_repo().find_by_listing(listing_id).await?;
        Ok(transactions.into_iter().map(PaymentResponse::from).collect())
    }

    /// Transactions awaiting review, oldest proof first (admin)
    #[instrument(skip(self))]
    pub async fn review_queue(&self) -> ServiceResult<Vec<PaymentResponse>> {
        let transactions = self.ctx.payment_repo().find_pending_proof().await?;
        Ok(transactions.into_iter().map(PaymentResponse::from).collect())
    }

    /// All transactions, newest first (admin)
    #[instrument(skip(self))]
    pub async fn all_payments(
        &self,
        page: Page,
    ) -> ServiceResult<PaginatedResponse<PaymentResponse>> {
        let (transactions, total) = self.ctx.payment_repo().find_all(page).await?;
        Ok(PaginatedResponse::new(
            transactions.into_iter().map(PaymentResponse::from).collect(),
            page,
            total,
        ))
    }

    /// The marketplace's transfer coordinates
    pub fn benefit_details(&self) -> BenefitDetailsResponse {
        let benefit = self.ctx.benefit();
        BenefitDetailsResponse {
            iban: benefit.iban.clone(),
            account_name: benefit.account_name.clone(),
        }
    }
}
