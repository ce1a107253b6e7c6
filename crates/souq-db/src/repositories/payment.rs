//! PostgreSQL implementation of PaymentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use souq_core::entities::{PaymentStatus, PaymentTransaction, PaymentType};
use souq_core::traits::{Page, PaymentRepository, RepoResult};
use souq_core::value_objects::Snowflake;

use crate::models::PaymentModel;

use super::error::{map_db_error, transaction_not_found};

const PAYMENT_COLUMNS: &str = r"id, user_id, listing_id, package_id, payment_type, amount_fils,
       currency, status, proof_image_url, provider, provider_ref, reviewed_by,
       reviewed_at, paid_at, admin_note, metadata, created_at, updated_at";

/// PostgreSQL implementation of PaymentRepository
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new PgPaymentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<PaymentTransaction>> {
        let result = sqlx::query_as::<_, PaymentModel>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payment_transactions WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PaymentTransaction::from))
    }

    #[instrument(skip(self, transaction))]
    async fn create(&self, transaction: &PaymentTransaction) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO payment_transactions (id, user_id, listing_id, package_id, payment_type,
                                              amount_fils, currency, status, provider, metadata,
                                              created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(transaction.id.into_inner())
        .bind(transaction.user_id.into_inner())
        .bind(transaction.listing_id.map(Snowflake::into_inner))
        .bind(transaction.package_id.map(Snowflake::into_inner))
        .bind(transaction.payment_type.as_str())
        .bind(transaction.amount_fils)
        .bind(&transaction.currency)
        .bind(transaction.status.as_str())
        .bind(&transaction.provider)
        .bind(transaction.metadata.as_ref())
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, transaction))]
    async fn update(&self, transaction: &PaymentTransaction) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE payment_transactions
            SET status = $2, proof_image_url = $3, provider_ref = $4, reviewed_by = $5,
                reviewed_at = $6, paid_at = $7, admin_note = $8, updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(transaction.id.into_inner())
        .bind(transaction.status.as_str())
        .bind(transaction.proof_image_url.as_deref())
        .bind(transaction.provider_ref.as_deref())
        .bind(transaction.reviewed_by.map(Snowflake::into_inner))
        .bind(transaction.reviewed_at)
        .bind(transaction.paid_at)
        .bind(transaction.admin_note.as_deref())
        .bind(transaction.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(transaction_not_found(transaction.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists_for_listing(
        &self,
        listing_id: Snowflake,
        payment_type: PaymentType,
        statuses: &[PaymentStatus],
    ) -> RepoResult<bool> {
        let status_strs: Vec<String> = statuses
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM payment_transactions
                WHERE listing_id = $1 AND payment_type = $2 AND status = ANY($3)
            )
            ",
        )
        .bind(listing_id.into_inner())
        .bind(payment_type.as_str())
        .bind(status_strs)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn find_open_subscription(
        &self,
        user_id: Snowflake,
        package_id: Snowflake,
    ) -> RepoResult<Option<PaymentTransaction>> {
        let result = sqlx::query_as::<_, PaymentModel>(&format!(
            r"
            SELECT {PAYMENT_COLUMNS}
            FROM payment_transactions
            WHERE user_id = $1
              AND package_id = $2
              AND payment_type = 'SUBSCRIPTION'
              AND status IN ('PENDING', 'PENDING_PROOF')
            ORDER BY created_at DESC
            LIMIT 1
            "
        ))
        .bind(user_id.into_inner())
        .bind(package_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PaymentTransaction::from))
    }

    #[instrument(skip(self))]
    async fn find_pending_proof(&self) -> RepoResult<Vec<PaymentTransaction>> {
        let models = sqlx::query_as::<_, PaymentModel>(&format!(
            r"
            SELECT {PAYMENT_COLUMNS}
            FROM payment_transactions
            WHERE status = 'PENDING_PROOF'
            ORDER BY updated_at ASC
            "
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(PaymentTransaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_all(&self, page: Page) -> RepoResult<(Vec<PaymentTransaction>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payment_transactions")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let models = sqlx::query_as::<_, PaymentModel>(&format!(
            r"
            SELECT {PAYMENT_COLUMNS}
            FROM payment_transactions
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((
            models.into_iter().map(PaymentTransaction::from).collect(),
            total,
        ))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<PaymentTransaction>> {
        let models = sqlx::query_as::<_, PaymentModel>(&format!(
            r"
            SELECT {PAYMENT_COLUMNS}
            FROM payment_transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(PaymentTransaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_listing(&self, listing_id: Snowflake) -> RepoResult<Vec<PaymentTransaction>> {
        let models = sqlx::query_as::<_, PaymentModel>(&format!(
            r"
            SELECT {PAYMENT_COLUMNS}
            FROM payment_transactions
            WHERE listing_id = $1
            ORDER BY created_at DESC
            "
        ))
        .bind(listing_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(PaymentTransaction::from).collect())
    }
}
