//! Payment entity <-> model mapper

use souq_core::entities::{PaymentStatus, PaymentTransaction, PaymentType};
use souq_core::value_objects::Snowflake;

use crate::models::PaymentModel;

/// Convert PaymentModel to PaymentTransaction entity
impl From<PaymentModel> for PaymentTransaction {
    fn from(model: PaymentModel) -> Self {
        PaymentTransaction {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            listing_id: model.listing_id.map(Snowflake::new),
            package_id: model.package_id.map(Snowflake::new),
            payment_type: model
                .payment_type
                .parse()
                .unwrap_or(PaymentType::ListingFee),
            amount_fils: model.amount_fils,
            currency: model.currency,
            status: model.status.parse().unwrap_or(PaymentStatus::Pending),
            proof_image_url: model.proof_image_url,
            provider: model.provider,
            provider_ref: model.provider_ref,
            reviewed_by: model.reviewed_by.map(Snowflake::new),
            reviewed_at: model.reviewed_at,
            paid_at: model.paid_at,
            admin_note: model.admin_note,
            metadata: model.metadata,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
