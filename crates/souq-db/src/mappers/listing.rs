//! Listing entity <-> model mapper

use souq_core::entities::{Listing, ListingDetails, ListingStatus, ListingType, UserRole};
use souq_core::value_objects::Snowflake;

use crate::models::{ListingDetailsModel, ListingModel};

/// Convert ListingModel to Listing entity
impl From<ListingModel> for Listing {
    fn from(model: ListingModel) -> Self {
        Listing {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            owner_type: model
                .owner_type
                .parse()
                .unwrap_or(UserRole::UserIndividual),
            listing_type: model.listing_type.parse().unwrap_or(ListingType::Car),
            title: model.title,
            description: model.description,
            price_fils: model.price_fils,
            currency: model.currency,
            location_governorate: model.location_governorate,
            location_area: model.location_area,
            contact_preference: model.contact_preference,
            status: model.status.parse().unwrap_or(ListingStatus::Draft),
            rejection_reason: model.rejection_reason,
            posted_at: model.posted_at,
            approved_at: model.approved_at,
            rejected_at: model.rejected_at,
            is_featured: model.is_featured,
            featured_until: model.featured_until,
            views_count: model.views_count,
            favorites_count: model.favorites_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Decode the tagged details document stored for a listing
///
/// Returns None when the stored JSON no longer matches any known payload
/// shape, so one corrupt row cannot poison a whole query.
pub fn details_from_model(model: ListingDetailsModel) -> Option<ListingDetails> {
    serde_json::from_value(model.details).ok()
}
