//! Subscription and package entity <-> model mappers

use souq_core::entities::{
    FeaturedPackage, Subscription, SubscriptionPackage, SubscriptionStatus,
};
use souq_core::value_objects::Snowflake;

use crate::models::{FeaturedPackageModel, SubscriptionModel, SubscriptionPackageModel};

/// Convert SubscriptionModel to Subscription entity
impl From<SubscriptionModel> for Subscription {
    fn from(model: SubscriptionModel) -> Self {
        Subscription {
            user_id: Snowflake::new(model.user_id),
            package_id: Snowflake::new(model.package_id),
            status: model.status.parse().unwrap_or(SubscriptionStatus::Expired),
            start_date: model.start_date,
            end_date: model.end_date,
            listings_used: model.listings_used,
            paid_amount_fils: model.paid_amount_fils,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert SubscriptionPackageModel to SubscriptionPackage entity
impl From<SubscriptionPackageModel> for SubscriptionPackage {
    fn from(model: SubscriptionPackageModel) -> Self {
        SubscriptionPackage {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            price_monthly_fils: model.price_monthly_fils,
            max_listings: model.max_listings,
            duration_days: model.duration_days,
            sort_order: model.sort_order,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert FeaturedPackageModel to FeaturedPackage entity
impl From<FeaturedPackageModel> for FeaturedPackage {
    fn from(model: FeaturedPackageModel) -> Self {
        FeaturedPackage {
            id: Snowflake::new(model.id),
            name: model.name,
            price_fils: model.price_fils,
            duration_days: model.duration_days,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
