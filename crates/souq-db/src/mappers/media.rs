//! Media entity <-> model mapper

use souq_core::entities::{MediaItem, MediaType};
use souq_core::value_objects::Snowflake;

use crate::models::MediaModel;

/// Convert MediaModel to MediaItem entity
impl From<MediaModel> for MediaItem {
    fn from(model: MediaModel) -> Self {
        MediaItem {
            id: Snowflake::new(model.id),
            listing_id: Snowflake::new(model.listing_id),
            media_type: model.media_type.parse().unwrap_or(MediaType::Image),
            url: model.url,
            public_id: model.public_id,
            sort_order: model.sort_order,
            created_at: model.created_at,
        }
    }
}
