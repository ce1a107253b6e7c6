//! Listing media items - an ordered, owned collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Media kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IMAGE" => Ok(Self::Image),
            "VIDEO" => Ok(Self::Video),
            _ => Err(()),
        }
    }
}

/// One uploaded media object attached to a listing
///
/// The upload itself happens against the external storage service; the core
/// only records the resulting URL and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub id: Snowflake,
    pub listing_id: Snowflake,
    pub media_type: MediaType,
    pub url: String,
    /// Storage-provider object key, kept for later deletion
    pub public_id: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}
