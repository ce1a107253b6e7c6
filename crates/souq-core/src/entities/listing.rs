//! Listing entity and its status state machine
//!
//! The `status` enum is the single source of truth for a listing's lifecycle;
//! `posted_at` / `approved_at` / `rejected_at` are derived audit stamps that
//! must stay consistent with it. Expiry is derived, never stored: a listing
//! expires `LIFETIME_DAYS` after `posted_at`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

use super::user::UserRole;

/// Category of item being sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingType {
    Car,
    Motorcycle,
    Plate,
    Part,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "CAR",
            Self::Motorcycle => "MOTORCYCLE",
            Self::Plate => "PLATE",
            Self::Part => "PART",
        }
    }
}

impl std::str::FromStr for ListingType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAR" => Ok(Self::Car),
            "MOTORCYCLE" => Ok(Self::Motorcycle),
            "PLATE" => Ok(Self::Plate),
            "PART" => Ok(Self::Part),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Draft,
    PendingReview,
    Approved,
    Rejected,
    Sold,
    Archived,
    Expired,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingReview => "PENDING_REVIEW",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Sold => "SOLD",
            Self::Archived => "ARCHIVED",
            Self::Expired => "EXPIRED",
        }
    }

    /// Owner may mutate title/details/media in these statuses
    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected | Self::Approved)
    }

    /// Submit-for-review is only legal from these statuses
    #[inline]
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    /// Visible on the public site
    #[inline]
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Approved | Self::Sold)
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PENDING_REVIEW" => Ok(Self::PendingReview),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "SOLD" => Ok(Self::Sold),
            "ARCHIVED" => Ok(Self::Archived),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sellable item posted by a user
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub owner_type: UserRole,
    pub listing_type: ListingType,
    pub title: String,
    pub description: Option<String>,
    /// Price in fils (1 BHD = 1000 fils)
    pub price_fils: i64,
    pub currency: String,
    pub location_governorate: Option<String>,
    pub location_area: Option<String>,
    pub contact_preference: String,
    pub status: ListingStatus,
    pub rejection_reason: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub is_featured: bool,
    pub featured_until: Option<DateTime<Utc>>,
    pub views_count: i64,
    pub favorites_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Approved listings live this many days before the sweep expires them
    pub const LIFETIME_DAYS: i64 = 35;

    /// Create a fresh DRAFT listing
    pub fn new_draft(
        id: Snowflake,
        owner_id: Snowflake,
        owner_type: UserRole,
        listing_type: ListingType,
        title: String,
        price_fils: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            owner_type,
            listing_type,
            title,
            description: None,
            price_fils,
            currency: "BHD".to_string(),
            location_governorate: None,
            location_area: None,
            contact_preference: "CALL".to_string(),
            status: ListingStatus::Draft,
            rejection_reason: None,
            posted_at: None,
            approved_at: None,
            rejected_at: None,
            is_featured: false,
            featured_until: None,
            views_count: 0,
            favorites_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Derived expiry instant: `posted_at + LIFETIME_DAYS`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.posted_at.map(|p| p + Duration::days(Self::LIFETIME_DAYS))
    }

    /// Whole days the listing has been live, or None before approval
    pub fn days_live(&self, now: DateTime<Utc>) -> Option<i64> {
        self.posted_at.map(|p| (now - p).num_days())
    }

    /// Stamp an approval: APPROVED, rejection fields cleared, expiry clock
    /// started.
    pub fn approve(&mut self, now: DateTime<Utc>) {
        self.status = ListingStatus::Approved;
        self.approved_at = Some(now);
        self.posted_at = Some(now);
        self.rejected_at = None;
        self.rejection_reason = None;
        self.updated_at = now;
    }

    /// Stamp a rejection with the admin's reason
    pub fn reject(&mut self, reason: String, now: DateTime<Utc>) {
        self.status = ListingStatus::Rejected;
        self.rejected_at = Some(now);
        self.rejection_reason = Some(reason);
        self.updated_at = now;
    }

    /// Revert to DRAFT, clearing whichever review stamps the previous status
    /// carried.
    pub fn revert_to_draft(&mut self, now: DateTime<Utc>) {
        self.status = ListingStatus::Draft;
        self.approved_at = None;
        self.posted_at = None;
        self.rejected_at = None;
        self.rejection_reason = None;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Listing {
        Listing::new_draft(
            Snowflake::new(1),
            Snowflake::new(2),
            UserRole::UserIndividual,
            ListingType::Car,
            "2019 Toyota Camry".to_string(),
            4500_000,
        )
    }

    #[test]
    fn test_new_listing_is_draft_without_stamps() {
        let listing = draft();
        assert_eq!(listing.status, ListingStatus::Draft);
        assert!(listing.posted_at.is_none());
        assert!(listing.expires_at().is_none());
    }

    #[test]
    fn test_approve_starts_expiry_clock() {
        let mut listing = draft();
        let now = Utc::now();
        listing.approve(now);
        assert_eq!(listing.status, ListingStatus::Approved);
        assert_eq!(listing.expires_at(), Some(now + Duration::days(35)));
        assert!(listing.rejection_reason.is_none());
    }

    #[test]
    fn test_reject_then_revert_clears_stamps() {
        let mut listing = draft();
        let now = Utc::now();
        listing.reject("poor photos".to_string(), now);
        assert_eq!(listing.status, ListingStatus::Rejected);
        assert_eq!(listing.rejection_reason.as_deref(), Some("poor photos"));

        listing.revert_to_draft(now);
        assert_eq!(listing.status, ListingStatus::Draft);
        assert!(listing.rejection_reason.is_none());
        assert!(listing.rejected_at.is_none());
    }

    #[test]
    fn test_editable_and_submit_matrix() {
        assert!(ListingStatus::Draft.is_editable());
        assert!(ListingStatus::Rejected.is_editable());
        assert!(ListingStatus::Approved.is_editable());
        assert!(!ListingStatus::PendingReview.is_editable());
        assert!(!ListingStatus::Sold.is_editable());
        assert!(!ListingStatus::Archived.is_editable());
        assert!(!ListingStatus::Expired.is_editable());

        assert!(ListingStatus::Draft.can_submit());
        assert!(ListingStatus::Rejected.can_submit());
        assert!(!ListingStatus::Approved.can_submit());
        assert!(!ListingStatus::PendingReview.can_submit());
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            ListingStatus::Draft,
            ListingStatus::PendingReview,
            ListingStatus::Approved,
            ListingStatus::Rejected,
            ListingStatus::Sold,
            ListingStatus::Archived,
            ListingStatus::Expired,
        ] {
            assert_eq!(status.as_str().parse::<ListingStatus>().unwrap(), status);
        }
    }
}
