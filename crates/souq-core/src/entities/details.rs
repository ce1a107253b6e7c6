//! Type-specific listing detail records
//!
//! Each listing owns at most one detail record, and its variant must match
//! the listing's `type` tag. Modeled as a sum type so a mismatched attach is
//! unrepresentable past the service boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::listing::ListingType;

/// Car detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDetails {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub trim: Option<String>,
    pub mileage_km: Option<i32>,
    pub transmission: Option<String>,
    pub fuel: Option<String>,
    pub condition: Option<String>,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub body_type: Option<String>,
    pub engine_size: Option<String>,
    pub specs: Option<JsonValue>,
}

/// Motorcycle detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorcycleDetails {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage_km: Option<i32>,
    pub transmission: Option<String>,
    pub condition: Option<String>,
    pub color: Option<String>,
}

/// Number-plate detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateDetails {
    pub plate_number: String,
    pub plate_category: String,
    pub plate_code: Option<String>,
    pub plate_type: Option<String>,
}

/// Spare-part detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDetails {
    pub part_category: String,
    pub part_name: Option<String>,
    pub compatible_car_make: Option<String>,
    pub compatible_car_model: Option<String>,
    pub compatible_year_from: Option<i32>,
    pub compatible_year_to: Option<i32>,
    pub condition: Option<String>,
    pub part_number: Option<String>,
    pub brand: Option<String>,
}

/// The 1:1 dependent detail record, tagged by listing type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingDetails {
    Car(CarDetails),
    Motorcycle(MotorcycleDetails),
    Plate(PlateDetails),
    Part(PartDetails),
}

impl ListingDetails {
    /// The listing type this detail record belongs to
    pub fn kind(&self) -> ListingType {
        match self {
            Self::Car(_) => ListingType::Car,
            Self::Motorcycle(_) => ListingType::Motorcycle,
            Self::Plate(_) => ListingType::Plate,
            Self::Part(_) => ListingType::Part,
        }
    }

    /// Whether this record matches the given listing type
    #[inline]
    pub fn matches(&self, listing_type: ListingType) -> bool {
        self.kind() == listing_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let details = ListingDetails::Plate(PlateDetails {
            plate_number: "1234".to_string(),
            plate_category: "PRIVATE".to_string(),
            plate_code: None,
            plate_type: None,
        });
        assert_eq!(details.kind(), ListingType::Plate);
        assert!(details.matches(ListingType::Plate));
        assert!(!details.matches(ListingType::Car));
    }
}
