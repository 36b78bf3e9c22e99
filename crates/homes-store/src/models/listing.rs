//! Listing model.
//!
//! A listing is a single real-estate record in the catalog. The search engine
//! only ever reads listings; they are created, updated and deleted by the
//! listing store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A real-estate listing in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// The unique identifier for the listing.
    pub id: String,

    /// Headline shown on the listing card.
    pub title: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Street address, including city and region.
    pub address: String,

    /// Asking price in whole currency units.
    pub price: u64,

    /// Property type (e.g., "House", "Condo"). Open-ended.
    pub property_type: String,

    /// Number of bedrooms.
    #[serde(default)]
    pub bedrooms: u32,

    /// Number of bathrooms; half baths are expressed as fractions.
    #[serde(default)]
    pub bathrooms: f64,

    /// Interior living area in square feet.
    #[serde(default)]
    pub square_feet: u32,

    /// Year of construction.
    #[serde(default)]
    pub year_built: i32,

    /// When the listing entered the catalog.
    pub listed_date: DateTime<Utc>,

    /// Image URIs in display order.
    #[serde(default)]
    pub images: Vec<String>,

    /// Amenities and features (e.g., "Pool", "Garage").
    #[serde(default)]
    pub features: Vec<String>,

    /// Map position of the property.
    #[serde(default)]
    pub coordinates: Coordinates,
}

impl Listing {
    /// Returns true if the listing advertises the given feature (exact match).
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// Input for creating a listing. The store assigns the identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    pub price: u64,
    pub property_type: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub square_feet: u32,
    #[serde(default)]
    pub year_built: i32,
    /// Defaults to the creation time when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub coordinates: Coordinates,
}

/// Partial update for a listing. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Record for Listing {
    const RESOURCE: &'static str = "listing";
    const COLLECTION: &'static str = "listings";

    type Draft = NewListing;
    type Patch = ListingPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewListing) -> Self {
        Listing {
            id,
            title: draft.title,
            description: draft.description,
            address: draft.address,
            price: draft.price,
            property_type: draft.property_type,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            square_feet: draft.square_feet,
            year_built: draft.year_built,
            listed_date: draft.listed_date.unwrap_or_else(Utc::now),
            images: draft.images,
            features: draft.features,
            coordinates: draft.coordinates,
        }
    }

    fn apply_patch(&mut self, patch: ListingPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(property_type) = patch.property_type {
            self.property_type = property_type;
        }
        if let Some(bedrooms) = patch.bedrooms {
            self.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = patch.bathrooms {
            self.bathrooms = bathrooms;
        }
        if let Some(square_feet) = patch.square_feet {
            self.square_feet = square_feet;
        }
        if let Some(year_built) = patch.year_built {
            self.year_built = year_built;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(features) = patch.features {
            self.features = features;
        }
        if let Some(coordinates) = patch.coordinates {
            self.coordinates = coordinates;
        }
    }

    fn validate_draft(draft: &NewListing) -> crate::Result<()> {
        if draft.title.trim().is_empty() {
            return Err(crate::StoreError::validation("title", "must not be empty"));
        }
        if draft.bathrooms < 0.0 || !draft.bathrooms.is_finite() {
            return Err(crate::StoreError::validation(
                "bathrooms",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewListing {
        NewListing {
            title: "Lake House".to_string(),
            address: "123 Lake Street".to_string(),
            price: 300_000,
            property_type: "House".to_string(),
            bedrooms: 3,
            bathrooms: 2.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_listing_deserializes_camel_case() {
        let json = r#"{
            "id": "1",
            "title": "Modern Loft",
            "description": "Open plan",
            "address": "1 Main St",
            "price": 450000,
            "propertyType": "Condo",
            "bedrooms": 2,
            "bathrooms": 1.5,
            "squareFeet": 900,
            "yearBuilt": 2012,
            "listedDate": "2024-01-15T00:00:00Z",
            "images": ["a.jpg"],
            "features": ["Gym"],
            "coordinates": {"lat": 40.7, "lng": -74.0}
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.property_type, "Condo");
        assert_eq!(listing.square_feet, 900);
        assert_eq!(listing.bathrooms, 1.5);
        assert_eq!(listing.coordinates.lng, -74.0);
        assert!(listing.has_feature("Gym"));
        assert!(!listing.has_feature("gym"));
    }

    #[test]
    fn test_listing_optional_fields_default() {
        let json = r#"{
            "id": "2",
            "title": "Plot",
            "address": "Rural Rd",
            "price": 1000,
            "propertyType": "Land",
            "listedDate": "2024-01-15T00:00:00Z"
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.images.is_empty());
        assert!(listing.features.is_empty());
        assert_eq!(listing.bedrooms, 0);
        assert_eq!(listing.coordinates, Coordinates::default());
    }

    #[test]
    fn test_from_draft_stamps_listed_date() {
        let before = Utc::now();
        let listing = Listing::from_draft("abc".to_string(), draft());
        assert_eq!(listing.id, "abc");
        assert!(listing.listed_date >= before);
    }

    #[test]
    fn test_from_draft_keeps_explicit_listed_date() {
        let date = DateTime::parse_from_rfc3339("2023-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut d = draft();
        d.listed_date = Some(date);

        let listing = Listing::from_draft("abc".to_string(), d);
        assert_eq!(listing.listed_date, date);
    }

    #[test]
    fn test_apply_patch_only_touches_set_fields() {
        let mut listing = Listing::from_draft("1".to_string(), draft());
        listing.apply_patch(ListingPatch {
            price: Some(275_000),
            features: Some(vec!["Dock".to_string()]),
            ..Default::default()
        });

        assert_eq!(listing.price, 275_000);
        assert_eq!(listing.features, vec!["Dock".to_string()]);
        assert_eq!(listing.title, "Lake House");
        assert_eq!(listing.bedrooms, 3);
    }

    #[test]
    fn test_validate_draft_rejects_blank_title() {
        let mut d = draft();
        d.title = "   ".to_string();
        let err = Listing::validate_draft(&d).unwrap_err();
        assert!(matches!(err, crate::StoreError::Validation { .. }));
    }

    #[test]
    fn test_validate_draft_rejects_negative_bathrooms() {
        let mut d = draft();
        d.bathrooms = -1.0;
        assert!(Listing::validate_draft(&d).is_err());
    }
}
