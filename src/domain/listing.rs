// src/domain/listing.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A listing exactly as the listings API returns it.
/// Never mutated after the fetch; filtering always builds a new sequence of borrows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,

    pub price: f64,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub square_feet: Option<f64>,
    #[serde(default)]
    pub lot_size_square_feet: Option<f64>,

    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_assumable: bool,
}

/// A point in longitude/latitude order, the order map engines expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl Listing {
    /// Coordinates if the listing can be placed on the map.
    ///
    /// A zero coordinate counts as missing: upstream rows without a geocode
    /// come through as `0` rather than `null`.
    pub fn coordinates(&self) -> Option<LngLat> {
        let lat = self.latitude.filter(|v| *v != 0.0)?;
        let lng = self.longitude.filter(|v| *v != 0.0)?;
        Some(LngLat { lng, lat })
    }

    pub fn primary_photo(&self) -> Option<&str> {
        self.photo_urls.first().map(String::as_str)
    }

    /// "City, ST" for display, skipping whichever part is missing.
    pub fn locality(&self) -> Option<String> {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(city), None) => Some(city.to_string()),
            (None, Some(state)) => Some(state.to_string()),
            (None, None) => None,
        }
    }
}

/// The slice of a listing the map needs: only built for listings with coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MapListing {
    pub id: String,
    pub at: LngLat,
    pub price: f64,
    pub address: String,
    pub photo_urls: Vec<String>,
}

impl MapListing {
    pub fn from_listing(listing: &Listing) -> Option<Self> {
        let at = listing.coordinates()?;
        Some(MapListing {
            id: listing.id.clone(),
            at,
            price: listing.price,
            address: listing.address.clone(),
            photo_urls: listing.photo_urls.clone(),
        })
    }
}

/// Formats a price as whole dollars with thousands separators, e.g. `$1,250,000`.
pub fn format_price(price: f64) -> String {
    format!("${}", group_thousands(price.round() as i64))
}

pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_shape_with_missing_optionals() {
        let json = r#"{
            "id": "abc",
            "address": "1 Main St",
            "city": "Phoenix",
            "state": null,
            "price": 425000,
            "bedrooms": 3,
            "bathrooms": 2.5,
            "squareFeet": null,
            "propertyType": "SINGLE_FAMILY",
            "photoUrls": ["https://img/1.jpg"],
            "status": "ACTIVE",
            "createdAt": "2024-05-01T12:00:00Z",
            "latitude": 33.4,
            "longitude": -112.0
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.bathrooms, Some(2.5));
        assert_eq!(listing.lot_size_square_feet, None);
        assert!(!listing.is_assumable);
        assert_eq!(listing.locality().as_deref(), Some("Phoenix"));
        assert!(listing.created_at.is_some());
    }

    #[test]
    fn zero_or_missing_coordinates_are_not_mappable() {
        let json = r#"{"id":"x","address":"a","price":1,"latitude":0,"longitude":-112.0}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.coordinates().is_none());
        assert!(MapListing::from_listing(&listing).is_none());

        let json = r#"{"id":"y","address":"a","price":1,"latitude":33.1}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert!(listing.coordinates().is_none());
    }

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(500000.0), "$500,000");
        assert_eq!(format_price(1_250_000.4), "$1,250,000");
        assert_eq!(format_price(999.0), "$999");
        assert_eq!(group_thousands(-12345), "-12,345");
    }
}
