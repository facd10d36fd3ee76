// src/domain/filter.rs

use crate::domain::listing::{Listing, MapListing};

pub const DEFAULT_MAX_PRICE: f64 = 1_000_000.0;

/// The user's current filter bounds.
///
/// Bounds are never reconciled against each other: a `min_price` above
/// `max_price` is legal and simply matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub min_price: f64,
    pub max_price: f64,
    pub min_bedrooms: f64,
    pub min_bathrooms: f64,
    pub min_lot_size: f64,
    pub assumable_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: DEFAULT_MAX_PRICE,
            min_bedrooms: 0.0,
            min_bathrooms: 0.0,
            min_lot_size: 0.0,
            assumable_only: false,
        }
    }
}

/// One field of [`FilterCriteria`] together with its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    MinPrice(f64),
    MaxPrice(f64),
    MinBedrooms(f64),
    MinBathrooms(f64),
    MinLotSize(f64),
    AssumableOnly(bool),
}

impl Criterion {
    /// Parses a single form field.
    ///
    /// `Ok(None)` for keys that are not filter fields. Checkbox values follow
    /// HTML form semantics: present means checked unless it is `false`/`0`/`off`.
    pub fn parse(key: &str, value: &str) -> Result<Option<Criterion>, String> {
        let number = || {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("{key} must be a number, got {value:?}"))
        };

        let criterion = match key {
            "minPrice" => Criterion::MinPrice(number()?),
            "maxPrice" => Criterion::MaxPrice(number()?),
            "minBedrooms" => Criterion::MinBedrooms(number()?),
            "minBathrooms" => Criterion::MinBathrooms(number()?),
            "minLotSize" => Criterion::MinLotSize(number()?),
            "assumableOnly" => {
                Criterion::AssumableOnly(!matches!(value.trim(), "false" | "0" | "off"))
            }
            _ => return Ok(None),
        };
        Ok(Some(criterion))
    }
}

impl FilterCriteria {
    pub fn set(&mut self, criterion: Criterion) {
        match criterion {
            Criterion::MinPrice(v) => self.min_price = v,
            Criterion::MaxPrice(v) => self.max_price = v,
            Criterion::MinBedrooms(v) => self.min_bedrooms = v,
            Criterion::MinBathrooms(v) => self.min_bathrooms = v,
            Criterion::MinLotSize(v) => self.min_lot_size = v,
            Criterion::AssumableOnly(v) => self.assumable_only = v,
        }
    }

    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Whether a single listing passes every bound.
    ///
    /// Unknown bedroom, bathroom and lot-size values compare as zero, so they
    /// drop out as soon as the matching minimum is raised above zero.
    pub fn matches(&self, listing: &Listing) -> bool {
        listing.price >= self.min_price
            && listing.price <= self.max_price
            && listing.bedrooms.unwrap_or(0.0) >= self.min_bedrooms
            && listing.bathrooms.unwrap_or(0.0) >= self.min_bathrooms
            && listing.lot_size_square_feet.unwrap_or(0.0) >= self.min_lot_size
            && (!self.assumable_only || listing.is_assumable)
    }
}

/// Stable selection of the listings matching `criteria`, in source order.
pub fn derive_filtered<'a>(listings: &'a [Listing], criteria: &FilterCriteria) -> Vec<&'a Listing> {
    listings.iter().filter(|l| criteria.matches(l)).collect()
}

/// Restricts a filtered subset to what can be drawn on the map.
pub fn mappable(filtered: &[&Listing]) -> Vec<MapListing> {
    filtered
        .iter()
        .filter_map(|l| MapListing::from_listing(l))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_unknown_fields_and_rejects_garbage() {
        assert_eq!(Criterion::parse("page", "2"), Ok(None));
        assert_eq!(
            Criterion::parse("minPrice", " 250000 "),
            Ok(Some(Criterion::MinPrice(250000.0)))
        );
        assert!(Criterion::parse("maxPrice", "lots").is_err());
        assert!(Criterion::parse("minLotSize", "NaN").is_err());
    }

    #[test]
    fn parse_checkbox_follows_form_semantics() {
        assert_eq!(
            Criterion::parse("assumableOnly", "on"),
            Ok(Some(Criterion::AssumableOnly(true)))
        );
        assert_eq!(
            Criterion::parse("assumableOnly", "false"),
            Ok(Some(Criterion::AssumableOnly(false)))
        );
    }

    #[test]
    fn set_touches_only_the_named_field() {
        let mut criteria = FilterCriteria::default();
        criteria.set(Criterion::MinBathrooms(2.0));

        assert_eq!(criteria.min_bathrooms, 2.0);
        assert_eq!(
            FilterCriteria {
                min_bathrooms: 0.0,
                ..criteria.clone()
            },
            FilterCriteria::default()
        );

        criteria.reset();
        assert_eq!(criteria, FilterCriteria::default());
    }
}
