use crate::domain::listing::group_thousands;
use crate::domain::{format_price, FilterCriteria};
use maud::{html, Markup};

fn range(label: &str, name: &str, max: u32, step: u32, value: f64, shown: String) -> Markup {
    html! {
        div class="flex flex-col items-center" {
            label class="font-bold" for=(name) { (label) }
            input type="range" id=(name) name=(name) min="0" max=(max) step=(step) value=(value.to_string()) class="w-36";
            span class="text-sm" { (shown) }
        }
    }
}

fn at_least(label: &str, name: &str, options: std::ops::RangeInclusive<u32>, value: f64) -> Markup {
    html! {
        div class="flex flex-col items-center" {
            label class="font-bold" for=(name) { (label) }
            select id=(name) name=(name) class="border border-black px-2 py-1" {
                @for n in options {
                    option value=(n) selected[f64::from(n) == value] { (n) "+" }
                }
            }
        }
    }
}

/// The filter panel. Submits as a GET so the criteria live in the query string.
pub fn filter_panel(criteria: &FilterCriteria) -> Markup {
    html! {
        form class="filters" action="/listings" method="get" {
            (range("Min Price", "minPrice", 2_000_000, 10_000, criteria.min_price, format_price(criteria.min_price)))
            (range("Max Price", "maxPrice", 2_000_000, 10_000, criteria.max_price, format_price(criteria.max_price)))
            (at_least("Bedrooms (min)", "minBedrooms", 0..=5, criteria.min_bedrooms))
            (at_least("Bathrooms (min)", "minBathrooms", 0..=3, criteria.min_bathrooms))
            (range(
                "Lot Size (min sqft)",
                "minLotSize",
                20_000,
                100,
                criteria.min_lot_size,
                format!("{} sqft", group_thousands(criteria.min_lot_size.round() as i64)),
            ))
            div class="flex flex-col items-center" {
                label class="font-bold" for="assumableOnly" { "Only show assumable" }
                input type="checkbox" id="assumableOnly" name="assumableOnly" value="true" checked[criteria.assumable_only] class="mt-2";
            }
            div class="flex justify-center" {
                button type="submit" class="btn" { "Apply" }
                a href="/listings" class="btn" { "Reset Listings" }
            }
        }
    }
}
