use crate::domain::{FilterCriteria, Listing};
use crate::templates::{desktop_layout, filter_panel, listing_card, map_region};
use maud::{html, Markup};

/// What the browser needs to rebuild the map: the recorded commands and the
/// token the map library authenticates with.
pub struct MapRegionVm<'a> {
    pub plan_json: String,
    pub access_token: &'a str,
}

pub struct ListingsPageVm<'a> {
    pub criteria: &'a FilterCriteria,
    pub listings: Vec<&'a Listing>,
    pub error: Option<&'a str>,
    /// `None` leaves the map region off the page.
    pub map: Option<MapRegionVm<'a>>,
}

pub fn listings_page(vm: &ListingsPageVm) -> Markup {
    desktop_layout(
        "Listings",
        html! {
            main class="container" {
                (filter_panel(vm.criteria))

                @if let Some(error) = vm.error {
                    p class="text-red-600 font-semibold" { (error) }
                }

                @if let Some(map) = &vm.map {
                    (map_region(&map.plan_json, map.access_token))
                }

                @if vm.listings.is_empty() && vm.error.is_none() {
                    p { "No listings match these filters." }
                } @else {
                    p class="text-sm" { (vm.listings.len()) " listings" }
                    div class="listing-grid" {
                        @for listing in &vm.listings {
                            (listing_card(listing))
                        }
                    }
                }
            }
        },
    )
}
