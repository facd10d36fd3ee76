use crate::domain::listing::group_thousands;
use crate::domain::{format_price, Listing};
use crate::map::popup::PLACEHOLDER_PHOTO;
use maud::{html, Markup};

fn count(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{v}"),
        None => "?".to_string(),
    }
}

pub fn listing_card(listing: &Listing) -> Markup {
    html! {
        div class="card listing-card" data-listing-id=(listing.id) {
            img
                src=(listing.primary_photo().unwrap_or(PLACEHOLDER_PHOTO))
                alt="Home"
                loading="lazy";
            div class="card-body" {
                h2 { (format_price(listing.price)) }
                p { (listing.address) }
                @if let Some(locality) = listing.locality() {
                    p class="text-sm" { (locality) }
                }
                p class="text-sm" {
                    (count(listing.bedrooms)) " bd · " (count(listing.bathrooms)) " ba"
                    @if let Some(sqft) = listing.square_feet {
                        " · " (group_thousands(sqft.round() as i64)) " sqft"
                    }
                }
                @if listing.is_assumable {
                    span class="badge" { "Assumable" }
                }
                @if let Some(created) = listing.created_at {
                    p class="text-xs" { "Listed " (created.format("%b %-d, %Y").to_string()) }
                }
            }
        }
    }
}
