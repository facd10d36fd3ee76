use crate::domain::{format_price, MapListing};
use crate::map::engine::{Anchor, PopupContent};
use maud::{html, Markup};

pub const PLACEHOLDER_PHOTO: &str = "/static/placeholder.svg";

pub fn popup_markup(listing: &MapListing) -> Markup {
    let photo = listing
        .photo_urls
        .first()
        .map(String::as_str)
        .unwrap_or(PLACEHOLDER_PHOTO);

    html! {
        div style="color:black; text-align: center;" {
            strong style="font-size: 1.1rem;" { (format_price(listing.price)) }
            br;
            span style="font-size: 0.95rem;" { (listing.address) }
            br;
            img
                src=(photo)
                alt="Home"
                style="width: 100%; height: 20%; object-fit: cover; border-radius: 6px; margin-top: 6px;";
        }
    }
}

/// Popup for a marker: opens above the pin and stays open on map clicks.
pub fn popup_for(listing: &MapListing) -> PopupContent {
    PopupContent {
        html: popup_markup(listing).into_string(),
        offset: 40,
        anchor: Anchor::Bottom,
        close_button: true,
        close_on_click: false,
        max_width: "250px".to_string(),
    }
}
