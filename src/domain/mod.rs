pub mod filter;
pub mod listing;

pub use filter::{derive_filtered, mappable, Criterion, FilterCriteria};
pub use listing::{format_price, Listing, LngLat, MapListing};
