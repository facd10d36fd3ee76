mod http_source;
mod source_error;

use crate::domain::Listing;

pub use http_source::HttpListingSource;
pub use source_error::FetchError;

/// Anything that can hand over the current batch of listings in display order.
pub trait ListingSource {
    fn fetch(&self) -> Result<Vec<Listing>, FetchError>;
}
