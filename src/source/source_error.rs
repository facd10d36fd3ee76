use thiserror::Error;

/// Why a listing batch could not be retrieved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Failed to fetch listings: {0}")]
    Network(String),
    #[error("Failed to fetch listings (HTTP {0})")]
    Status(u16),
    #[error("Listings response was malformed: {0}")]
    Parse(String),
}
