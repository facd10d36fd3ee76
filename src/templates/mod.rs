pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{error_page, filter_panel, listing_card, map_region};
pub use layouts::desktop::desktop_layout;
