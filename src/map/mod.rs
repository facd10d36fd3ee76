pub mod bounds;
pub mod controller;
pub mod engine;
pub mod plan;
pub mod popup;

pub use bounds::Bounds;
pub use controller::{click_flight, Lifecycle, MapSync, CLICK_ZOOM, FIT_PADDING};
pub use engine::{
    ControlPosition, FlyTo, MapEngine, MapEvent, MapHandle, MapOptions, MarkerElement,
    MarkerHandle, PopupContent, PopupHandle, Propagation, WidgetInitError,
};
pub use plan::{MapCommand, MapPlan};
