// src/map/engine.rs

use crate::domain::LngLat;
use crate::map::bounds::Bounds;
use serde::Serialize;
use thiserror::Error;

/// Opaque handle to one map widget instance, allocated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MapHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PopupHandle(pub u64);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WidgetInitError {
    #[error("map access token is not configured")]
    MissingAccessToken,
    #[error("map engine failed to start: {0}")]
    Engine(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
    pub style: String,
    pub center: LngLat,
    pub zoom: f64,
}

pub const DEFAULT_STYLE: &str = "mapbox://styles/mapbox/outdoors-v12";

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
            // Phoenix
            center: LngLat {
                lng: -112.074,
                lat: 33.4484,
            },
            zoom: 9.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// The DOM element a marker is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerElement {
    pub image_url: String,
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for MarkerElement {
    fn default() -> Self {
        Self {
            image_url: "/static/pin.svg".to_string(),
            width_px: 28,
            height_px: 28,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupContent {
    pub html: String,
    pub offset: u32,
    pub anchor: Anchor,
    pub close_button: bool,
    pub close_on_click: bool,
    pub max_width: String,
}

/// Camera animation parameters for `fly_to`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyTo {
    pub center: LngLat,
    pub zoom: f64,
    pub speed: f64,
    pub curve: f64,
    pub duration_ms: u32,
    pub offset: [i32; 2],
}

/// Signals the engine delivers back to whoever owns the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    /// The widget finished loading. Sent once per widget instance.
    Loaded(MapHandle),
    /// A marker that was subscribed with [`MapEngine::listen_clicks`] was clicked.
    MarkerClicked(MarkerHandle),
}

/// Whether the engine should continue dispatching an event to the map itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// The capabilities the controller needs from a map library.
///
/// Implementations own the actual widgets; callers only ever hold handles.
/// Readiness and clicks come back as [`MapEvent`]s rather than callbacks.
pub trait MapEngine {
    fn create_map(&mut self, options: &MapOptions) -> Result<MapHandle, WidgetInitError>;
    fn add_navigation_control(&mut self, map: MapHandle, position: ControlPosition);
    fn add_marker(&mut self, map: MapHandle, at: LngLat, element: &MarkerElement) -> MarkerHandle;
    fn remove_marker(&mut self, marker: MarkerHandle);
    /// Attaches a popup to a marker without opening it.
    fn set_popup(&mut self, marker: MarkerHandle, content: PopupContent) -> PopupHandle;
    fn listen_clicks(&mut self, marker: MarkerHandle);
    fn open_popup(&mut self, map: MapHandle, popup: PopupHandle);
    fn close_popup(&mut self, popup: PopupHandle);
    fn fly_to(&mut self, map: MapHandle, target: &FlyTo);
    fn fit_bounds(&mut self, map: MapHandle, bounds: &Bounds, padding: u32);
    fn dispose_map(&mut self, map: MapHandle);
}
