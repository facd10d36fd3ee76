// src/map/controller.rs

use crate::domain::{LngLat, MapListing};
use crate::map::bounds::Bounds;
use crate::map::engine::{
    ControlPosition, FlyTo, MapEngine, MapEvent, MapHandle, MapOptions, MarkerElement,
    MarkerHandle, PopupHandle, Propagation, WidgetInitError,
};
use crate::map::popup::popup_for;
use std::collections::HashSet;

/// Zoom level the camera flies to when a marker is clicked.
pub const CLICK_ZOOM: f64 = 14.0;
/// Padding in pixels kept around the markers when fitting the viewport.
pub const FIT_PADDING: u32 = 60;

/// Camera move made when the marker at `at` is clicked.
pub fn click_flight(at: LngLat) -> FlyTo {
    FlyTo {
        center: at,
        zoom: CLICK_ZOOM,
        speed: 2.0,
        curve: 1.5,
        duration_ms: 800,
        offset: [0, 160],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    /// Created, waiting for the engine's `Loaded` event.
    Initializing,
    Ready,
    Disposed,
}

#[derive(Debug)]
struct RenderedMarker {
    listing_id: String,
    marker: MarkerHandle,
    popup: PopupHandle,
    at: LngLat,
}

/// Keeps one map widget in step with the mappable listings.
///
/// The widget is only created once there is something to show, markers are
/// only touched after the engine reports the widget loaded, and at most one
/// popup is open at a time. Nothing here fails outward: calls that arrive in
/// the wrong state are ignored.
pub struct MapSync<E: MapEngine> {
    engine: E,
    options: MapOptions,
    element: MarkerElement,
    lifecycle: Lifecycle,
    map: Option<MapHandle>,
    // Latest subset handed over while the widget was still loading.
    pending: Option<Vec<MapListing>>,
    markers: Vec<RenderedMarker>,
    active_popup: Option<PopupHandle>,
    torn_down: bool,
    init_error: Option<WidgetInitError>,
}

impl<E: MapEngine> MapSync<E> {
    pub fn new(engine: E, options: MapOptions) -> Self {
        Self {
            engine,
            options,
            element: MarkerElement::default(),
            lifecycle: Lifecycle::Uninitialized,
            map: None,
            pending: None,
            markers: Vec::new(),
            active_popup: None,
            torn_down: false,
            init_error: None,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn map(&self) -> Option<MapHandle> {
        self.map
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn init_error(&self) -> Option<&WidgetInitError> {
        self.init_error.as_ref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Listing ids that currently have a marker, in render order.
    pub fn marker_ids(&self) -> Vec<&str> {
        self.markers.iter().map(|m| m.listing_id.as_str()).collect()
    }

    pub fn marker_for(&self, listing_id: &str) -> Option<MarkerHandle> {
        self.markers
            .iter()
            .find(|m| m.listing_id == listing_id)
            .map(|m| m.marker)
    }

    pub fn active_popup(&self) -> Option<PopupHandle> {
        self.active_popup
    }

    /// Listing whose popup is open, if any.
    pub fn active_listing(&self) -> Option<&str> {
        let popup = self.active_popup?;
        self.markers
            .iter()
            .find(|m| m.popup == popup)
            .map(|m| m.listing_id.as_str())
    }

    /// Entry point for every new mappable subset.
    ///
    /// Creates the widget on the first non-empty subset, remembers the subset
    /// while the widget loads, and reconciles once it is ready.
    pub fn sync(&mut self, subset: &[MapListing]) {
        if self.torn_down {
            return;
        }

        match self.lifecycle {
            Lifecycle::Uninitialized | Lifecycle::Disposed => {
                if subset.is_empty() {
                    return;
                }
                self.pending = Some(subset.to_vec());
                self.create();
            }
            Lifecycle::Initializing => self.pending = Some(subset.to_vec()),
            Lifecycle::Ready => self.reconcile(subset),
        }
    }

    fn create(&mut self) {
        match self.engine.create_map(&self.options) {
            Ok(map) => {
                self.engine
                    .add_navigation_control(map, ControlPosition::TopRight);
                self.map = Some(map);
                self.lifecycle = Lifecycle::Initializing;
                tracing::info!(map = map.0, style = %self.options.style, "map widget created");
            }
            Err(e) => {
                tracing::error!(error = %e, "map widget could not be created");
                self.init_error = Some(e);
                self.pending = None;
                self.torn_down = true;
                self.lifecycle = Lifecycle::Disposed;
            }
        }
    }

    /// Feeds an engine signal back into the controller.
    ///
    /// Marker clicks that land on one of our markers are consumed and
    /// must not reach the map's own click handling.
    pub fn handle_event(&mut self, event: MapEvent) -> Propagation {
        match event {
            MapEvent::Loaded(map) => {
                if self.torn_down
                    || self.lifecycle != Lifecycle::Initializing
                    || self.map != Some(map)
                {
                    tracing::debug!(map = map.0, "ignoring load signal for stale widget");
                    return Propagation::Continue;
                }

                self.lifecycle = Lifecycle::Ready;
                tracing::info!(map = map.0, "map widget ready");

                if let Some(subset) = self.pending.take() {
                    self.reconcile(&subset);
                }
                Propagation::Continue
            }
            MapEvent::MarkerClicked(marker) => {
                if self.lifecycle != Lifecycle::Ready {
                    return Propagation::Continue;
                }
                match self.markers.iter().position(|m| m.marker == marker) {
                    Some(idx) => {
                        self.open_marker(idx);
                        Propagation::Stop
                    }
                    None => Propagation::Continue,
                }
            }
        }
    }

    /// Replaces every marker with one per listing in `subset` and fits the
    /// camera around them. Does nothing unless the widget is ready.
    pub fn reconcile(&mut self, subset: &[MapListing]) {
        if self.torn_down || self.lifecycle != Lifecycle::Ready {
            return;
        }
        let Some(map) = self.map else {
            return;
        };

        self.clear_markers();

        let mut bounds = Bounds::new();
        let mut seen = HashSet::new();

        for listing in subset {
            if !seen.insert(listing.id.as_str()) {
                tracing::warn!(listing = %listing.id, "duplicate listing id skipped");
                continue;
            }

            let marker = self.engine.add_marker(map, listing.at, &self.element);
            let popup = self.engine.set_popup(marker, popup_for(listing));
            self.engine.listen_clicks(marker);

            self.markers.push(RenderedMarker {
                listing_id: listing.id.clone(),
                marker,
                popup,
                at: listing.at,
            });
            bounds.extend(listing.at);
        }

        // An empty box has no meaningful viewport; keep the camera where it is.
        if !bounds.is_empty() {
            self.engine.fit_bounds(map, &bounds, FIT_PADDING);
        }

        tracing::debug!(map = map.0, markers = self.markers.len(), "markers reconciled");
    }

    fn open_marker(&mut self, idx: usize) {
        let Some(map) = self.map else {
            return;
        };
        let (popup, at) = {
            let rendered = &self.markers[idx];
            (rendered.popup, rendered.at)
        };

        if let Some(previous) = self.active_popup.take() {
            self.engine.close_popup(previous);
        }

        self.engine.fly_to(map, &click_flight(at));

        self.engine.open_popup(map, popup);
        self.active_popup = Some(popup);
    }

    fn clear_markers(&mut self) {
        for rendered in self.markers.drain(..) {
            if self.active_popup == Some(rendered.popup) {
                self.engine.close_popup(rendered.popup);
                self.active_popup = None;
            }
            self.engine.remove_marker(rendered.marker);
        }
    }

    fn release(&mut self) {
        self.clear_markers();
        if let Some(popup) = self.active_popup.take() {
            self.engine.close_popup(popup);
        }
        self.pending = None;
        if let Some(map) = self.map.take() {
            self.engine.dispose_map(map);
            tracing::info!(map = map.0, "map widget disposed");
            self.lifecycle = Lifecycle::Disposed;
        }
    }

    /// The map region left the page because nothing is mappable any more.
    ///
    /// The next non-empty [`sync`](Self::sync) builds a fresh widget.
    pub fn unmount(&mut self) {
        if self.torn_down {
            return;
        }
        self.release();
    }

    /// Releases the widget for good. Every later call is a no-op.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.release();
        self.torn_down = true;
        self.lifecycle = Lifecycle::Disposed;
    }
}
