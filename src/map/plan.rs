// src/map/plan.rs

use crate::domain::LngLat;
use crate::map::bounds::Bounds;
use crate::map::controller::click_flight;
use crate::map::engine::{
    ControlPosition, FlyTo, MapEngine, MapHandle, MapOptions, MarkerElement, MarkerHandle,
    PopupContent, PopupHandle, WidgetInitError,
};
use serde::Serialize;
use std::collections::HashMap;

/// One recorded call against the map engine, in the order it was made.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum MapCommand {
    CreateMap {
        map: MapHandle,
        options: MapOptions,
    },
    AddNavigationControl {
        map: MapHandle,
        position: ControlPosition,
    },
    AddMarker {
        map: MapHandle,
        marker: MarkerHandle,
        at: [f64; 2],
        element: MarkerElement,
    },
    RemoveMarker {
        marker: MarkerHandle,
    },
    SetPopup {
        marker: MarkerHandle,
        popup: PopupHandle,
        content: PopupContent,
    },
    /// On click: close the open popup, fly to `fly_to`, open this marker's
    /// popup, and keep the click from reaching the map.
    ListenClicks {
        marker: MarkerHandle,
        #[serde(rename = "flyTo")]
        fly_to: FlyTo,
    },
    OpenPopup {
        map: MapHandle,
        popup: PopupHandle,
    },
    ClosePopup {
        popup: PopupHandle,
    },
    FlyTo {
        map: MapHandle,
        target: FlyTo,
    },
    FitBounds {
        map: MapHandle,
        bounds: [[f64; 2]; 2],
        padding: u32,
    },
    DisposeMap {
        map: MapHandle,
    },
}

/// A [`MapEngine`] that draws nothing and records every call instead.
///
/// The recorded plan is embedded in the listings page and replayed against a
/// real widget by `static/map-replay.js`.
#[derive(Debug, Default)]
pub struct MapPlan {
    access_token: Option<String>,
    next_id: u64,
    commands: Vec<MapCommand>,
    positions: HashMap<MarkerHandle, LngLat>,
}

fn pair(point: LngLat) -> [f64; 2] {
    [point.lng, point.lat]
}

impl MapPlan {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            access_token,
            ..Self::default()
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn commands(&self) -> &[MapCommand] {
        &self.commands
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.commands)
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MapEngine for MapPlan {
    fn create_map(&mut self, options: &MapOptions) -> Result<MapHandle, WidgetInitError> {
        match self.access_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => return Err(WidgetInitError::MissingAccessToken),
        }

        let map = MapHandle(self.next());
        self.commands.push(MapCommand::CreateMap {
            map,
            options: options.clone(),
        });
        Ok(map)
    }

    fn add_navigation_control(&mut self, map: MapHandle, position: ControlPosition) {
        self.commands
            .push(MapCommand::AddNavigationControl { map, position });
    }

    fn add_marker(&mut self, map: MapHandle, at: LngLat, element: &MarkerElement) -> MarkerHandle {
        let marker = MarkerHandle(self.next());
        self.positions.insert(marker, at);
        self.commands.push(MapCommand::AddMarker {
            map,
            marker,
            at: pair(at),
            element: element.clone(),
        });
        marker
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.positions.remove(&marker);
        self.commands.push(MapCommand::RemoveMarker { marker });
    }

    fn set_popup(&mut self, marker: MarkerHandle, content: PopupContent) -> PopupHandle {
        let popup = PopupHandle(self.next());
        self.commands.push(MapCommand::SetPopup {
            marker,
            popup,
            content,
        });
        popup
    }

    fn listen_clicks(&mut self, marker: MarkerHandle) {
        let Some(at) = self.positions.get(&marker).copied() else {
            tracing::warn!(marker = marker.0, "click listener for unknown marker");
            return;
        };
        self.commands.push(MapCommand::ListenClicks {
            marker,
            fly_to: click_flight(at),
        });
    }

    fn open_popup(&mut self, map: MapHandle, popup: PopupHandle) {
        self.commands.push(MapCommand::OpenPopup { map, popup });
    }

    fn close_popup(&mut self, popup: PopupHandle) {
        self.commands.push(MapCommand::ClosePopup { popup });
    }

    fn fly_to(&mut self, map: MapHandle, target: &FlyTo) {
        self.commands.push(MapCommand::FlyTo {
            map,
            target: target.clone(),
        });
    }

    fn fit_bounds(&mut self, map: MapHandle, bounds: &Bounds, padding: u32) {
        let (Some(sw), Some(ne)) = (bounds.south_west(), bounds.north_east()) else {
            return;
        };
        self.commands.push(MapCommand::FitBounds {
            map,
            bounds: [pair(sw), pair(ne)],
            padding,
        });
    }

    fn dispose_map(&mut self, map: MapHandle) {
        self.commands.push(MapCommand::DisposeMap { map });
    }
}
