use crate::domain::LngLat;

/// A south-west/north-east box grown one point at a time.
///
/// Starts empty; an empty box has no corners and must never be handed to an engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bounds {
    corners: Option<(LngLat, LngLat)>,
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, point: LngLat) {
        self.corners = Some(match self.corners {
            None => (point, point),
            Some((sw, ne)) => (
                LngLat {
                    lng: sw.lng.min(point.lng),
                    lat: sw.lat.min(point.lat),
                },
                LngLat {
                    lng: ne.lng.max(point.lng),
                    lat: ne.lat.max(point.lat),
                },
            ),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    pub fn south_west(&self) -> Option<LngLat> {
        self.corners.map(|(sw, _)| sw)
    }

    pub fn north_east(&self) -> Option<LngLat> {
        self.corners.map(|(_, ne)| ne)
    }
}
