use crate::config::Config;
use crate::domain::{Listing, LngLat, MapListing};
use crate::map::{
    Bounds, ControlPosition, FlyTo, MapEngine, MapEvent, MapHandle, MapOptions, MapSync,
    MarkerElement, MarkerHandle, PopupContent, PopupHandle, WidgetInitError,
};
use crate::router::App;
use crate::source::{FetchError, ListingSource};
use astra::{Body, Request, ResponseBuilder, Response, Server};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

pub fn listing(
    id: &str,
    price: f64,
    bedrooms: Option<f64>,
    bathrooms: Option<f64>,
    lot: Option<f64>,
    assumable: bool,
    coords: Option<(f64, f64)>,
) -> Listing {
    Listing {
        id: id.to_string(),
        address: format!("{id} Desert Bloom Rd"),
        city: Some("Phoenix".into()),
        state: Some("AZ".into()),
        price,
        bedrooms,
        bathrooms,
        square_feet: None,
        lot_size_square_feet: lot,
        property_type: Some("SINGLE_FAMILY".into()),
        photo_urls: vec![format!("https://photos.example.com/{id}.jpg")],
        status: Some("ACTIVE".into()),
        created_at: None,
        latitude: coords.map(|(lat, _)| lat),
        longitude: coords.map(|(_, lon)| lon),
        is_assumable: assumable,
    }
}

/// The two-listing batch used throughout the scenarios.
pub fn scenario_listings() -> Vec<Listing> {
    vec![
        listing(
            "1",
            500_000.0,
            Some(3.0),
            Some(2.0),
            Some(5000.0),
            true,
            Some((33.4, -112.0)),
        ),
        listing(
            "2",
            1_500_000.0,
            Some(5.0),
            Some(4.0),
            Some(9000.0),
            false,
            Some((33.5, -112.1)),
        ),
    ]
}

pub fn map_listing(id: &str, lat: f64, lng: f64) -> MapListing {
    MapListing {
        id: id.to_string(),
        at: LngLat { lng, lat },
        price: 400_000.0,
        address: format!("{id} Saguaro Ave"),
        photo_urls: Vec::new(),
    }
}

/// Fake engine that keeps the state a real widget would have.
#[derive(Debug, Default)]
pub struct RecordingMap {
    pub fail_create: bool,
    next_id: u64,
    pub created: Vec<MapHandle>,
    pub disposed: Vec<MapHandle>,
    pub nav_controls: Vec<(MapHandle, ControlPosition)>,
    pub live_markers: Vec<(MarkerHandle, LngLat)>,
    pub removed_markers: usize,
    pub popups: HashMap<PopupHandle, (MarkerHandle, PopupContent)>,
    pub open_popups: Vec<PopupHandle>,
    pub click_listeners: HashSet<MarkerHandle>,
    pub fly_tos: Vec<FlyTo>,
    pub fits: Vec<(Bounds, u32)>,
}

impl RecordingMap {
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn open_popup_markers(&self) -> Vec<MarkerHandle> {
        self.open_popups
            .iter()
            .filter_map(|p| self.popups.get(p).map(|(m, _)| *m))
            .collect()
    }
}

impl MapEngine for RecordingMap {
    fn create_map(&mut self, _options: &MapOptions) -> Result<MapHandle, WidgetInitError> {
        if self.fail_create {
            return Err(WidgetInitError::MissingAccessToken);
        }
        let map = MapHandle(self.next());
        self.created.push(map);
        Ok(map)
    }

    fn add_navigation_control(&mut self, map: MapHandle, position: ControlPosition) {
        self.nav_controls.push((map, position));
    }

    fn add_marker(&mut self, _map: MapHandle, at: LngLat, _element: &MarkerElement) -> MarkerHandle {
        let marker = MarkerHandle(self.next());
        self.live_markers.push((marker, at));
        marker
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.live_markers.retain(|(m, _)| *m != marker);
        self.click_listeners.remove(&marker);
        self.removed_markers += 1;
    }

    fn set_popup(&mut self, marker: MarkerHandle, content: PopupContent) -> PopupHandle {
        let popup = PopupHandle(self.next());
        self.popups.insert(popup, (marker, content));
        popup
    }

    fn listen_clicks(&mut self, marker: MarkerHandle) {
        self.click_listeners.insert(marker);
    }

    fn open_popup(&mut self, _map: MapHandle, popup: PopupHandle) {
        // A real engine happily stacks popups; only the controller prevents it.
        self.open_popups.push(popup);
    }

    fn close_popup(&mut self, popup: PopupHandle) {
        self.open_popups.retain(|p| *p != popup);
    }

    fn fly_to(&mut self, _map: MapHandle, target: &FlyTo) {
        self.fly_tos.push(target.clone());
    }

    fn fit_bounds(&mut self, _map: MapHandle, bounds: &Bounds, padding: u32) {
        assert!(!bounds.is_empty(), "fit_bounds called with empty bounds");
        self.fits.push((bounds.clone(), padding));
    }

    fn dispose_map(&mut self, map: MapHandle) {
        self.disposed.push(map);
    }
}

pub fn controller() -> MapSync<RecordingMap> {
    MapSync::new(RecordingMap::default(), MapOptions::default())
}

/// A controller whose widget has loaded and rendered `subset`.
pub fn ready_controller(subset: &[MapListing]) -> MapSync<RecordingMap> {
    let mut sync = controller();
    sync.sync(subset);
    let map = sync.map().expect("widget should be created");
    sync.handle_event(MapEvent::Loaded(map));
    sync
}

pub struct StaticSource(pub Vec<Listing>);

impl ListingSource for StaticSource {
    fn fetch(&self) -> Result<Vec<Listing>, FetchError> {
        Ok(self.0.clone())
    }
}

pub struct FailingSource;

impl ListingSource for FailingSource {
    fn fetch(&self) -> Result<Vec<Listing>, FetchError> {
        Err(FetchError::Status(503))
    }
}

pub fn test_app(source: impl ListingSource + Send + Sync + 'static, token: Option<&str>) -> App {
    let config = Config {
        mapbox_access_token: token.map(str::to_string),
        ..Config::default()
    };
    App::new(config, Box::new(source))
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(http::Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(mut resp: Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}

/// A port nothing is listening on, taken from the OS and released again.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Starts a stand-in listings API on a free local port and returns its base URL.
///
/// `routes` maps a path to the status and body served for it; every other
/// path is a 404. The server thread lives until the test binary exits.
pub fn spawn_listings_api(routes: Vec<(&'static str, u16, String)>) -> String {
    let addr = SocketAddr::from(([127, 0, 0, 1], free_port()));

    thread::spawn(move || {
        let server = Server::bind(&addr).max_workers(2);
        let _ = server.serve(move |req: Request, _info| {
            let (status, body) = routes
                .iter()
                .find(|(path, _, _)| *path == req.uri().path())
                .map(|(_, status, body)| (*status, body.clone()))
                .unwrap_or((404, String::new()));

            ResponseBuilder::new()
                .status(status)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap()
        });
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    while TcpStream::connect(addr).is_err() {
        assert!(Instant::now() < deadline, "listings API on {addr} never came up");
        thread::sleep(Duration::from_millis(20));
    }

    format!("http://{addr}")
}
