use crate::config::Config;
use crate::domain::Criterion;
use crate::errors::ServerError;
use crate::map::{MapEvent, MapOptions, MapPlan, MapSync};
use crate::responses::{asset_response, html_response, json_response, ResultResp};
use crate::source::ListingSource;
use crate::templates::pages::{home_page, listings_page, ListingsPageVm, MapRegionVm};
use crate::view::ListingsView;
use astra::Request;

/// Shared state handed to every request.
pub struct App {
    pub config: Config,
    pub source: Box<dyn ListingSource + Send + Sync>,
}

impl App {
    pub fn new(config: Config, source: Box<dyn ListingSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    /// A fresh page view whose map calls are recorded into a replayable plan.
    fn view(&self) -> ListingsView<MapPlan> {
        let options = MapOptions {
            style: self.config.map_style.clone(),
            ..MapOptions::default()
        };
        let engine = MapPlan::new(self.config.mapbox_access_token.clone());
        ListingsView::new(MapSync::new(engine, options))
    }

    /// Loads the current batch and applies the request's filters on top of the defaults.
    fn loaded_view(&self, criteria: &[Criterion]) -> ListingsView<MapPlan> {
        let mut view = self.view();
        view.load(&*self.source);
        for criterion in criteria {
            view.set_criterion(*criterion);
        }
        view
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => html_response(home_page()),
        ("GET", "/listings") => listings(&req, app),
        ("GET", "/api/listings") => listings_json(&req, app),
        ("GET", p) if p.starts_with("/static/") => asset_response(&p["/static/".len()..]),
        _ => Err(ServerError::NotFound),
    }
}

fn listings(req: &Request, app: &App) -> ResultResp {
    let criteria = parse_criteria(req)?;
    let mut view = app.loaded_view(&criteria);

    // The recorded widget has nothing to wait for; the browser replays the
    // plan only once its own map has loaded.
    if let Some(map) = view.map().map() {
        view.handle_map_event(MapEvent::Loaded(map));
    }

    let resp = {
        let plan = view.map().engine();
        let map = match plan.access_token() {
            Some(access_token) if view.shows_map() => Some(MapRegionVm {
                plan_json: plan
                    .to_json()
                    .map_err(|e| ServerError::Internal(e.to_string()))?,
                access_token,
            }),
            _ => None,
        };

        let vm = ListingsPageVm {
            criteria: view.criteria(),
            listings: view.filtered(),
            error: view.error(),
            map,
        };
        html_response(listings_page(&vm))
    };

    view.teardown();
    resp
}

fn listings_json(req: &Request, app: &App) -> ResultResp {
    let criteria = parse_criteria(req)?;
    let mut view = app.loaded_view(&criteria);

    let resp = match view.error() {
        Some(error) => Err(ServerError::Internal(error.to_string())),
        None => json_response(&view.filtered()),
    };

    view.teardown();
    resp
}

fn parse_criteria(req: &Request) -> Result<Vec<Criterion>, ServerError> {
    let Some(query) = req.uri().query() else {
        return Ok(Vec::new());
    };

    let mut criteria = Vec::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if let Some(criterion) = Criterion::parse(&key, &value).map_err(ServerError::BadRequest)? {
            criteria.push(criterion);
        }
    }
    Ok(criteria)
}
