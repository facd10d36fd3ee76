// responses/assets.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use mime::Mime;

const MAIN_CSS: &str = include_str!("../static/main.css");
const MAP_REPLAY_JS: &str = include_str!("../static/map-replay.js");
const PIN_SVG: &str = include_str!("../static/pin.svg");
const PLACEHOLDER_SVG: &str = include_str!("../static/placeholder.svg");

/// Looks up a file compiled into the binary by its path under `/static/`.
fn embedded(name: &str) -> Option<(Mime, &'static str)> {
    let found = match name {
        "main.css" => (mime::TEXT_CSS_UTF_8, MAIN_CSS),
        "map-replay.js" => (mime::APPLICATION_JAVASCRIPT_UTF_8, MAP_REPLAY_JS),
        "pin.svg" => (mime::IMAGE_SVG, PIN_SVG),
        "placeholder.svg" => (mime::IMAGE_SVG, PLACEHOLDER_SVG),
        _ => return None,
    };
    Some(found)
}

pub fn asset_response(name: &str) -> ResultResp {
    let (content_type, body) = embedded(name).ok_or(ServerError::NotFound)?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type.as_ref())
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(body))
        .map_err(|e| ServerError::Internal(e.to_string()))
}
