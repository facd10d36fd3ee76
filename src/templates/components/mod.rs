use maud::{html, Markup, PreEscaped};

pub mod card;
pub mod error;
pub mod filters;

pub use card::listing_card;
pub use error::error_page;
pub use filters::filter_panel;

const MAPBOX_GL: &str = "https://api.mapbox.com/mapbox-gl-js/v3.4.0";

/// The map container, the recorded command plan, and the scripts that replay it.
///
/// Every `</` in the plan is escaped so popup markup cannot close the script element.
pub fn map_region(plan_json: &str, access_token: &str) -> Markup {
    let safe = plan_json.replace("</", "<\\/");
    html! {
        link rel="stylesheet" href=(format!("{MAPBOX_GL}/mapbox-gl.css"));
        div class="w-full rounded-2xl overflow-hidden map-region" {
            div id="map" data-access-token=(access_token) style="height: 400px; width: 100%;" {}
            script type="application/json" id="map-plan" { (PreEscaped(safe)) }
        }
        script src=(format!("{MAPBOX_GL}/mapbox-gl.js")) {}
        script src="/static/map-replay.js" {}
    }
}
