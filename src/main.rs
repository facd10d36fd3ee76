use crate::config::Config;
use crate::router::{handle, App};
use crate::source::HttpListingSource;
use astra::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod domain;
mod errors;
mod map;
mod responses;
mod router;
mod source;
mod templates;
mod view;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration failed");
            std::process::exit(1);
        }
    };

    if config.mapbox_access_token.is_none() {
        tracing::warn!("MAPBOX_ACCESS_TOKEN not set, listings will render without a map");
    }

    let source = match HttpListingSource::new(config.listings_url.clone(), config.fetch_timeout) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!(error = %e, "listing source could not be built");
            std::process::exit(1);
        }
    };
    tracing::info!(url = %source.url(), "listing source configured");

    let addr = config.bind_addr;
    let server = Server::bind(&addr).max_workers(config.max_workers);
    let app = App::new(config, Box::new(source));

    tracing::info!("Starting server at http://{addr}");

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::error_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("Server shut down cleanly.");
}
