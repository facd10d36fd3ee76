// src/tests/source_tests.rs

use super::utils::{free_port, spawn_listings_api};
use crate::source::{FetchError, HttpListingSource, ListingSource};
use std::time::Duration;

const LISTINGS_JSON: &str = r#"[
    {
        "id": "b-2",
        "address": "22 Saguaro Way",
        "city": "Mesa",
        "price": 640000,
        "bedrooms": 4,
        "bathrooms": 2.5,
        "photoUrls": ["https://photos.example.com/b-2.jpg"],
        "createdAt": "2025-03-01T12:00:00Z",
        "latitude": 33.41,
        "longitude": -111.83,
        "isAssumable": true
    },
    {
        "id": "a-1",
        "address": "7 Ocotillo Ct",
        "price": 415000,
        "bedrooms": null,
        "latitude": 0,
        "longitude": 0
    }
]"#;

fn source(base: &str, path: &str) -> HttpListingSource {
    HttpListingSource::new(format!("{base}{path}"), Duration::from_secs(5)).unwrap()
}

fn api() -> String {
    spawn_listings_api(vec![
        ("/error", 500, r#"{"error":"boom"}"#.to_string()),
        ("/object", 200, r#"{"listings":[]}"#.to_string()),
        ("/listings", 200, LISTINGS_JSON.to_string()),
    ])
}

#[test]
fn server_error_status_is_reported() {
    let base = api();

    let result = source(&base, "/error").fetch();

    assert_eq!(result, Err(FetchError::Status(500)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Failed to fetch listings (HTTP 500)"
    );
}

#[test]
fn body_that_is_not_an_array_is_a_parse_error() {
    let base = api();

    let result = source(&base, "/object").fetch();

    assert!(matches!(result, Err(FetchError::Parse(_))), "{result:?}");
}

#[test]
fn listings_come_back_in_response_order() {
    let base = api();

    let listings = source(&base, "/listings").fetch().unwrap();

    let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["b-2", "a-1"]);

    assert_eq!(listings[0].price, 640_000.0);
    assert_eq!(listings[0].bathrooms, Some(2.5));
    assert!(listings[0].is_assumable);
    assert!(listings[0].created_at.is_some());

    assert_eq!(listings[1].bedrooms, None);
    assert!(!listings[1].is_assumable);
    assert!(listings[1].photo_urls.is_empty());
    assert_eq!(listings[1].coordinates(), None);
}

#[test]
fn unknown_path_is_a_status_error() {
    let base = api();

    assert_eq!(
        source(&base, "/missing").fetch(),
        Err(FetchError::Status(404))
    );
}

#[test]
fn unreachable_api_is_a_network_error() {
    let url = format!("http://127.0.0.1:{}/listings", free_port());

    let result = HttpListingSource::new(url, Duration::from_secs(2))
        .unwrap()
        .fetch();

    assert!(matches!(result, Err(FetchError::Network(_))), "{result:?}");
}
