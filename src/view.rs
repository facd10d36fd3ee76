// src/view.rs

use crate::domain::{derive_filtered, mappable, Criterion, FilterCriteria, Listing, MapListing};
use crate::map::{MapEngine, MapEvent, MapSync, Propagation};
use crate::source::{FetchError, ListingSource};

/// Top-level owner of the listings page state.
///
/// Holds the fetched batch and the criteria, derives the filtered subset on
/// demand, and pushes the mappable part of it into the map controller after
/// every change. Fetches are blocking, so there is no in-flight state to show.
pub struct ListingsView<E: MapEngine> {
    listings: Vec<Listing>,
    criteria: FilterCriteria,
    error: Option<String>,
    map: MapSync<E>,
    torn_down: bool,
}

impl<E: MapEngine> ListingsView<E> {
    pub fn new(map: MapSync<E>) -> Self {
        Self {
            listings: Vec::new(),
            criteria: FilterCriteria::default(),
            error: None,
            map,
            torn_down: false,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// User-facing text for the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn map(&self) -> &MapSync<E> {
        &self.map
    }

    pub fn filtered(&self) -> Vec<&Listing> {
        derive_filtered(&self.listings, &self.criteria)
    }

    pub fn mappable(&self) -> Vec<MapListing> {
        mappable(&self.filtered())
    }

    /// The map region is shown only when there is something to pin and the
    /// widget could actually be built.
    pub fn shows_map(&self) -> bool {
        !self.torn_down && self.map.init_error().is_none() && !self.mappable().is_empty()
    }

    pub fn begin_load(&mut self) {
        if self.torn_down {
            return;
        }
        self.error = None;
    }

    /// Applies a fetch result. Results that arrive after teardown are dropped.
    pub fn finish_load(&mut self, result: Result<Vec<Listing>, FetchError>) {
        if self.torn_down {
            tracing::debug!("view torn down, discarding fetch result");
            return;
        }
        match result {
            Ok(listings) => {
                tracing::info!(count = listings.len(), "listing batch loaded");
                self.listings = listings;
                self.criteria.reset();
            }
            Err(e) => {
                tracing::warn!(error = %e, "listing fetch failed");
                self.listings.clear();
                self.error = Some(e.to_string());
            }
        }

        self.refresh_map();
    }

    pub fn load<S: ListingSource + ?Sized>(&mut self, source: &S) {
        self.begin_load();
        if self.torn_down {
            return;
        }
        let result = source.fetch();
        self.finish_load(result);
    }

    pub fn set_criterion(&mut self, criterion: Criterion) {
        if self.torn_down {
            return;
        }
        self.criteria.set(criterion);
        self.refresh_map();
    }

    pub fn reset_criteria(&mut self) {
        if self.torn_down {
            return;
        }
        self.criteria.reset();
        self.refresh_map();
    }

    pub fn handle_map_event(&mut self, event: MapEvent) -> Propagation {
        if self.torn_down {
            return Propagation::Continue;
        }
        self.map.handle_event(event)
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.map.teardown();
    }

    fn refresh_map(&mut self) {
        if self.torn_down {
            return;
        }
        let subset = self.mappable();
        if subset.is_empty() {
            self.map.unmount();
        } else {
            self.map.sync(&subset);
        }
    }
}
