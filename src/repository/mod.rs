use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

mod entities;
mod normalizer;
mod source;
pub use entities::*;
pub use normalizer::*;

type IdToIndex = HashMap<Arc<str>, u32>;

/// The transit index: an immutable snapshot of a feed and the lookups joining it.
///
/// Built once from all four tables (see [`Repository::with_normalized`]) and only
/// ever replaced as a whole. Every query is a read, so a `Repository` can be shared
/// between threads and queried concurrently.
///
/// Entities are addressed by `u32` indexes, so a single table holds at most
/// `u32::MAX` rows.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    stops: Box<[Stop]>,
    trips: Box<[Trip]>,
    routes: Box<[Route]>,
    diagnostics: Diagnostics,

    // Lookups, the last row wins when an id is repeated
    stop_lookup: IdToIndex,
    trip_lookup: IdToIndex,
    route_lookup: IdToIndex,

    // Indexed by stop index, trip indexes in order of first appearance in stop_times
    stop_to_trips: Box<[Box<[u32]>]>,
    // Indexed by trip index, None when the route is unknown
    trip_to_route: Box<[Option<u32>]>,
    // Indexed by route index, stop indexes in catalog order
    route_to_stops: Box<[Box<[u32]>]>,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// True when the repository holds no stops, trips or routes, either because
    /// nothing was loaded yet or because every row of the feed was skipped.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty() && self.routes.is_empty() && self.trips.is_empty()
    }

    /// The stop catalog: every boarding stop with usable coordinates, in source order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Rows dropped while normalizing the feed this repository was built from.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Get a stop from the catalog with the given id.
    /// If no stop is found with the given id None is returned.
    pub fn stop_by_id(&self, id: &str) -> Option<&Stop> {
        let index = self.stop_lookup.get(id)?;
        Some(&self.stops[*index as usize])
    }

    pub fn trip_by_id(&self, id: &str) -> Option<&Trip> {
        let index = self.trip_lookup.get(id)?;
        Some(&self.trips[*index as usize])
    }

    pub fn route_by_id(&self, id: &str) -> Option<&Route> {
        let index = self.route_lookup.get(id)?;
        Some(&self.routes[*index as usize])
    }

    /// Gets the route a trip belongs to.
    /// None if the trip is unknown or points at a route that does not exist.
    pub fn route_by_trip_id(&self, trip_id: &str) -> Option<&Route> {
        let trip_idx = self.trip_lookup.get(trip_id)?;
        let route_idx = self.trip_to_route[*trip_idx as usize]?;
        Some(&self.routes[route_idx as usize])
    }

    /// Returns all the trips calling at a given stop, each once.
    /// If no stop was found with the given id None is returned.
    pub fn trips_by_stop_id(&self, stop_id: &str) -> Option<Vec<&Trip>> {
        let stop_idx = self.stop_lookup.get(stop_id)?;
        Some(
            self.stop_to_trips[*stop_idx as usize]
                .iter()
                .map(|trip_idx| &self.trips[*trip_idx as usize])
                .collect(),
        )
    }

    /// Returns the routes serving a stop, each once, in the order they are first met.
    /// Unknown stops and trips without a known route give nothing.
    pub fn routes_by_stop_id(&self, stop_id: &str) -> Vec<&Route> {
        match self.stop_lookup.get(stop_id) {
            Some(stop_idx) => self
                .route_indexes_by_stop(*stop_idx)
                .into_iter()
                .map(|route_idx| &self.routes[route_idx as usize])
                .collect(),
            None => Vec::new(),
        }
    }

    /// What the map shows when a stop is selected.
    pub fn routes_for_stop(&self, stop_id: &str) -> Vec<RouteView> {
        self.routes_by_stop_id(stop_id)
            .into_iter()
            .map(RouteView::from)
            .collect()
    }

    /// Returns the catalog stops a route calls at, in catalog order.
    pub fn stops_by_route_id(&self, route_id: &str) -> Vec<&Stop> {
        match self.route_lookup.get(route_id) {
            Some(route_idx) => self.route_to_stops[*route_idx as usize]
                .iter()
                .map(|stop_idx| &self.stops[*stop_idx as usize])
                .collect(),
            None => Vec::new(),
        }
    }

    // stop -> trips -> route, deduplicated while keeping the first occurrence
    pub(crate) fn route_indexes_by_stop(&self, stop_idx: u32) -> Vec<u32> {
        let mut seen: HashSet<u32> = HashSet::new();
        self.stop_to_trips[stop_idx as usize]
            .iter()
            .filter_map(|trip_idx| self.trip_to_route[*trip_idx as usize])
            .filter(|route_idx| seen.insert(*route_idx))
            .collect()
    }
}
