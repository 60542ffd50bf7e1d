use crate::{
    gtfs::{self, GtfsData, GtfsReader},
    repository::{Normalized, Repository, Route, Stop, StopTime, Trip, normalize},
};
use rayon::prelude::*;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Instant,
};
use tracing::debug;

impl Repository {
    /// Reads the four tables of a feed and builds the index from them.
    /// Nothing is built unless every table could be read.
    pub fn load_gtfs(self, gtfs: &GtfsReader) -> Result<Self, gtfs::Error> {
        let data = gtfs.read()?;
        Ok(self.with_data(&data))
    }

    /// Normalizes raw rows and builds the index from them.
    pub fn with_data(self, data: &GtfsData) -> Self {
        self.with_normalized(normalize(data))
    }

    /// Builds the index from already normalized tables.
    /// Replaces anything the repository held before.
    pub fn with_normalized(mut self, normalized: Normalized) -> Self {
        let now = Instant::now();
        let Normalized {
            stops,
            stop_times,
            trips,
            routes,
            diagnostics,
        } = normalized;

        self.load_stops(stops);
        self.load_routes(routes);
        self.load_trips(trips);
        self.load_stop_times(&stop_times);
        self.generate_route_stops();
        self.diagnostics = diagnostics;
        debug!("Building transit index took {:?}", now.elapsed());
        self
    }

    fn load_stops(&mut self, stops: Vec<Stop>) {
        self.stop_lookup = lookup(stops.iter().map(|stop| &stop.id));
        self.stops = stops.into();
    }

    fn load_routes(&mut self, routes: Vec<Route>) {
        self.route_lookup = lookup(routes.iter().map(|route| &route.id));
        self.routes = routes.into();
    }

    fn load_trips(&mut self, trips: Vec<Trip>) {
        debug!("Loading trips...");
        let now = Instant::now();
        self.trip_lookup = lookup(trips.iter().map(|trip| &trip.id));
        self.trip_to_route = trips
            .iter()
            .map(|trip| self.route_lookup.get(&trip.route_id).copied())
            .collect();
        let dangling = self.trip_to_route.iter().filter(|idx| idx.is_none()).count();
        if dangling > 0 {
            debug!("{dangling} trips reference an unknown route");
        }
        self.trips = trips.into();
        debug!("Loading trips took {:?}", now.elapsed());
    }

    fn load_stop_times(&mut self, stop_times: &[StopTime]) {
        debug!("Loading stop times...");
        let now = Instant::now();
        let mut stop_to_trips: Vec<Vec<u32>> = vec![Vec::new(); self.stops.len()];
        let mut seen: HashSet<(u32, u32)> = HashSet::new();
        let mut dangling = 0;
        for stop_time in stop_times {
            let stop_idx = self.stop_lookup.get(&stop_time.stop_id);
            let trip_idx = self.trip_lookup.get(&stop_time.trip_id);
            match (stop_idx, trip_idx) {
                (Some(stop_idx), Some(trip_idx)) => {
                    if seen.insert((*stop_idx, *trip_idx)) {
                        stop_to_trips[*stop_idx as usize].push(*trip_idx);
                    }
                }
                _ => dangling += 1,
            }
        }
        if dangling > 0 {
            debug!("{dangling} stop times reference an unknown stop or trip");
        }
        self.stop_to_trips = stop_to_trips
            .into_iter()
            .map(|trips| trips.into())
            .collect();
        debug!("Loading stop times took {:?}", now.elapsed());
    }

    fn generate_route_stops(&mut self) {
        debug!("Generating route stops...");
        let now = Instant::now();
        let stop_routes: Vec<Vec<u32>> = (0..self.stops.len() as u32)
            .into_par_iter()
            .map(|stop_idx| self.route_indexes_by_stop(stop_idx))
            .collect();
        let mut route_to_stops: Vec<Vec<u32>> = vec![Vec::new(); self.routes.len()];
        for (stop_idx, routes) in stop_routes.into_iter().enumerate() {
            for route_idx in routes {
                route_to_stops[route_idx as usize].push(stop_idx as u32);
            }
        }
        self.route_to_stops = route_to_stops
            .into_iter()
            .map(|stops| stops.into())
            .collect();
        debug!("Generating route stops took {:?}", now.elapsed());
    }
}

fn lookup<'a, I>(ids: I) -> HashMap<Arc<str>, u32>
where
    I: Iterator<Item = &'a Arc<str>>,
{
    let mut lookup = HashMap::new();
    ids.enumerate().for_each(|(i, id)| {
        lookup.insert(id.clone(), i as u32);
    });
    lookup
}
