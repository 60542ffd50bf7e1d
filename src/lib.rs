//! # arret
//!
//! Loads the four GTFS tables a transit map needs (`stops`, `stop_times`,
//! `trips`, `routes`), normalizes them into typed entities and answers
//! "which routes serve this stop?".
//!
//! ```
//! use arret::prelude::*;
//!
//! let stops = "stop_id,stop_name,stop_lat,stop_lon,location_type\nS1,Commerce,47.2,-1.5,0\n";
//! let stop_times = "trip_id,stop_id\nT1,S1\nT2,S1\n";
//! let trips = "trip_id,route_id\nT1,R1\nT2,R1\n";
//! let routes = "route_id,route_short_name,route_color,route_type\nR1,12,ff0000,3\n";
//!
//! let data = GtfsData {
//!     stops: gtfs::read_records(stops.as_bytes(), GtfsTable::Stops).unwrap(),
//!     stop_times: gtfs::read_records(stop_times.as_bytes(), GtfsTable::StopTimes).unwrap(),
//!     trips: gtfs::read_records(trips.as_bytes(), GtfsTable::Trips).unwrap(),
//!     routes: gtfs::read_records(routes.as_bytes(), GtfsTable::Routes).unwrap(),
//! };
//! let repository = Repository::new().with_data(&data);
//! let routes = repository.routes_for_stop("S1");
//! assert_eq!(routes.len(), 1);
//! assert_eq!(&*routes[0].name, "12");
//! assert_eq!(routes[0].route_type, RouteType::Bus);
//! ```

pub mod gtfs;
pub mod repository;
pub mod shared;

pub mod prelude {
    pub use crate::gtfs::{self, Config, GtfsData, GtfsReader, GtfsTable, Record};
    pub use crate::repository::{
        Diagnostics, LocationType, Normalized, Repository, Route, RouteType, RouteView,
        SkipReason, SkippedRow, Stop, StopTime, Trip, WheelchairBoarding, normalize,
    };
    pub use crate::shared::Coordinate;
}
