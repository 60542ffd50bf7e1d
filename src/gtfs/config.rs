use crate::gtfs::GtfsTable;

/// File names of the four sources inside a feed directory or archive.
#[derive(Debug, Clone)]
pub struct Config {
    pub stops_file_name: String,
    pub stop_times_file_name: String,
    pub trips_file_name: String,
    pub routes_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_file_name: "stops.txt".into(),
            stop_times_file_name: "stop_times.txt".into(),
            trips_file_name: "trips.txt".into(),
            routes_file_name: "routes.txt".into(),
        }
    }
}

impl Config {
    /// Same tables, exported with a `.csv` extension.
    pub fn csv() -> Self {
        Self {
            stops_file_name: "stops.csv".into(),
            stop_times_file_name: "stop_times.csv".into(),
            trips_file_name: "trips.csv".into(),
            routes_file_name: "routes.csv".into(),
        }
    }

    pub fn file_name(&self, table: GtfsTable) -> &str {
        match table {
            GtfsTable::Stops => &self.stops_file_name,
            GtfsTable::StopTimes => &self.stop_times_file_name,
            GtfsTable::Trips => &self.trips_file_name,
            GtfsTable::Routes => &self.routes_file_name,
        }
    }
}
