use std::{collections::HashMap, fmt::Display};

/// One parsed CSV row, column name to raw value.
pub type Record = HashMap<String, String>;

/// The raw rows of the four sources, exactly as read.
#[derive(Default, Debug, Clone)]
pub struct GtfsData {
    pub stops: Vec<Record>,
    pub stop_times: Vec<Record>,
    pub trips: Vec<Record>,
    pub routes: Vec<Record>,
}

impl GtfsData {
    pub fn table(&self, table: GtfsTable) -> &[Record] {
        match table {
            GtfsTable::Stops => &self.stops,
            GtfsTable::StopTimes => &self.stop_times,
            GtfsTable::Trips => &self.trips,
            GtfsTable::Routes => &self.routes,
        }
    }
}

impl From<Vec<(GtfsTable, Vec<Record>)>> for GtfsData {
    fn from(value: Vec<(GtfsTable, Vec<Record>)>) -> Self {
        let mut data = Self::default();
        value.into_iter().for_each(|(table, records)| match table {
            GtfsTable::Stops => data.stops = records,
            GtfsTable::StopTimes => data.stop_times = records,
            GtfsTable::Trips => data.trips = records,
            GtfsTable::Routes => data.routes = records,
        });
        data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GtfsTable {
    Stops,
    StopTimes,
    Trips,
    Routes,
}

impl GtfsTable {
    pub const ALL: [GtfsTable; 4] = [
        GtfsTable::Stops,
        GtfsTable::StopTimes,
        GtfsTable::Trips,
        GtfsTable::Routes,
    ];

    /// Columns a source must declare in its header to be usable at all.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            GtfsTable::Stops => &["stop_id", "stop_lat", "stop_lon"],
            GtfsTable::StopTimes => &["stop_id", "trip_id"],
            GtfsTable::Trips => &["trip_id", "route_id"],
            GtfsTable::Routes => &["route_id"],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GtfsTable::Stops => "stops",
            GtfsTable::StopTimes => "stop_times",
            GtfsTable::Trips => "trips",
            GtfsTable::Routes => "routes",
        }
    }
}

impl Display for GtfsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
