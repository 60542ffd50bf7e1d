use rayon::prelude::*;
use std::{collections::HashMap, sync::Arc, time::Instant};
use tracing::{debug, trace, warn};

use crate::{
    gtfs::{GtfsData, GtfsTable, Record},
    repository::{LocationType, Route, RouteType, Stop, StopTime, Trip, WheelchairBoarding},
    shared::Coordinate,
};

/// Why a row did not make it into the normalized tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// `stop_lat` or `stop_lon` is missing or not a finite number.
    InvalidCoordinate,
    /// The stop is a station, entrance or any other non boarding location.
    NotBoardingStop,
    /// An identifier column is missing or empty.
    MissingField(&'static str),
    /// A later row of the same table uses the same id.
    DuplicateId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub table: GtfsTable,
    /// Zero-based position of the row in its source table.
    pub row: usize,
    pub reason: SkipReason,
}

/// Every row dropped during normalization.
/// Skipping is never an error, this is only here so callers can report it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Diagnostics {
    pub skipped: Vec<SkippedRow>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn count_by_table(&self, table: GtfsTable) -> usize {
        self.skipped.iter().filter(|row| row.table == table).count()
    }

    pub fn count_by_reason(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|row| row.reason == reason).count()
    }
}

/// The typed tables a [`Repository`](crate::repository::Repository) is built from.
#[derive(Debug, Default, Clone)]
pub struct Normalized {
    /// The stop catalog, boarding stops only, in source order.
    pub stops: Vec<Stop>,
    pub stop_times: Vec<StopTime>,
    pub trips: Vec<Trip>,
    pub routes: Vec<Route>,
    pub diagnostics: Diagnostics,
}

/// Turns the raw rows of all four tables into typed entities.
/// Malformed rows are skipped and listed in [`Normalized::diagnostics`].
pub fn normalize(data: &GtfsData) -> Normalized {
    let now = Instant::now();
    let (stops, mut skipped) = normalize_stops(&data.stops);
    let (stop_times, skipped_stop_times) = normalize_stop_times(&data.stop_times);
    let (trips, skipped_trips) = normalize_trips(&data.trips);
    let (routes, skipped_routes) = normalize_routes(&data.routes);
    skipped.extend(skipped_stop_times);
    skipped.extend(skipped_trips);
    skipped.extend(skipped_routes);

    let diagnostics = Diagnostics { skipped };
    if !diagnostics.is_empty() {
        for table in GtfsTable::ALL {
            let count = diagnostics.count_by_table(table);
            if count > 0 {
                warn!("Skipped {count} of {} {table} rows", data.table(table).len());
            }
        }
    }
    debug!("Normalizing tables took {:?}", now.elapsed());

    Normalized {
        stops,
        stop_times,
        trips,
        routes,
        diagnostics,
    }
}

pub fn normalize_stops(records: &[Record]) -> (Vec<Stop>, Vec<SkippedRow>) {
    let (stops, mut skipped) = project(records, GtfsTable::Stops, |record| {
        let id = required(record, "stop_id")?;
        let location_type = field(record, "location_type")
            .map(LocationType::from)
            .unwrap_or_default();
        if !location_type.is_boarding() {
            return Err(SkipReason::NotBoardingStop);
        }
        let coordinate = Coordinate::parse(
            field(record, "stop_lat").unwrap_or_default(),
            field(record, "stop_lon").unwrap_or_default(),
        )
        .ok_or(SkipReason::InvalidCoordinate)?;

        Ok(Stop {
            index: 0,
            id: id.into(),
            name: field(record, "stop_name").unwrap_or_default().into(),
            description: field(record, "stop_desc").map(Arc::from),
            coordinate,
            wheelchair_boarding: field(record, "wheelchair_boarding")
                .map(WheelchairBoarding::from)
                .unwrap_or_default(),
            location_type,
        })
    });
    let (stops, duplicates) = keep_last(stops, GtfsTable::Stops, |stop| &stop.id);
    skipped.extend(duplicates);
    let stops = reindex(stops, |stop, i| stop.index = i);
    (stops, skipped)
}

pub fn normalize_stop_times(records: &[Record]) -> (Vec<StopTime>, Vec<SkippedRow>) {
    let (stop_times, skipped) = project(records, GtfsTable::StopTimes, |record| {
        Ok(StopTime {
            stop_id: required(record, "stop_id")?.into(),
            trip_id: required(record, "trip_id")?.into(),
        })
    });
    (
        stop_times.into_iter().map(|(_, value)| value).collect(),
        skipped,
    )
}

pub fn normalize_trips(records: &[Record]) -> (Vec<Trip>, Vec<SkippedRow>) {
    let (trips, mut skipped) = project(records, GtfsTable::Trips, |record| {
        Ok(Trip {
            index: 0,
            id: required(record, "trip_id")?.into(),
            route_id: required(record, "route_id")?.into(),
        })
    });
    let (trips, duplicates) = keep_last(trips, GtfsTable::Trips, |trip| &trip.id);
    skipped.extend(duplicates);
    let trips = reindex(trips, |trip, i| trip.index = i);
    (trips, skipped)
}

pub fn normalize_routes(records: &[Record]) -> (Vec<Route>, Vec<SkippedRow>) {
    let (routes, mut skipped) = project(records, GtfsTable::Routes, |record| {
        let color = field(record, "route_color").unwrap_or_default();
        Ok(Route {
            index: 0,
            id: required(record, "route_id")?.into(),
            short_name: field(record, "route_short_name").unwrap_or_default().into(),
            color: color.strip_prefix('#').unwrap_or(color).into(),
            route_type: field(record, "route_type")
                .map(RouteType::from)
                .unwrap_or_default(),
        })
    });
    let (routes, duplicates) = keep_last(routes, GtfsTable::Routes, |route| &route.id);
    skipped.extend(duplicates);
    let routes = reindex(routes, |route, i| route.index = i);
    (routes, skipped)
}

/// Maps every record in parallel while keeping source order for both outputs.
/// Kept values carry the position of the row they came from.
fn project<T, F>(records: &[Record], table: GtfsTable, f: F) -> (Vec<(usize, T)>, Vec<SkippedRow>)
where
    T: Send,
    F: Fn(&Record) -> Result<T, SkipReason> + Sync,
{
    let results: Vec<Result<T, SkipReason>> = records.par_iter().map(&f).collect();
    let mut values = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for (row, result) in results.into_iter().enumerate() {
        match result {
            Ok(value) => values.push((row, value)),
            Err(reason) => {
                trace!("Skipping {table} row {row}: {reason:?}");
                skipped.push(SkippedRow { table, row, reason });
            }
        }
    }
    (values, skipped)
}

/// Drops every row whose id shows up again further down, the last row wins.
fn keep_last<T, F>(values: Vec<(usize, T)>, table: GtfsTable, id: F) -> (Vec<T>, Vec<SkippedRow>)
where
    F: Fn(&T) -> &Arc<str>,
{
    let mut last: HashMap<Arc<str>, usize> = HashMap::new();
    values.iter().for_each(|(row, value)| {
        last.insert(id(value).clone(), *row);
    });

    let mut kept = Vec::with_capacity(last.len());
    let mut skipped = Vec::new();
    for (row, value) in values {
        if last.get(id(&value)) == Some(&row) {
            kept.push(value);
        } else {
            trace!("Skipping {table} row {row}: duplicate id {}", id(&value));
            skipped.push(SkippedRow {
                table,
                row,
                reason: SkipReason::DuplicateId,
            });
        }
    }
    (kept, skipped)
}

// Indexes are u32, a single table is bounded to u32::MAX rows.
fn reindex<T, F>(mut values: Vec<T>, set: F) -> Vec<T>
where
    F: Fn(&mut T, u32),
{
    values
        .iter_mut()
        .enumerate()
        .for_each(|(i, value)| set(value, i as u32));
    values
}

/// A non empty value, GTFS treats empty cells as absent.
fn field<'a>(record: &'a Record, column: &str) -> Option<&'a str> {
    record
        .get(column)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn required<'a>(record: &'a Record, column: &'static str) -> Result<&'a str, SkipReason> {
    field(record, column).ok_or(SkipReason::MissingField(column))
}
