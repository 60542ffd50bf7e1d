use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shared::geo::Coordinate;

/// Categorizes the specific nature of a stop location (`location_type`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// A stop or platform where passengers board (`0` or empty).
    #[default]
    Stop,
    /// A station holding one or more platforms (`1`).
    Station,
    /// An entrance or exit of a station (`2`).
    Entrance,
    /// A location inside a station not matching any other type (`3`).
    GenericNode,
    /// A specific location on a platform (`4`).
    BoardingArea,
    /// Any code outside the ones above.
    Unknown,
}

impl From<&str> for LocationType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "0" => LocationType::Stop,
            "1" => LocationType::Station,
            "2" => LocationType::Entrance,
            "3" => LocationType::GenericNode,
            "4" => LocationType::BoardingArea,
            _ => LocationType::Unknown,
        }
    }
}

impl LocationType {
    /// Only boarding stops end up in the stop catalog.
    pub fn is_boarding(&self) -> bool {
        matches!(self, LocationType::Stop)
    }
}

/// Whether a stop can be boarded in a wheelchair (`wheelchair_boarding`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelchairBoarding {
    #[default]
    Unknown,
    Accessible,
    NotAccessible,
}

impl From<&str> for WheelchairBoarding {
    fn from(value: &str) -> Self {
        match value.trim() {
            "1" => WheelchairBoarding::Accessible,
            "2" => WheelchairBoarding::NotAccessible,
            _ => WheelchairBoarding::Unknown,
        }
    }
}

impl WheelchairBoarding {
    pub fn is_accessible(&self) -> bool {
        matches!(self, WheelchairBoarding::Accessible)
    }
}

/// Kind of vehicle used on a route (`route_type`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
    CableTram,
    AerialLift,
    Funicular,
    Trolleybus,
    Monorail,
    #[default]
    Unknown,
}

impl From<&str> for RouteType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "0" => RouteType::Tram,
            "1" => RouteType::Subway,
            "2" => RouteType::Rail,
            "3" => RouteType::Bus,
            "4" => RouteType::Ferry,
            "5" => RouteType::CableTram,
            "6" => RouteType::AerialLift,
            "7" => RouteType::Funicular,
            "11" => RouteType::Trolleybus,
            "12" => RouteType::Monorail,
            _ => RouteType::Unknown,
        }
    }
}

impl RouteType {
    /// The GTFS code this type was read from, None for [`RouteType::Unknown`].
    pub fn code(&self) -> Option<u16> {
        match self {
            RouteType::Tram => Some(0),
            RouteType::Subway => Some(1),
            RouteType::Rail => Some(2),
            RouteType::Bus => Some(3),
            RouteType::Ferry => Some(4),
            RouteType::CableTram => Some(5),
            RouteType::AerialLift => Some(6),
            RouteType::Funicular => Some(7),
            RouteType::Trolleybus => Some(11),
            RouteType::Monorail => Some(12),
            RouteType::Unknown => None,
        }
    }

    /// Marker icon for the map. Only trams and buses have one.
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            RouteType::Tram => Some("tram"),
            RouteType::Bus => Some("bus"),
            _ => None,
        }
    }
}

/// A boarding stop as shown on the map.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stop {
    /// Position of this stop in the stop catalog.
    pub index: u32,
    /// Unique external identifier for the stop.
    pub id: Arc<str>,
    /// Human-readable name (e.g., "Commerce").
    pub name: Arc<str>,
    pub description: Option<Arc<str>>,
    /// Always finite, rows with unusable coordinates never become a stop.
    pub coordinate: Coordinate,
    pub wheelchair_boarding: WheelchairBoarding,
    pub location_type: LocationType,
}

/// A journey of a vehicle, only kept for the route it belongs to.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Trip {
    pub index: u32,
    pub id: Arc<str>,
    /// Soft reference, the route may not exist.
    pub route_id: Arc<str>,
}

/// A scheduled call of a trip at a stop.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StopTime {
    pub stop_id: Arc<str>,
    pub trip_id: Arc<str>,
}

/// A grouping of trips displayed to riders under a single name (e.g., "C1").
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Route {
    pub index: u32,
    pub id: Arc<str>,
    /// Empty when the feed gives no short name.
    pub short_name: Arc<str>,
    /// Hex color without the leading `#`, empty when missing.
    pub color: Arc<str>,
    pub route_type: RouteType,
}

/// What the map shows for a route serving a stop.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct RouteView {
    pub name: Arc<str>,
    pub color: Arc<str>,
    pub route_type: RouteType,
}

impl From<&Route> for RouteView {
    fn from(value: &Route) -> Self {
        Self {
            name: value.short_name.clone(),
            color: value.color.clone(),
            route_type: value.route_type,
        }
    }
}
