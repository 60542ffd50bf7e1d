use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parses a latitude/longitude pair of raw values.
    /// Returns None unless both parse to finite numbers.
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        let latitude = parse_finite(latitude)?;
        let longitude = parse_finite(longitude)?;
        Some(Self::new(latitude, longitude))
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[test]
fn parse_test() {
    let coordinate = Coordinate::parse("47.218371", " -1.553621 ").unwrap();
    assert_eq!(coordinate, Coordinate::new(47.218371, -1.553621));
}

#[test]
fn parse_rejects_non_finite_test() {
    assert!(Coordinate::parse("NaN", "1.0").is_none());
    assert!(Coordinate::parse("1.0", "inf").is_none());
    assert!(Coordinate::parse("abc", "1.0").is_none());
    assert!(Coordinate::parse("", "1.0").is_none());
}
