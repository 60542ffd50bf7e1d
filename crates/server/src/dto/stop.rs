use arret::{
    repository::{Stop, WheelchairBoarding},
    shared::geo::Coordinate,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub coordinate: Coordinate,
    pub accessible: bool,
    pub wheelchair_boarding: WheelchairBoarding,
}

impl StopDto {
    pub fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
            description: stop.description.as_ref().map(|value| value.to_string()),
            coordinate: stop.coordinate,
            accessible: stop.wheelchair_boarding.is_accessible(),
            wheelchair_boarding: stop.wheelchair_boarding,
        }
    }
}
