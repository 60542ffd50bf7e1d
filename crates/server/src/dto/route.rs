use arret::repository::{RouteType, RouteView};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDto {
    pub name: String,
    /// CSS color (`#rrggbb`), None when the feed has none.
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    pub icon: Option<String>,
}

impl RouteDto {
    pub fn from(route: &RouteView) -> Self {
        let color = if route.color.is_empty() {
            None
        } else {
            Some(format!("#{}", route.color))
        };
        Self {
            name: route.name.to_string(),
            color,
            route_type: route.route_type,
            icon: route.route_type.icon().map(String::from),
        }
    }
}
