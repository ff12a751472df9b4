use serde::Serialize;

use crate::{RouteId, StopName};

/// Position of a building in the resolver's building table
pub type BuildingId = usize;

/// Campus building with the stop labels listed next to it in the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Building {
    pub name: String,
    pub campus: String,
    /// Raw labels, resolved to canonical stops when the index is built
    pub stop_labels: Vec<String>,
}

impl Building {
    pub fn new(
        name: impl Into<String>,
        campus: impl Into<String>,
        stop_labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            campus: campus.into(),
            stop_labels: stop_labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// One bus line and its full stop sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub route_id: RouteId,
    /// Stops in travel order. Blank names are kept so that the stops on
    /// either side of a gap never become neighbours.
    pub stops: Vec<StopName>,
}

impl Route {
    pub fn new(
        route_id: impl Into<RouteId>,
        stops: impl IntoIterator<Item = impl Into<StopName>>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            stops: stops
                .into_iter()
                .map(|stop| stop.into().trim().to_string())
                .collect(),
        }
    }

    /// Index of the first occurrence of `stop` on this line
    pub fn position(&self, stop: &str) -> Option<usize> {
        if stop.is_empty() {
            return None;
        }
        self.stops.iter().position(|s| s == stop)
    }

    /// Stops ridden from `from` to `to`, both ends included.
    ///
    /// The slice is reversed when `to` comes first in the line's order.
    pub fn segment(&self, from: &str, to: &str) -> Option<Vec<&str>> {
        let start = self.position(from)?;
        let end = self.position(to)?;

        let segment = if start <= end {
            self.stops[start..=end].iter().map(String::as_str).collect()
        } else {
            self.stops[end..=start]
                .iter()
                .rev()
                .map(String::as_str)
                .collect()
        };
        Some(segment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    Building,
    Stop,
}

/// Resolved origin or destination, either a building or a bare stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    /// Display name
    pub name: String,
    pub campus: Option<String>,
    pub kind: PlaceKind,
    /// Canonical stops usable from this place
    pub stops: Vec<StopName>,
}

impl Place {
    pub fn from_building(building: &Building, stops: &[StopName]) -> Self {
        Self {
            name: building.name.clone(),
            campus: Some(building.campus.clone()),
            kind: PlaceKind::Building,
            stops: stops.to_vec(),
        }
    }

    /// Synthetic place whose only nearby stop is the stop itself
    pub fn from_stop(stop: &str) -> Self {
        Self {
            name: stop.to_string(),
            campus: None,
            kind: PlaceKind::Stop,
            stops: vec![stop.to_string()],
        }
    }
}
