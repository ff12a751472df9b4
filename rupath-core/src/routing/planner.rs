use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use super::bfs::best_stop_path;
use super::direct::best_direct_ride;
use super::legs::{Leg, compress_legs};
use crate::{CampusIndex, Place, StopName};

/// Bus journey from one place to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusRoute {
    pub origin_place: Place,
    pub dest_place: Place,
    /// Stop where the rider boards
    pub origin_stop: StopName,
    /// Stop where the rider gets off
    pub dest_stop: StopName,
    pub stop_path: Vec<StopName>,
    pub legs: Vec<Leg>,
}

/// Expected planning failures. The display text is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("I couldn't find a building or bus stop named **{0}**.")]
    OriginNotFound(String),
    #[error("I couldn't find a building or bus stop named **{0}**.")]
    DestNotFound(String),
    #[error("I don't know any bus stops near **{0}**.")]
    OriginHasNoStops(String),
    #[error("I don't know any bus stops near **{0}**.")]
    DestHasNoStops(String),
    #[error("I couldn't find any bus path between **{origin}** and **{dest}** using the JSON routes.")]
    NoPathFound { origin: String, dest: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanErrorReason {
    OriginNotFound,
    DestNotFound,
    OriginHasNoStops,
    DestHasNoStops,
    NoPathFound,
}

impl PlanError {
    pub fn reason(&self) -> PlanErrorReason {
        match self {
            PlanError::OriginNotFound(_) => PlanErrorReason::OriginNotFound,
            PlanError::DestNotFound(_) => PlanErrorReason::DestNotFound,
            PlanError::OriginHasNoStops(_) => PlanErrorReason::OriginHasNoStops,
            PlanError::DestHasNoStops(_) => PlanErrorReason::DestHasNoStops,
            PlanError::NoPathFound { .. } => PlanErrorReason::NoPathFound,
        }
    }
}

pub type PlanResult = Result<BusRoute, PlanError>;

/// Plans bus journeys over a built [`CampusIndex`].
///
/// Holds only a shared reference, so any number of planners can run in
/// parallel over the same index.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlanner<'a> {
    index: &'a CampusIndex,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(index: &'a CampusIndex) -> Self {
        Self { index }
    }

    /// Plan a journey between two free-text places.
    ///
    /// A single line serving both places always wins, even when a transfer
    /// would visit fewer stops. Only without one does the planner search the
    /// stop graph and split the path into legs.
    pub fn plan(&self, origin_text: &str, dest_text: &str) -> PlanResult {
        let origin = self.index.resolve_place(origin_text);
        let dest = self.index.resolve_place(dest_text);

        let origin =
            origin.ok_or_else(|| PlanError::OriginNotFound(origin_text.trim().to_string()))?;
        let dest = dest.ok_or_else(|| PlanError::DestNotFound(dest_text.trim().to_string()))?;

        if origin.stops.is_empty() {
            return Err(PlanError::OriginHasNoStops(origin.name));
        }
        if dest.stops.is_empty() {
            return Err(PlanError::DestHasNoStops(dest.name));
        }

        if let Some(ride) = best_direct_ride(self.index.routes(), &origin.stops, &dest.stops) {
            debug!(
                "Direct ride on route {} from {} to {} ({} stops)",
                ride.route_id,
                ride.origin_stop,
                ride.dest_stop,
                ride.stops.len()
            );
            let stop_path: Vec<StopName> = ride.stops.iter().map(ToString::to_string).collect();
            // a one-stop path has no edge to ride
            let legs = if stop_path.len() > 1 {
                vec![Leg::new(Some(ride.route_id.to_string()), stop_path.clone())]
            } else {
                Vec::new()
            };
            let (origin_stop, dest_stop) =
                (ride.origin_stop.to_string(), ride.dest_stop.to_string());

            return Ok(BusRoute {
                origin_place: origin,
                dest_place: dest,
                origin_stop,
                dest_stop,
                stop_path,
                legs,
            });
        }

        let Some(path) = best_stop_path(self.index.graph(), &origin.stops, &dest.stops) else {
            debug!("No stop path between {} and {}", origin.name, dest.name);
            return Err(PlanError::NoPathFound {
                origin: origin.name,
                dest: dest.name,
            });
        };

        let legs = compress_legs(self.index.graph(), &path.stops);
        debug!(
            "Graph path from {} to {}: {} stops, {} legs",
            path.origin_stop,
            path.dest_stop,
            path.stops.len(),
            legs.len()
        );

        Ok(BusRoute {
            origin_place: origin,
            dest_place: dest,
            origin_stop: path.origin_stop,
            dest_stop: path.dest_stop,
            stop_path: path.stops,
            legs,
        })
    }

    /// Plan from one origin to many destinations in parallel.
    /// Results come back in the order of `dest_texts`.
    pub fn plan_one_to_many<S>(&self, origin_text: &str, dest_texts: &[S]) -> Vec<PlanResult>
    where
        S: AsRef<str> + Sync,
    {
        dest_texts
            .par_iter()
            .map(|dest| self.plan(origin_text, dest.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MatchThresholds;
    use crate::{Building, PlaceKind, Route};

    fn index() -> CampusIndex {
        CampusIndex::build(
            [
                Building::new("Hill Center", "Busch", ["Hill Center"]),
                Building::new("Lonely Hall", "Cook", ["Qqqqzzzz"]),
                Building::new(
                    "The Yard @ College Avenue",
                    "College Avenue",
                    ["The Yard", "College Ave Student Center"],
                ),
            ],
            vec![
                Route::new("A", ["Hill Center", "College Ave Student Center", "The Yard"]),
                Route::new("B", ["The Yard", "Livingston Student Center"]),
                Route::new("F", ["Cook Campus Center", "Douglass Library"]),
            ],
            [("yard", "The Yard @ College Avenue")],
            MatchThresholds::default(),
        )
    }

    #[test]
    fn test_origin_not_found() {
        let index = index();
        let err = RoutePlanner::new(&index)
            .plan("Nonexistent Hall", "The Yard")
            .unwrap_err();
        assert_eq!(err.reason(), PlanErrorReason::OriginNotFound);
        assert_eq!(
            err.to_string(),
            "I couldn't find a building or bus stop named **Nonexistent Hall**."
        );
    }

    #[test]
    fn test_dest_not_found() {
        let index = index();
        let err = RoutePlanner::new(&index)
            .plan("Hill Center", "Nonexistent Hall")
            .unwrap_err();
        assert_eq!(err.reason(), PlanErrorReason::DestNotFound);
    }

    #[test]
    fn test_origin_without_stops() {
        let index = index();
        let err = RoutePlanner::new(&index)
            .plan("Lonely Hall", "The Yard")
            .unwrap_err();
        assert_eq!(err, PlanError::OriginHasNoStops("Lonely Hall".to_string()));
    }

    #[test]
    fn test_dest_without_stops() {
        let index = index();
        let err = RoutePlanner::new(&index)
            .plan("Hill Center", "Lonely Hall")
            .unwrap_err();
        assert_eq!(err.reason(), PlanErrorReason::DestHasNoStops);
    }

    #[test]
    fn test_no_path_between_components() {
        let index = index();
        let err = RoutePlanner::new(&index)
            .plan("Hill Center", "Douglass Library")
            .unwrap_err();
        assert_eq!(err.reason(), PlanErrorReason::NoPathFound);
    }

    #[test]
    fn test_alias_destination_uses_nearest_building_stop() {
        let index = index();
        let route = RoutePlanner::new(&index).plan("Hill Center", "yard").unwrap();
        assert_eq!(route.dest_place.name, "The Yard @ College Avenue");
        assert_eq!(route.dest_stop, "College Ave Student Center");
        assert_eq!(route.legs.len(), 1);
    }

    #[test]
    fn test_bare_stop_place() {
        let index = index();
        let route = RoutePlanner::new(&index)
            .plan("Hill Center", "Livingston Student Center")
            .unwrap();
        assert_eq!(route.dest_place.kind, PlaceKind::Stop);
        assert_eq!(route.dest_place.campus, None);
    }

    #[test]
    fn test_same_stop_has_no_legs() {
        let index = index();
        let route = RoutePlanner::new(&index)
            .plan("Livingston Student Center", "Livingston Student Center")
            .unwrap();
        assert_eq!(route.stop_path, vec!["Livingston Student Center"]);
        assert!(route.legs.is_empty());
    }

    #[test]
    fn test_one_to_many_keeps_order() {
        let index = index();
        let planner = RoutePlanner::new(&index);
        let dests = ["The Yard", "Nonexistent Hall", "Livingston Student Center"];
        let results = planner.plan_one_to_many("Hill Center", &dests);

        assert_eq!(results.len(), 3);
        for (result, dest) in results.iter().zip(dests) {
            assert_eq!(result, &planner.plan("Hill Center", dest));
        }
    }
}
