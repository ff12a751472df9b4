use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use crate::{RouteId, StopGraph, StopName};

/// Contiguous part of a stop path ridden on one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    /// `None` when no known line serves any edge of the leg
    pub route_id: Option<RouteId>,
    pub from_stop: StopName,
    pub to_stop: StopName,
    pub stops: Vec<StopName>,
}

impl Leg {
    pub fn new(route_id: Option<RouteId>, stops: Vec<StopName>) -> Self {
        Self {
            route_id,
            from_stop: stops.first().cloned().unwrap_or_default(),
            to_stop: stops.last().cloned().unwrap_or_default(),
            stops,
        }
    }
}

/// Split a stop path into legs, one per line change.
///
/// Each leg starts at the first edge with a serving route and takes the
/// route that stays on the path longest (lowest route id on a tie). Uncovered
/// edges before that are folded into the same leg; a path with no covered
/// edge at all becomes a single leg without a route. Every edge ends up in
/// exactly one leg and neighbouring legs share their boundary stop.
pub fn compress_legs(graph: &StopGraph, path: &[StopName]) -> Vec<Leg> {
    let edge_routes: Vec<Option<&BTreeSet<RouteId>>> = path
        .iter()
        .tuple_windows()
        .map(|(a, b)| graph.edge_routes(a, b).filter(|routes| !routes.is_empty()))
        .collect();

    let mut legs = Vec::new();
    let mut start = 0;

    while start < edge_routes.len() {
        let ride = (start..edge_routes.len())
            .find(|&edge| edge_routes[edge].is_some())
            .and_then(|edge| {
                longest_run(&edge_routes, edge).map(|(route, run)| (route, edge + run))
            });

        let (route_id, end) = match ride {
            Some((route, end)) => (Some(route.clone()), end),
            None => (None, edge_routes.len()),
        };

        legs.push(Leg::new(route_id, path[start..=end].to_vec()));
        start = end;
    }

    legs
}

/// Route serving edge `from` that covers the most consecutive edges from there,
/// with the length of that run
fn longest_run<'a>(
    edge_routes: &[Option<&'a BTreeSet<RouteId>>],
    from: usize,
) -> Option<(&'a RouteId, usize)> {
    let mut best: Option<(&'a RouteId, usize)> = None;

    for route in edge_routes[from].into_iter().flatten() {
        let run = edge_routes[from..]
            .iter()
            .take_while(|routes| routes.is_some_and(|routes| routes.contains(route)))
            .count();
        if best.is_none_or(|(_, best_run)| run > best_run) {
            best = Some((route, run));
        }
    }

    best
}
