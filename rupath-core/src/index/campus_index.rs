use itertools::Itertools;
use log::{info, warn};

use super::names::{MatchThresholds, NameResolver};
use super::stop_graph::StopGraph;
use crate::{Building, BuildingId, Place, Route, StopName};

/// Read-only lookup structures for route planning.
///
/// Built once from the parsed datasets; a dataset change needs a full rebuild.
#[derive(Debug, Clone)]
pub struct CampusIndex {
    routes: Vec<Route>,
    graph: StopGraph,
    resolver: NameResolver,
    /// Canonical stops near each building, indexed by `BuildingId`
    building_stops: Vec<Vec<StopName>>,
}

impl CampusIndex {
    pub fn build<A, C>(
        buildings: impl IntoIterator<Item = Building>,
        routes: Vec<Route>,
        aliases: impl IntoIterator<Item = (A, C)>,
        thresholds: MatchThresholds,
    ) -> Self
    where
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let graph = StopGraph::build(&routes);

        let route_stops = routes
            .iter()
            .flat_map(|route| route.stops.iter())
            .filter(|stop| !stop.is_empty())
            .cloned()
            .collect::<Vec<_>>();
        let resolver = NameResolver::new(buildings, route_stops, aliases, thresholds);

        let building_stops: Vec<Vec<StopName>> = resolver
            .buildings()
            .iter()
            .map(|building| resolve_stop_labels(&resolver, &building.stop_labels))
            .collect();

        let stopless = building_stops.iter().filter(|stops| stops.is_empty()).count();
        if stopless > 0 {
            warn!(
                "{stopless} of {} buildings have no stop matching the route data",
                building_stops.len()
            );
        }

        info!(
            "Indexed {} routes, {} stops, {} connections, {} buildings",
            routes.len(),
            graph.stop_count(),
            graph.connection_count(),
            building_stops.len()
        );

        Self {
            routes,
            graph,
            resolver,
            building_stops,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn graph(&self) -> &StopGraph {
        &self.graph
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Precomputed canonical stops for an indexed building
    pub fn building_stops(&self, id: BuildingId) -> &[StopName] {
        self.building_stops
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve each stop label of `building`, dropping unknown labels and
    /// repeats while keeping first-seen order
    pub fn resolve_building_stops(&self, building: &Building) -> Vec<StopName> {
        resolve_stop_labels(&self.resolver, &building.stop_labels)
    }

    /// Resolve free text as a building first, then as a bare stop
    pub fn resolve_place(&self, text: &str) -> Option<Place> {
        if let Some(id) = self.resolver.resolve_building_id(text) {
            let building = self.resolver.building(id)?;
            return Some(Place::from_building(building, self.building_stops(id)));
        }

        self.resolver.resolve_stop(text).map(Place::from_stop)
    }
}

fn resolve_stop_labels(resolver: &NameResolver, labels: &[String]) -> Vec<StopName> {
    labels
        .iter()
        .filter_map(|label| resolver.resolve_stop(label))
        .unique()
        .map(str::to_string)
        .collect()
}
