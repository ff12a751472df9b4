//! Stop adjacency graph built from route stop sequences

use std::collections::BTreeSet;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::{Route, RouteId, StopName};

/// Undirected graph over canonical stops.
///
/// Two stops are adjacent when they are consecutive on at least one route.
/// Each edge carries the set of routes serving that pair, so the lookup is
/// the same whichever way the pair is asked for.
#[derive(Debug, Clone, Default)]
pub struct StopGraph {
    graph: UnGraph<StopName, BTreeSet<RouteId>>,
    nodes: HashMap<StopName, NodeIndex>,
}

impl StopGraph {
    pub fn build(routes: &[Route]) -> Self {
        let mut stop_graph = Self::default();

        for route in routes {
            for (a, b) in route.stops.iter().tuple_windows() {
                if a.is_empty() || b.is_empty() {
                    continue;
                }
                stop_graph.add_connection(a, b, &route.route_id);
            }
        }

        stop_graph
    }

    fn add_connection(&mut self, a: &str, b: &str, route_id: &str) {
        let from = self.node_or_insert(a);
        let to = self.node_or_insert(b);

        match self.graph.find_edge(from, to) {
            Some(edge) => {
                self.graph[edge].insert(route_id.to_string());
            }
            None => {
                self.graph
                    .add_edge(from, to, BTreeSet::from([route_id.to_string()]));
            }
        }
    }

    fn node_or_insert(&mut self, stop: &str) -> NodeIndex {
        if let Some(&node) = self.nodes.get(stop) {
            return node;
        }
        let node = self.graph.add_node(stop.to_string());
        self.nodes.insert(stop.to_string(), node);
        node
    }

    pub fn contains(&self, stop: &str) -> bool {
        self.nodes.contains_key(stop)
    }

    pub fn stop_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Stop names in insertion order
    pub fn stops(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Routes serving the consecutive pair `(a, b)`, in either direction
    pub fn edge_routes(&self, a: &str, b: &str) -> Option<&BTreeSet<RouteId>> {
        let from = self.node(a)?;
        let to = self.node(b)?;
        self.graph.find_edge(from, to).map(|edge| &self.graph[edge])
    }

    /// Adjacent stop names, ordered by first appearance in the route data
    pub fn neighbors(&self, stop: &str) -> Vec<&str> {
        self.node(stop)
            .map(|node| {
                self.neighbor_nodes(node)
                    .into_iter()
                    .map(|n| self.name(n))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn node(&self, stop: &str) -> Option<NodeIndex> {
        self.nodes.get(stop).copied()
    }

    pub(crate) fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// Neighbours sorted by node index, deduplicated
    pub(crate) fn neighbor_nodes(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors(node).sorted().dedup().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> Vec<Route> {
        vec![
            Route::new("A", ["Hill Center", "College Ave Student Center", "The Yard"]),
            Route::new("B", ["The Yard", "Livingston Student Center"]),
            Route::new("C", ["The Yard", "College Ave Student Center", "", "Busch"]),
        ]
    }

    #[test]
    fn test_build_counts() {
        let graph = StopGraph::build(&routes());
        assert_eq!(graph.stop_count(), 4);
        assert_eq!(graph.connection_count(), 3);
        assert!(!graph.contains("Busch"));
    }

    #[test]
    fn test_blank_stop_breaks_adjacency() {
        let graph = StopGraph::build(&routes());
        assert!(graph.edge_routes("College Ave Student Center", "Busch").is_none());
        assert!(!graph.contains(""));
    }

    #[test]
    fn test_edge_routes_are_symmetric() {
        let graph = StopGraph::build(&routes());
        let stops: Vec<&str> = graph.stops().collect();
        for a in &stops {
            for b in &stops {
                assert_eq!(graph.edge_routes(a, b), graph.edge_routes(b, a));
            }
        }
    }

    #[test]
    fn test_shared_edge_collects_all_routes() {
        let graph = StopGraph::build(&routes());
        let served = graph
            .edge_routes("The Yard", "College Ave Student Center")
            .unwrap();
        assert_eq!(
            served.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["A", "C"]
        );
    }

    #[test]
    fn test_neighbors_in_first_seen_order() {
        let graph = StopGraph::build(&routes());
        assert_eq!(
            graph.neighbors("The Yard"),
            vec!["College Ave Student Center", "Livingston Student Center"]
        );
        assert!(graph.neighbors("Nowhere").is_empty());
    }

    #[test]
    fn test_empty_routes_build_empty_graph() {
        let graph = StopGraph::build(&[]);
        assert_eq!(graph.stop_count(), 0);
        assert!(graph.edge_routes("A", "B").is_none());
    }
}
