use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use itertools::iproduct;
use petgraph::graph::NodeIndex;

use crate::{StopGraph, StopName};

/// Stop path found between one origin stop and one destination stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopPath {
    pub origin_stop: StopName,
    pub dest_stop: StopName,
    pub stops: Vec<StopName>,
}

/// Breadth-first search for the path with the fewest hops between two stops.
///
/// Returns `None` if either stop is not in the graph or no path connects them.
/// Neighbours are expanded in node order, so equal-length paths always
/// resolve the same way.
pub fn shortest_stop_path(graph: &StopGraph, start: &str, goal: &str) -> Option<Vec<StopName>> {
    let start_node = graph.node(start)?;
    let goal_node = graph.node(goal)?;

    if start_node == goal_node {
        return Some(vec![start.to_string()]);
    }

    let mut visited = FixedBitSet::with_capacity(graph.stop_count());
    let mut previous: Vec<Option<NodeIndex>> = vec![None; graph.stop_count()];
    let mut queue = VecDeque::new();

    visited.insert(start_node.index());
    queue.push_back(start_node);

    while let Some(node) = queue.pop_front() {
        for next in graph.neighbor_nodes(node) {
            // `put` returns the previous bit, true means already seen
            if visited.put(next.index()) {
                continue;
            }
            previous[next.index()] = Some(node);

            if next == goal_node {
                return Some(reconstruct_path(graph, &previous, goal_node));
            }
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct_path(
    graph: &StopGraph,
    previous: &[Option<NodeIndex>],
    goal: NodeIndex,
) -> Vec<StopName> {
    let mut nodes = vec![goal];
    let mut current = goal;
    while let Some(prev) = previous[current.index()] {
        nodes.push(prev);
        current = prev;
    }

    nodes
        .into_iter()
        .rev()
        .map(|node| graph.name(node).to_string())
        .collect()
}

/// Shortest path over every origin x destination stop pair.
///
/// Pairs are tried origin-major; on equal length the first pair found is kept.
pub fn best_stop_path(
    graph: &StopGraph,
    origin_stops: &[StopName],
    dest_stops: &[StopName],
) -> Option<StopPath> {
    let mut best: Option<StopPath> = None;

    for (origin, dest) in iproduct!(origin_stops, dest_stops) {
        let Some(stops) = shortest_stop_path(graph, origin, dest) else {
            continue;
        };
        if best
            .as_ref()
            .is_none_or(|current| stops.len() < current.stops.len())
        {
            best = Some(StopPath {
                origin_stop: origin.clone(),
                dest_stop: dest.clone(),
                stops,
            });
        }
    }

    best
}
