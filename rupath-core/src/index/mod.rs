//! Lookup structures built once from the parsed datasets

mod campus_index;
pub mod names;
mod stop_graph;

pub use campus_index::CampusIndex;
pub use names::{MatchThresholds, NameResolver, normalize};
pub use stop_graph::StopGraph;
