//! Bus route planning over the stop graph
//!
//! A direct line between the two places is preferred; otherwise the fewest-hop
//! stop path is found by breadth-first search and split into legs.

pub mod bfs;
pub mod describe;
pub mod direct;
pub mod legs;
pub mod planner;

pub use describe::{describe_bus_route, describe_plan, plan_to_json};
pub use legs::Leg;
pub use planner::{BusRoute, PlanError, PlanErrorReason, PlanResult, RoutePlanner};
