//! Campus parking and bus routing over static JSON datasets.
//!
//! The crate builds read-only indexes from the building, bus route and
//! parking datasets once at startup, then answers route planning, permit
//! lookups and free-text chat questions against them.

pub mod chat;
pub mod error;
pub mod index;
pub mod loading;
pub mod model;
pub mod parking;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use index::{CampusIndex, NameResolver, StopGraph};
pub use loading::{CampusModelConfig, create_campus_model};
pub use model::{Building, BuildingId, CampusModel, Place, PlaceKind, Route};
pub use parking::{ParkingAnswer, ParkingCatalog, ParkingError};
pub use routing::{BusRoute, Leg, PlanError, PlanResult, RoutePlanner, describe_plan};

/// Canonical stop name, exactly as spelled in the route dataset
pub type StopName = String;

/// Bus line identifier from the route dataset
pub type RouteId = String;
