// Re-export key components
pub use crate::chat::{Assistant, Mode, Reply, SessionContext, SessionStore};
pub use crate::index::{CampusIndex, NameResolver, StopGraph};
pub use crate::loading::{CampusModelConfig, create_campus_model};
pub use crate::model::{Building, BuildingId, CampusModel, Place, PlaceKind, Route};
pub use crate::parking::{ParkingAnswer, ParkingCatalog, ParkingError, describe_parking};
pub use crate::routing::{
    BusRoute, Leg, PlanError, PlanErrorReason, PlanResult, RoutePlanner, describe_plan,
};

pub use crate::Error;
pub use crate::RouteId;
pub use crate::StopName;
