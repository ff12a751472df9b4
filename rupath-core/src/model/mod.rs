//! Data model for campus places and bus routes
//!
//! Contains the immutable records the indexes are built from.

pub mod campus_model;
pub mod types;

pub use campus_model::CampusModel;
pub use types::{Building, BuildingId, Place, PlaceKind, Route};
