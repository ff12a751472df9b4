//! This module is responsible for loading the campus datasets (buildings,
//! bus routes, parking permits) from JSON and building the campus model.

mod builder;
mod config;
mod parser;
pub mod raw_types;

pub use builder::create_campus_model;
pub use config::{CampusModelConfig, ExtraBuilding};
pub use parser::read_json_file;
