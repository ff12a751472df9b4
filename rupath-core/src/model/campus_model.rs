use crate::{CampusIndex, ParkingCatalog, RoutePlanner};

/// Everything built from the datasets at startup.
///
/// Read-only once constructed, so it can be shared between threads.
#[derive(Debug, Clone)]
pub struct CampusModel {
    pub index: CampusIndex,
    pub parking: ParkingCatalog,
}

impl CampusModel {
    pub fn new(index: CampusIndex, parking: ParkingCatalog) -> Self {
        Self { index, parking }
    }

    pub fn planner(&self) -> RoutePlanner<'_> {
        RoutePlanner::new(&self.index)
    }
}
