use log::info;

use super::config::CampusModelConfig;
use super::parser::read_json_or_default;
use super::raw_types::{FeedCampuses, FeedRoutes};
use crate::{Building, CampusIndex, CampusModel, Error, ParkingCatalog, Route};

/// Creates a campus model from the datasets named in the configuration
///
/// Unreadable datasets are replaced by empty ones, so this only fails on an
/// invalid configuration.
///
/// # Errors
///
/// Returns an error if the configuration does not validate
pub fn create_campus_model(config: &CampusModelConfig) -> Result<CampusModel, Error> {
    config.validate()?;

    info!("Loading buildings: {}", config.buildings_path.display());
    let campuses: FeedCampuses = read_json_or_default(&config.buildings_path);

    info!("Loading bus routes: {}", config.bus_routes_path.display());
    let feed_routes: FeedRoutes = read_json_or_default(&config.bus_routes_path);

    info!("Loading parking rules: {}", config.parking_path.display());
    let parking: ParkingCatalog = read_json_or_default(&config.parking_path);

    let index = CampusIndex::build(
        buildings_from_feed(campuses, config),
        routes_from_feed(feed_routes),
        &config.aliases,
        config.thresholds(),
    );
    info!(
        "Loaded {} parking permits and {} lots",
        parking.permit_count(),
        parking.lot_count()
    );

    info!("Campus model created successfully");
    Ok(CampusModel::new(index, parking))
}

fn buildings_from_feed(campuses: FeedCampuses, config: &CampusModelConfig) -> Vec<Building> {
    let dataset = campuses.into_iter().flat_map(|(campus, buildings)| {
        buildings
            .into_iter()
            .map(move |building| Building::new(building.name, campus.clone(), building.bus_stops))
    });
    let extra = config.extra_buildings.iter().map(|building| {
        Building::new(
            building.name.clone(),
            building.campus.clone(),
            building.bus_stops.clone(),
        )
    });

    // empty names are dropped by the resolver
    dataset.chain(extra).collect()
}

fn routes_from_feed(feed: FeedRoutes) -> Vec<Route> {
    feed.routes
        .into_iter()
        .map(|route| {
            Route::new(
                route.route_id,
                route.stops.into_iter().map(|stop| stop.stop_name),
            )
        })
        .collect()
}
