use itertools::iproduct;

use crate::{Route, StopName};

/// A ride on one line that serves both an origin stop and a destination stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRide<'a> {
    pub origin_stop: &'a str,
    pub dest_stop: &'a str,
    pub route_id: &'a str,
    pub stops: Vec<&'a str>,
}

/// Direct ride with the fewest stops over all stop pairs and routes.
///
/// Enumeration is origin stop, then destination stop, then routes in
/// dataset order; the first of several equally short rides is kept.
pub fn best_direct_ride<'a>(
    routes: &'a [Route],
    origin_stops: &'a [StopName],
    dest_stops: &'a [StopName],
) -> Option<DirectRide<'a>> {
    let mut best: Option<DirectRide<'a>> = None;

    for (origin, dest) in iproduct!(origin_stops, dest_stops) {
        for route in routes {
            let Some(stops) = route.segment(origin, dest) else {
                continue;
            };
            if best
                .as_ref()
                .is_none_or(|current| stops.len() < current.stops.len())
            {
                best = Some(DirectRide {
                    origin_stop: origin,
                    dest_stop: dest,
                    route_id: &route.route_id,
                    stops,
                });
            }
        }
    }

    best
}
