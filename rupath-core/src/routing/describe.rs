use serde_json::{Value as JsonValue, json};

use super::planner::{BusRoute, PlanResult};

/// Human-readable directions for a plan.
///
/// Lines always run in the same order: walk to the boarding stop, one line
/// per leg in path order, then walk from the last stop. Errors are returned
/// as their message, unchanged.
pub fn describe_plan(plan: &PlanResult) -> String {
    match plan {
        Ok(route) => describe_bus_route(route),
        Err(err) => err.to_string(),
    }
}

pub fn describe_bus_route(route: &BusRoute) -> String {
    let mut lines = vec![format!(
        "From **{}**, walk to **{}**.",
        route.origin_place.name, route.origin_stop
    )];

    if route.legs.is_empty() {
        lines.push(format!("Then ride the next bus to **{}**.", route.dest_stop));
    } else {
        lines.push("Then:".to_string());
        for (idx, leg) in route.legs.iter().enumerate() {
            let line = match &leg.route_id {
                Some(route_id) => format!(
                    "{}. Take route **{route_id}** from **{}** to **{}**.",
                    idx + 1,
                    leg.from_stop,
                    leg.to_stop
                ),
                None => format!(
                    "{}. Travel from **{}** to **{}** (route not identified in JSON).",
                    idx + 1,
                    leg.from_stop,
                    leg.to_stop
                ),
            };
            lines.push(line);
        }
    }

    lines.push(format!(
        "Get off at **{}** and walk to **{}**.",
        route.dest_stop, route.dest_place.name
    ));

    lines.join("\n")
}

/// JSON form of a plan, tagged by `type`, with the rendered directions attached
pub fn plan_to_json(plan: &PlanResult) -> JsonValue {
    match plan {
        Ok(route) => json!({
            "type": "bus_route",
            "origin_place": route.origin_place,
            "dest_place": route.dest_place,
            "origin_stop": route.origin_stop,
            "dest_stop": route.dest_stop,
            "stop_path": route.stop_path,
            "legs": route.legs,
            "description": describe_bus_route(route),
        }),
        Err(err) => json!({
            "type": "error",
            "reason": err.reason(),
            "message": err.to_string(),
        }),
    }
}
