use rupath_core::index::MatchThresholds;
use rupath_core::prelude::*;

fn scenario_index() -> CampusIndex {
    CampusIndex::build(
        [
            Building::new("Hill Center", "Busch", ["Hill Center"]),
            Building::new("Lonely Hall", "Cook", ["Zzqx Terminal 9"]),
        ],
        vec![
            Route::new("A", ["Hill Center", "College Ave Student Center", "The Yard"]),
            Route::new("B", ["The Yard", "Livingston Student Center"]),
            Route::new("F", ["Cook Campus Center", "Douglass Library"]),
        ],
        std::iter::empty::<(&str, &str)>(),
        MatchThresholds::default(),
    )
}

fn leg_summary(route: &BusRoute) -> Vec<(Option<&str>, &str, &str)> {
    route
        .legs
        .iter()
        .map(|leg| {
            (
                leg.route_id.as_deref(),
                leg.from_stop.as_str(),
                leg.to_stop.as_str(),
            )
        })
        .collect()
}

#[test]
fn transfer_between_two_lines() {
    let index = scenario_index();
    let route = RoutePlanner::new(&index)
        .plan("Hill Center", "Livingston Student Center")
        .unwrap();

    assert_eq!(
        route.stop_path,
        vec![
            "Hill Center",
            "College Ave Student Center",
            "The Yard",
            "Livingston Student Center"
        ]
    );
    assert_eq!(
        leg_summary(&route),
        vec![
            (Some("A"), "Hill Center", "The Yard"),
            (Some("B"), "The Yard", "Livingston Student Center"),
        ]
    );
}

#[test]
fn single_line_trip_is_one_leg() {
    let index = scenario_index();
    let route = RoutePlanner::new(&index)
        .plan("Hill Center", "The Yard")
        .unwrap();
    assert_eq!(leg_summary(&route), vec![(Some("A"), "Hill Center", "The Yard")]);
}

#[test]
fn unknown_origin() {
    let index = scenario_index();
    let err = RoutePlanner::new(&index)
        .plan("Nonexistent Hall", "The Yard")
        .unwrap_err();
    assert_eq!(err.reason(), PlanErrorReason::OriginNotFound);
}

#[test]
fn building_with_unresolvable_stop() {
    let index = scenario_index();
    let err = RoutePlanner::new(&index)
        .plan("Lonely Hall", "The Yard")
        .unwrap_err();
    assert_eq!(err.reason(), PlanErrorReason::OriginHasNoStops);
}

#[test]
fn disconnected_components() {
    let index = scenario_index();
    let err = RoutePlanner::new(&index)
        .plan("Hill Center", "Cook Campus Center")
        .unwrap_err();
    assert_eq!(err.reason(), PlanErrorReason::NoPathFound);
    assert_eq!(
        describe_plan(&Err(err.clone())),
        err.to_string()
    );
}

#[test]
fn repeated_plans_are_identical() {
    let index = scenario_index();
    let planner = RoutePlanner::new(&index);
    let first = planner.plan("hill centre", "livingston student centre");
    for _ in 0..10 {
        let again = planner.plan("hill centre", "livingston student centre");
        assert_eq!(again, first);
        assert_eq!(describe_plan(&again), describe_plan(&first));
    }
}

#[test]
fn edge_routes_are_symmetric() {
    let index = scenario_index();
    let graph = index.graph();
    for a in graph.stops() {
        for b in graph.stops() {
            assert_eq!(graph.edge_routes(a, b), graph.edge_routes(b, a));
        }
    }
}

#[test]
fn fallback_path_uses_fewest_hops() {
    // long way round on L, shortcut through S1 then S2
    let index = CampusIndex::build(
        std::iter::empty::<Building>(),
        vec![
            Route::new("L", ["Start", "L1", "L2", "L3", "Mid"]),
            Route::new("S1", ["Start", "Mid"]),
            Route::new("S2", ["Mid", "Goal"]),
        ],
        std::iter::empty::<(&str, &str)>(),
        MatchThresholds::default(),
    );
    let route = RoutePlanner::new(&index).plan("Start", "Goal").unwrap();

    assert_eq!(route.stop_path, vec!["Start", "Mid", "Goal"]);
    assert_eq!(
        leg_summary(&route),
        vec![(Some("S1"), "Start", "Mid"), (Some("S2"), "Mid", "Goal")]
    );
}

#[test]
fn direct_line_beats_shorter_transfer() {
    // the loop line serves both ends but a two-line transfer is shorter
    let index = CampusIndex::build(
        std::iter::empty::<Building>(),
        vec![
            Route::new("Loop", ["Origin", "P1", "P2", "P3", "P4", "Dest"]),
            Route::new("X", ["Origin", "Hub"]),
            Route::new("Y", ["Hub", "Dest"]),
        ],
        std::iter::empty::<(&str, &str)>(),
        MatchThresholds::default(),
    );
    let route = RoutePlanner::new(&index).plan("Origin", "Dest").unwrap();

    assert_eq!(route.legs.len(), 1);
    assert_eq!(route.legs[0].route_id.as_deref(), Some("Loop"));
    assert_eq!(route.stop_path.len(), 6);
}

#[test]
fn reverse_direction_uses_reversed_slice() {
    let index = scenario_index();
    let route = RoutePlanner::new(&index)
        .plan("The Yard", "Hill Center")
        .unwrap();
    assert_eq!(
        route.stop_path,
        vec!["The Yard", "College Ave Student Center", "Hill Center"]
    );
}

#[test]
fn legs_rebuild_the_stop_path() {
    let index = CampusIndex::build(
        std::iter::empty::<Building>(),
        vec![
            Route::new("1", ["a", "b", "c"]),
            Route::new("2", ["c", "d"]),
            Route::new("3", ["d", "e", "f"]),
        ],
        std::iter::empty::<(&str, &str)>(),
        MatchThresholds::default(),
    );
    let route = RoutePlanner::new(&index).plan("a", "f").unwrap();

    let mut rebuilt: Vec<String> = Vec::new();
    for leg in &route.legs {
        let skip = usize::from(!rebuilt.is_empty());
        rebuilt.extend(leg.stops.iter().skip(skip).cloned());
    }
    assert_eq!(rebuilt, route.stop_path);

    let edges: usize = route.legs.iter().map(|leg| leg.stops.len() - 1).sum();
    assert_eq!(edges, route.stop_path.len() - 1);
}

#[test]
fn same_stop_both_ends() {
    let index = scenario_index();
    let resolver = index.resolver();
    assert_eq!(resolver.resolve_stop("the yard"), resolver.resolve_stop("the yard"));

    let route = RoutePlanner::new(&index)
        .plan("The Yard", "The Yard")
        .unwrap();
    assert_eq!(route.stop_path, vec!["The Yard"]);
    assert!(route.legs.is_empty());
    assert_eq!(describe_plan(&Ok(route)).lines().count(), 3);
}

#[test]
fn empty_datasets_degrade_gracefully() {
    let index = CampusIndex::build(
        std::iter::empty::<Building>(),
        Vec::new(),
        std::iter::empty::<(&str, &str)>(),
        MatchThresholds::default(),
    );
    let err = RoutePlanner::new(&index)
        .plan("Hill Center", "The Yard")
        .unwrap_err();
    assert_eq!(err.reason(), PlanErrorReason::OriginNotFound);
}
