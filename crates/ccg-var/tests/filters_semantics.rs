mod common;

use ccg_core::{EntityKind, Orientation, Scene};
use ccg_var::filters::first_rejection;
use ccg_var::geometry::{footprint, intersection_area, polygon_area};
use ccg_var::{
    exactly_one_ego, left_hand_opposing_traffic, no_overlap, restricted_pedestrian_crossing,
    BuiltinFilter, NamedFilter, PlausibilityFilter,
};
use common::{entity, scene};

fn ego_at(lateral: f64, width: f64) -> ccg_core::EntityInstance {
    entity(EntityKind::Ego, "ego", Orientation::North, width, 4.5, lateral, 0.0)
}

fn vehicle_at(lateral: f64, width: f64, orientation: Orientation) -> ccg_core::EntityInstance {
    entity(EntityKind::Vehicle, "car", orientation, width, 4.5, lateral, 10.0)
}

fn pedestrian_at(lateral: f64, orientation: Orientation) -> ccg_core::EntityInstance {
    entity(EntityKind::Pedestrian, "ped", orientation, 0.5, 0.3, lateral, 20.0)
}

#[test]
fn exactly_one_ego_fails_closed() {
    assert!(!exactly_one_ego(&scene(vec![vehicle_at(0.0, 1.8, Orientation::North)])));
    assert!(exactly_one_ego(&scene(vec![ego_at(0.0, 1.8)])));
    assert!(!exactly_one_ego(&scene(vec![ego_at(0.0, 1.8), ego_at(5.0, 1.8)])));
    assert!(!exactly_one_ego(&Scene::default()));
}

#[test]
fn separated_rectangles_do_not_overlap() {
    let a = entity(EntityKind::Vehicle, "a", Orientation::North, 2.0, 4.0, 0.0, 0.0);
    let b = entity(EntityKind::Vehicle, "b", Orientation::North, 2.0, 4.0, 5.0, 10.0);
    assert!(no_overlap(&scene(vec![a, b])));
}

#[test]
fn identical_rectangles_overlap() {
    let a = entity(EntityKind::Vehicle, "a", Orientation::East, 2.0, 4.0, 1.0, 1.0);
    let b = entity(EntityKind::Vehicle, "b", Orientation::East, 2.0, 4.0, 1.0, 1.0);
    assert!(!no_overlap(&scene(vec![a, b])));
}

#[test]
fn touching_edges_are_accepted() {
    let a = entity(EntityKind::Vehicle, "a", Orientation::North, 2.0, 4.0, 0.0, 0.0);
    let b = entity(EntityKind::Vehicle, "b", Orientation::North, 2.0, 4.0, 2.0, 0.0);
    let c = entity(EntityKind::Vehicle, "c", Orientation::South, 2.0, 4.0, 2.0, 4.0);
    assert!(no_overlap(&scene(vec![a, b, c])));
}

#[test]
fn rotation_changes_the_footprint() {
    // a long car facing east now reaches into the neighbour lane
    let a = entity(EntityKind::Vehicle, "a", Orientation::East, 1.8, 4.5, 0.0, 0.0);
    let b = entity(EntityKind::Vehicle, "b", Orientation::North, 1.8, 4.5, 2.5, 0.0);
    assert!(!no_overlap(&scene(vec![a.clone(), b.clone()])));
    let mut a_north = a;
    a_north.values.orientation = Orientation::North;
    assert!(no_overlap(&scene(vec![a_north, b])));
}

#[test]
fn rotated_footprint_keeps_its_area() {
    let car = entity(EntityKind::Vehicle, "a", Orientation::NorthEast, 1.8, 4.5, 3.0, -1.0);
    let corners = footprint(&car.values);
    assert!((polygon_area(&corners) - 1.8 * 4.5).abs() < 1e-9);
    assert!((intersection_area(&corners, &corners) - 1.8 * 4.5).abs() < 1e-9);
}

#[test]
fn diagonal_cars_in_a_column_do_not_overlap() {
    let cars: Vec<_> = [-2.5, 1.5, 5.5]
        .iter()
        .enumerate()
        .map(|(idx, long)| {
            entity(
                EntityKind::Vehicle,
                &format!("car_{idx}"),
                Orientation::NorthEast,
                1.8,
                4.5,
                5.0,
                *long,
            )
        })
        .collect();
    assert!(no_overlap(&scene(cars)));
}

#[test]
fn left_hand_opposing_traffic_uses_ego_left_edge() {
    let ego = ego_at(5.0, 2.0);
    let left = vehicle_at(3.0, 1.0, Orientation::South);
    assert!(left_hand_opposing_traffic(&scene(vec![ego.clone(), left])));

    let overlapping = vehicle_at(4.5, 1.0, Orientation::South);
    assert!(!left_hand_opposing_traffic(&scene(vec![ego.clone(), overlapping])));

    let same_direction = vehicle_at(4.5, 1.0, Orientation::North);
    assert!(left_hand_opposing_traffic(&scene(vec![ego, same_direction])));
}

#[test]
fn left_hand_opposing_traffic_without_ego_rejects() {
    assert!(!left_hand_opposing_traffic(&scene(vec![vehicle_at(0.0, 1.0, Orientation::North)])));
}

#[test]
fn pedestrians_in_the_lane_band_must_not_walk_along_it() {
    let ego = ego_at(0.0, 1.8);
    let car = vehicle_at(3.5, 1.8, Orientation::North);
    let crossing = pedestrian_at(2.0, Orientation::East);
    let walking = pedestrian_at(2.0, Orientation::South);
    let beside = pedestrian_at(4.0, Orientation::North);

    assert!(restricted_pedestrian_crossing(&scene(vec![ego.clone(), car.clone(), crossing])));
    assert!(!restricted_pedestrian_crossing(&scene(vec![ego.clone(), car.clone(), walking])));
    assert!(restricted_pedestrian_crossing(&scene(vec![ego, car, beside])));
}

#[test]
fn pedestrians_without_vehicles_always_pass() {
    assert!(restricted_pedestrian_crossing(&scene(vec![pedestrian_at(0.0, Orientation::North)])));
}

#[test]
fn chain_reports_first_rejecting_filter() {
    let filters: Vec<Box<dyn PlausibilityFilter>> = vec![
        Box::new(BuiltinFilter::ExactlyOneEgo),
        Box::new(BuiltinFilter::NoOverlap),
        Box::new(NamedFilter::new("never", |_: &Scene| false)),
    ];
    let empty = Scene::default();
    assert_eq!(first_rejection(&filters, &empty), Some("exactly-one-ego"));

    let lone_ego = scene(vec![ego_at(0.0, 1.8)]);
    assert_eq!(first_rejection(&filters, &lone_ego), Some("never"));
    assert_eq!(first_rejection(&filters[..2], &lone_ego), None);

    let closure: Box<dyn PlausibilityFilter> = Box::new(|s: &Scene| s.len() < 5);
    assert_eq!(closure.name(), "custom");
    assert!(closure.accepts(&lone_ego));
}

#[test]
fn builtin_filters_parse_from_kebab_case() {
    let parsed: Vec<BuiltinFilter> = serde_json::from_str(
        r#"["exactly-one-ego", "no-overlap", "left-hand-opposing-traffic", "restricted-pedestrian-crossing"]"#,
    )
    .unwrap();
    for filter in &parsed {
        assert_eq!(PlausibilityFilter::name(filter), filter.label());
    }
    assert_eq!(parsed.len(), 4);
}
