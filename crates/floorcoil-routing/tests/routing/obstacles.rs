use super::common::{
    assert_clean, center_hole, crossings, inner_hole, l_shape, min_gap, offset_l_shape, rectangle,
};
use floorcoil_core::Vec2;
use floorcoil_designer::{Boundary, BoundaryPart, Region};
use floorcoil_routing::{CoilRouter, RouteStatus, RoutingParameters};

fn route(region: &Region, backward: bool) -> floorcoil_routing::RouteOutcome {
    CoilRouter::new(RoutingParameters::new(0.3).with_backward(backward))
        .unwrap()
        .route(region)
        .unwrap()
}

fn in_hole(p: &Vec2) -> bool {
    p.x > 1.5 && p.x < 2.5 && p.y > 1.5 && p.y < 2.5
}

#[test]
fn test_hole_forward_only() {
    let region = Region::new(rectangle(0.0, 0.0, 4.0, 4.0), vec![center_hole()]).unwrap();
    let outcome = route(&region, false);

    assert_eq!(outcome.status, RouteStatus::Completed);
    assert_eq!(outcome.points.len(), 20);
    assert!((outcome.path_length - 46.25).abs() < 1e-6, "{}", outcome.path_length);
    assert!(crossings(&outcome.points).is_empty());
    assert!(min_gap(&outcome.points) >= 0.15 - 1e-9);
    assert!(!outcome.points.iter().any(in_hole));
    assert!((outcome.filled_area - 15.0).abs() < 1e-9);
}

#[test]
fn test_hole_with_return_walk() {
    let region = Region::new(rectangle(0.0, 0.0, 4.0, 4.0), vec![inner_hole()]).unwrap();
    let forward = route(&region, false);
    let full = route(&region, true);

    assert_eq!(forward.points.len(), 22);
    assert!((forward.path_length - 49.85).abs() < 1e-6, "{}", forward.path_length);
    assert_eq!(full.status, RouteStatus::Completed);
    assert_eq!(full.points.len(), 38);
    assert!((full.path_length - 89.55).abs() < 1e-6, "{}", full.path_length);
    assert_eq!(full.points[..22], forward.points[..]);
    assert!((full.filled_area - 15.36).abs() < 1e-9);

    // The return walk keeps half a spacing between runs.
    assert_clean(&region, &full.points, 0.15);
    let hole = Region::new(inner_hole(), Vec::new()).unwrap();
    assert!(!full.points.iter().any(|p| hole.contains_point(*p)));
}

#[test]
fn test_hole_from_boundary_obstacles() {
    let boundary = Boundary::from_polygon(&rectangle(0.0, 0.0, 4.0, 4.0)).unwrap();
    let router = CoilRouter::new(RoutingParameters::new(0.3).with_backward(false)).unwrap();
    let outcome = router
        .route_boundary(&boundary, 0.0, &[center_hole()])
        .unwrap();
    assert_eq!(outcome.points.len(), 20);
    assert!(!outcome.points.iter().any(in_hole));
}

#[test]
fn test_l_shape_forward_only() {
    let region = Region::new(l_shape(), Vec::new()).unwrap();
    let outcome = route(&region, false);

    assert_eq!(outcome.status, RouteStatus::Completed);
    assert_eq!(outcome.points.len(), 29);
    assert!((outcome.path_length - 83.85).abs() < 1e-6, "{}", outcome.path_length);
    assert!(crossings(&outcome.points).is_empty());
    assert!(min_gap(&outcome.points) >= 0.15 - 1e-9);
    assert!(outcome.points.iter().all(|p| region.contains_point(*p)));
}

#[test]
fn test_l_shape_with_return_walk() {
    let region = Region::new(offset_l_shape(), Vec::new()).unwrap();
    let forward = route(&region, false);
    let full = route(&region, true);

    assert_eq!(forward.points.len(), 32);
    assert!((forward.path_length - 87.15).abs() < 1e-6, "{}", forward.path_length);
    assert_eq!(full.status, RouteStatus::Completed);
    assert_eq!(full.points.len(), 58);
    assert!((full.path_length - 162.35).abs() < 1e-6, "{}", full.path_length);
    assert_eq!(full.points[..32], forward.points[..]);
    assert_clean(&region, &full.points, 0.15);
}

#[test]
fn test_route_boundary_from_parts() {
    let parts = [
        BoundaryPart::straight(0.0, 4.0),
        BoundaryPart::straight(90.0, 4.0),
        BoundaryPart::straight(90.0, 4.0),
        BoundaryPart::straight(90.0, 4.0),
    ];
    let boundary = Boundary::from_parts(&parts, true).unwrap();
    let router = CoilRouter::new(RoutingParameters::new(0.3).with_backward(false)).unwrap();
    let outcome = router.route_boundary(&boundary, 0.0, &[]).unwrap();

    assert_eq!(outcome.status, RouteStatus::Completed);
    assert_eq!(outcome.points.len(), 27);
    assert!((outcome.path_length - 53.05).abs() < 1e-6);
}

#[test]
fn test_route_boundary_propagates_region_errors() {
    let boundary = Boundary::from_polygon(&rectangle(0.0, 0.0, 1.0, 1.0)).unwrap();
    let router = CoilRouter::new(RoutingParameters::new(0.3)).unwrap();
    let covering = rectangle(-1.0, -1.0, 3.0, 3.0);
    assert!(router.route_boundary(&boundary, 0.0, &[covering]).is_err());
}
