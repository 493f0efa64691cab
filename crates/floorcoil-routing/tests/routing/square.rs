use super::common::{crossings, min_gap, square_region, within};
use floorcoil_core::Vec2;
use floorcoil_routing::{CoilRouter, Handedness, RouteStatus, RoutingParameters};

#[test]
fn test_square_forward_only() {
    let router = CoilRouter::new(RoutingParameters::new(0.3).with_backward(false)).unwrap();
    let outcome = router.route(&square_region()).unwrap();

    assert_eq!(outcome.status, RouteStatus::Completed);
    assert_eq!(outcome.points.len(), 27);
    assert!((outcome.path_length - 53.05).abs() < 1e-6, "{}", outcome.path_length);
    assert!(crossings(&outcome.points).is_empty());
    assert!(within(&outcome.points, 0.15, 0.15, 3.85, 3.85));
    assert!(outcome.iterations <= outcome.max_iterations);
}

#[test]
fn test_square_with_return_walk() {
    let router = CoilRouter::new(RoutingParameters::new(0.3)).unwrap();
    let outcome = router.route(&square_region()).unwrap();

    assert_eq!(outcome.status, RouteStatus::Completed);
    assert_eq!(outcome.points.len(), 48);
    assert!((outcome.path_length - 97.45).abs() < 1e-6, "{}", outcome.path_length);
    assert!(outcome.points[0].distance(Vec2::new(0.15, 0.15)) < 1e-9);
    assert!(outcome.points[1].distance(Vec2::new(3.85, 0.15)) < 1e-9);

    // The return walk runs between the inward laps.
    assert!(crossings(&outcome.points).is_empty());
    assert!(min_gap(&outcome.points) >= 0.15 - 1e-9);
    assert!(within(&outcome.points, 0.15, 0.15, 3.85, 3.85));

    // Bounded by twice the serpentine fill plus one lap.
    assert!(outcome.path_length <= 2.0 * 16.0 / 0.3 + 16.0);
    assert!((outcome.filled_area - 16.0).abs() < 1e-9);
}

#[test]
fn test_return_walk_extends_forward_path() {
    let forward = CoilRouter::new(RoutingParameters::new(0.3).with_backward(false))
        .unwrap()
        .route(&square_region())
        .unwrap();
    let full = CoilRouter::new(RoutingParameters::new(0.3))
        .unwrap()
        .route(&square_region())
        .unwrap();

    assert!(full.path_length > forward.path_length);
    assert_eq!(&full.points[..forward.points.len()], &forward.points[..]);
}

#[test]
fn test_counter_clockwise_mirrors_clockwise() {
    let cw = CoilRouter::new(RoutingParameters::new(0.3))
        .unwrap()
        .route(&square_region())
        .unwrap();
    let params = RoutingParameters::new(0.3)
        .with_handedness(Handedness::CounterClockwise)
        .with_start_location(3.9);
    let ccw = CoilRouter::new(params)
        .unwrap()
        .route(&square_region())
        .unwrap();

    assert_eq!(ccw.status, RouteStatus::Completed);
    assert_eq!(ccw.points.len(), cw.points.len());
    assert!((ccw.path_length - cw.path_length).abs() < 1e-6);
    for (a, b) in cw.points.iter().zip(ccw.points.iter()) {
        assert!(Vec2::new(4.0 - a.x, a.y).distance(*b) < 1e-9);
    }
}

#[test]
fn test_corner_rounding_applied() {
    let params = RoutingParameters::new(0.3).with_corner_rounding(Default::default());
    let outcome = CoilRouter::new(params)
        .unwrap()
        .route(&square_region())
        .unwrap();

    assert_eq!(outcome.raw_points.len(), 48);
    assert!(outcome.points.len() > outcome.raw_points.len());
    assert_eq!(outcome.points.first(), outcome.raw_points.first());
    assert_eq!(outcome.points.last(), outcome.raw_points.last());
    // Fillets cut corners.
    let raw: f64 = outcome
        .raw_points
        .windows(2)
        .map(|w| w[0].distance(w[1]))
        .sum();
    assert!(outcome.path_length < raw);
}

#[test]
fn test_points_3d() {
    let outcome = CoilRouter::new(RoutingParameters::new(0.3).with_backward(false))
        .unwrap()
        .route(&square_region())
        .unwrap();
    let lifted = outcome.points_3d();
    assert_eq!(lifted.len(), outcome.points.len());
    assert!(lifted.iter().all(|p| p[2] == 0.0));
    assert_eq!(lifted[0][0], outcome.points[0].x);
}
