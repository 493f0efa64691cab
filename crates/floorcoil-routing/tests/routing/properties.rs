use super::common::{crossings, min_gap, rectangle, within};
use floorcoil_designer::Region;
use floorcoil_routing::{CoilRouter, RouteStatus, RoutingParameters};
use proptest::prelude::*;

fn check_rectangle(x0: f64, y0: f64, w: f64, h: f64, spacing: f64, backward: bool) {
    let region = Region::new(rectangle(x0, y0, w, h), Vec::new()).unwrap();
    let params = RoutingParameters::new(spacing)
        .with_backward(backward)
        .with_start_location(0.0);
    let outcome = CoilRouter::new(params).unwrap().route(&region).unwrap();

    assert_eq!(outcome.status, RouteStatus::Completed);
    assert!(outcome.points.len() >= 2);
    assert!(outcome.iterations <= outcome.max_iterations);
    assert!(crossings(&outcome.points).is_empty());
    assert!(min_gap(&outcome.points) >= spacing / 2.0 - 1e-6);
    assert!(within(&outcome.points, x0, y0, x0 + w, y0 + h));
    assert!(outcome.path_length <= 2.0 * w * h / spacing + 2.0 * (w + h));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_forward_walk_fills_rectangles(
        x0 in -10.0f64..10.0,
        y0 in -10.0f64..10.0,
        w in 1.0f64..6.0,
        h in 1.0f64..6.0,
        spacing in 0.2f64..0.5,
    ) {
        check_rectangle(x0, y0, w, h, spacing, false);
    }

    #[test]
    fn prop_return_walk_stays_clear(
        x0 in -10.0f64..10.0,
        y0 in -10.0f64..10.0,
        w in 2.5f64..6.0,
        h in 2.5f64..6.0,
        spacing in 0.2f64..0.3,
    ) {
        check_rectangle(x0, y0, w, h, spacing, true);
    }
}
