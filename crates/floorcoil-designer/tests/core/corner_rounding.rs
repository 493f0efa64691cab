use floorcoil_core::Vec2;
use floorcoil_designer::corner_rounding::{round_corners, CornerRounding};

#[test]
fn test_endpoints_preserved() {
    let pts = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(3.0, 0.0),
        Vec2::new(3.0, 3.0),
        Vec2::new(0.0, 3.0),
    ];
    let out = CornerRounding::default().apply(&pts);
    assert_eq!(out.first(), pts.first());
    assert_eq!(out.last(), pts.last());
    assert!(out.len() > pts.len());
}

#[test]
fn test_rounded_corners_stay_near_original() {
    let pts = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(3.0, 0.0),
        Vec2::new(3.0, 3.0),
        Vec2::new(6.0, 3.0),
    ];
    let out = round_corners(&pts, 0.2, 12.0);
    for p in &out {
        assert!(p.x >= -1e-9 && p.x <= 6.0 + 1e-9);
        assert!(p.y >= -1e-9 && p.y <= 3.0 + 1e-9);
    }
    // No corner vertex survives exactly.
    assert!(!out.contains(&Vec2::new(3.0, 0.0)));
    assert!(!out.contains(&Vec2::new(3.0, 3.0)));
}

#[test]
fn test_disabled_rounding_is_identity() {
    let pts = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)];
    assert_eq!(round_corners(&pts, 0.0, 12.0), pts);
    assert_eq!(round_corners(&pts[..2], 0.5, 12.0), pts[..2].to_vec());
}

#[test]
fn test_u_turn_kept() {
    let pts = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)];
    assert_eq!(round_corners(&pts, 0.5, 12.0), pts);
}
