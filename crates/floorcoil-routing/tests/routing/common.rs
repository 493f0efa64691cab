use floorcoil_core::{Segment, Vec2};
use floorcoil_designer::Region;

pub fn rectangle(x0: f64, y0: f64, w: f64, h: f64) -> Vec<Vec2> {
    vec![
        Vec2::new(x0, y0),
        Vec2::new(x0 + w, y0),
        Vec2::new(x0 + w, y0 + h),
        Vec2::new(x0, y0 + h),
    ]
}

pub fn square_region() -> Region {
    Region::new(rectangle(0.0, 0.0, 4.0, 4.0), Vec::new()).unwrap()
}

/// The obstacle ring used by the hole scenarios, given clockwise.
pub fn center_hole() -> Vec<Vec2> {
    vec![
        Vec2::new(1.5, 1.5),
        Vec2::new(1.5, 2.5),
        Vec2::new(2.5, 2.5),
        Vec2::new(2.5, 1.5),
    ]
}

/// A smaller hole whose edges sit off the lane clearance lines.
pub fn inner_hole() -> Vec<Vec2> {
    vec![
        Vec2::new(1.6, 1.6),
        Vec2::new(1.6, 2.4),
        Vec2::new(2.4, 2.4),
        Vec2::new(2.4, 1.6),
    ]
}

pub fn l_shape() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(6.0, 0.0),
        Vec2::new(6.0, 3.0),
        Vec2::new(3.0, 3.0),
        Vec2::new(3.0, 6.0),
        Vec2::new(0.0, 6.0),
    ]
}

/// L-shaped room with the notch corner at (3.2, 2.8).
pub fn offset_l_shape() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(6.0, 0.0),
        Vec2::new(6.0, 2.8),
        Vec2::new(3.2, 2.8),
        Vec2::new(3.2, 6.0),
        Vec2::new(0.0, 6.0),
    ]
}

pub fn triangle() -> Vec<Vec2> {
    vec![Vec2::new(0.0, 0.0), Vec2::new(6.0, 0.0), Vec2::new(0.0, 5.0)]
}

pub fn trapezoid() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(6.0, 0.0),
        Vec2::new(4.5, 4.0),
        Vec2::new(1.5, 4.0),
    ]
}

/// Rotates `points` by `angle` radians about the origin, then shifts them.
pub fn rotated(points: &[Vec2], angle: f64, shift: Vec2) -> Vec<Vec2> {
    let (sin, cos) = angle.sin_cos();
    points
        .iter()
        .map(|p| Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos) + shift)
        .collect()
}

fn segments(points: &[Vec2]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| Segment::from_points(w[0], w[1]))
        .collect()
}

/// Pairs of non-adjacent path segments that properly cross.
pub fn crossings(points: &[Vec2]) -> Vec<(usize, usize)> {
    let segs = segments(points);
    let mut bad = Vec::new();
    for i in 0..segs.len() {
        for j in (i + 2)..segs.len() {
            if let Some(hit) = segs[i].intersect(&segs[j]) {
                let inner = |x: f64| x > 1e-9 && x < 1.0 - 1e-9;
                if inner(hit.u) && inner(hit.v) {
                    bad.push((i, j));
                }
            }
        }
    }
    bad
}

fn point_segment_distance(p: Vec2, s: &Segment) -> f64 {
    if s.is_degenerate() {
        return p.distance(s.start());
    }
    let t = s.param_of(p).clamp(0.0, 1.0);
    s.point_at(t).distance(p)
}

fn segment_distance(a: &Segment, b: &Segment) -> f64 {
    if let Some(hit) = a.intersect(b) {
        if (0.0..=1.0).contains(&hit.u) && (0.0..=1.0).contains(&hit.v) {
            return 0.0;
        }
    }
    point_segment_distance(a.start(), b)
        .min(point_segment_distance(a.end(), b))
        .min(point_segment_distance(b.start(), a))
        .min(point_segment_distance(b.end(), a))
}

/// Smallest distance between any two non-adjacent path segments.
pub fn min_gap(points: &[Vec2]) -> f64 {
    let segs = segments(points);
    let mut gap = f64::INFINITY;
    for i in 0..segs.len() {
        for j in (i + 2)..segs.len() {
            gap = gap.min(segment_distance(&segs[i], &segs[j]));
        }
    }
    gap
}

pub fn within(points: &[Vec2], x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
    points
        .iter()
        .all(|p| p.x >= x0 - 1e-9 && p.x <= x1 + 1e-9 && p.y >= y0 - 1e-9 && p.y <= y1 + 1e-9)
}

/// Asserts the path stays inside the room, never crosses itself and keeps
/// `gap` between non-adjacent runs.
pub fn assert_clean(region: &Region, points: &[Vec2], gap: f64) {
    let outside: Vec<_> = points.iter().filter(|p| !region.contains_point(**p)).collect();
    assert!(outside.is_empty(), "outside the room: {:?}", outside);
    let crossed = crossings(points);
    assert!(crossed.is_empty(), "crossing runs: {:?}", crossed);
    let found = min_gap(points);
    assert!(found >= gap - 1e-9, "gap {} < {}", found, gap);
}
