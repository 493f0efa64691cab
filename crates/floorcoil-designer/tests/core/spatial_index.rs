use floorcoil_core::{Envelope, IndexError, Segment, Vec2};
use floorcoil_designer::spatial_index::{SegmentKind, SpatialIndex};

fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
    Segment::from_points(Vec2::new(x0, y0), Vec2::new(x1, y1))
}

#[test]
fn test_spatial_index_creation() {
    let index = SpatialIndex::new(Envelope::new(-100.0, -100.0, 100.0, 100.0), 8, 16);
    let stats = index.stats();
    assert_eq!(stats.total_items, 0);
    assert_eq!(stats.total_nodes, 1);
    assert!(index.is_empty());
}

#[test]
fn test_spatial_index_insert_and_query() {
    let mut index = SpatialIndex::new(Envelope::new(-100.0, -100.0, 100.0, 100.0), 8, 16);
    index.insert(0, seg(0.0, 0.0, 10.0, 10.0), SegmentKind::Boundary).unwrap();
    index.insert(1, seg(5.0, 5.0, 15.0, 15.0), SegmentKind::Boundary).unwrap();

    let results = index.query(&Envelope::new(7.0, 7.0, 12.0, 12.0), 0.0);
    assert_eq!(results, vec![0, 1]);

    let results = index.query(&Envelope::new(12.0, 12.0, 13.0, 13.0), 0.0);
    assert_eq!(results, vec![1]);
}

#[test]
fn test_spatial_index_query_tolerance() {
    let mut index = SpatialIndex::default();
    index.push(seg(0.0, 0.0, 1.0, 0.0), SegmentKind::Boundary).unwrap();

    assert!(index.query_point(Vec2::new(0.5, 0.01), 0.0).is_empty());
    assert_eq!(index.query_point(Vec2::new(0.5, 0.01), 0.02), vec![0]);
}

#[test]
fn test_spatial_index_rejects_non_monotonic() {
    let mut index = SpatialIndex::default();
    index.push(seg(0.0, 0.0, 1.0, 0.0), SegmentKind::Boundary).unwrap();

    let err = index
        .insert(3, seg(0.0, 0.0, 0.0, 1.0), SegmentKind::Boundary)
        .unwrap_err();
    assert_eq!(err, IndexError::NonMonotonic { index: 3, expected: 1 });

    let err = index
        .insert(0, seg(0.0, 0.0, 0.0, 1.0), SegmentKind::Boundary)
        .unwrap_err();
    assert_eq!(err, IndexError::NonMonotonic { index: 0, expected: 1 });
    assert_eq!(index.len(), 1);
}

#[test]
fn test_spatial_index_boundary_before_path() {
    let mut index = SpatialIndex::default();
    index.push(seg(0.0, 0.0, 1.0, 0.0), SegmentKind::Boundary).unwrap();
    let path = index.push_path(seg(0.0, 0.5, 1.0, 0.5));
    assert_eq!(path, 1);

    let err = index
        .push(seg(0.0, 1.0, 1.0, 1.0), SegmentKind::Boundary)
        .unwrap_err();
    assert_eq!(err, IndexError::BoundaryAfterPath(2));

    assert!(index.is_boundary(0));
    assert!(!index.is_boundary(1));
    assert_eq!(index.kind(1), Some(SegmentKind::DrawnPath));
    assert_eq!(index.boundary_count(), 1);
    assert_eq!(index.last_index(), Some(1));
}

#[test]
fn test_spatial_index_clear() {
    let mut index = SpatialIndex::new(Envelope::new(-100.0, -100.0, 100.0, 100.0), 8, 16);
    index.push(seg(0.0, 0.0, 10.0, 10.0), SegmentKind::Boundary).unwrap();
    assert!(!index.query_point(Vec2::new(5.0, 5.0), 0.0).is_empty());

    index.clear();
    assert!(index.query_point(Vec2::new(5.0, 5.0), 0.0).is_empty());
    assert_eq!(index.boundary_count(), 0);
}

#[test]
fn test_spatial_index_stats() {
    let mut index = SpatialIndex::new(Envelope::new(-100.0, -100.0, 100.0, 100.0), 8, 16);
    for i in 0..20 {
        let x = (i as f64) * 5.0 - 50.0;
        index.push(seg(x, x, x + 1.0, x + 1.0), SegmentKind::Boundary).unwrap();
    }
    for i in 0..5 {
        let y = i as f64;
        index.push_path(seg(-90.0, y, -89.0, y));
    }

    let stats = index.stats();
    assert!(stats.total_nodes > 1);
    assert_eq!(stats.total_items, 25);
    assert_eq!(stats.boundary_items, 20);
    assert_eq!(stats.path_items, 5);
}

#[test]
fn test_spatial_index_matches_linear_scan() {
    let mut index = SpatialIndex::new(Envelope::new(0.0, 0.0, 500.0, 200.0), 8, 4);
    let mut segments = Vec::new();
    for i in 0..1000 {
        let x = ((i as f64) % 50.0) * 10.0;
        let y = ((i / 50) as f64) * 10.0;
        let s = seg(x, y, x + 5.0, y + 3.0);
        segments.push(s);
        index.push_path(s);
    }

    let query = Envelope::new(42.0, 17.0, 118.0, 64.0);
    let expected: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.envelope().intersects(&query.expanded(0.5)))
        .map(|(i, _)| i)
        .collect();
    assert!(!expected.is_empty());
    assert_eq!(index.query(&query, 0.5), expected);
}

#[test]
fn test_spatial_index_large_coordinates() {
    let mut index = SpatialIndex::default();
    index.push_path(seg(1000.0, 1000.0, 1010.0, 1010.0));
    assert!(index.query_point(Vec2::new(1005.0, 1005.0), 0.0).contains(&0));

    index.push_path(seg(5.0e7, -5.0e7, 5.0e7 + 10.0, -5.0e7 + 10.0));
    assert!(index
        .query_point(Vec2::new(5.0e7 + 5.0, -5.0e7 + 5.0), 0.0)
        .contains(&1));
}

#[test]
fn test_spatial_index_lookup() {
    let mut index = SpatialIndex::default();
    let s = seg(1.0, 2.0, 3.0, 4.0);
    index.push(s, SegmentKind::Boundary).unwrap();
    assert_eq!(index[0], s);
    assert_eq!(index.get(0), Some(&s));
    assert!(index.get(1).is_none());
}
