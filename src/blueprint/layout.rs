//! Deterministic placement for blueprint nodes.
//!
//! Nodes zig-zag between two columns, one row per node, so consecutive steps
//! sit diagonally from each other and no two nodes overlap at the default
//! node size.

use crate::geometry::Point;

/// Canvas position of the first node.
pub const LAYOUT_ORIGIN: Point = Point::new(100.0, 80.0);
/// Horizontal distance between the two columns.
pub const COLUMN_OFFSET: f32 = 320.0;
/// Vertical distance between consecutive nodes.
pub const ROW_PITCH: f32 = 140.0;

/// Positions for `count` nodes in blueprint order.
pub fn layout(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let column = (i % 2) as f32;
            Point::new(
                LAYOUT_ORIGIN.x + column * COLUMN_OFFSET,
                LAYOUT_ORIGIN.y + i as f32 * ROW_PITCH,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{NodeMetrics, Rect};

    #[test]
    fn test_alternates_columns() {
        let points = layout(4);
        assert_eq!(points[0], LAYOUT_ORIGIN);
        assert_eq!(points[1], Point::new(420.0, 220.0));
        assert_eq!(points[2], Point::new(100.0, 360.0));
        assert_eq!(points[3], Point::new(420.0, 500.0));
    }

    #[test]
    fn test_no_overlap_at_default_size() {
        let metrics = NodeMetrics::default();
        let rects: Vec<_> = layout(12)
            .into_iter()
            .map(|p| Rect::from_min_size(p, metrics.width, metrics.height))
            .collect();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(layout(7), layout(7));
        assert!(layout(0).is_empty());
    }
}
