//! Geometry engine for the flow canvas.
//!
//! Pure, stateless functions working in canvas (untransformed) space:
//! - handle anchor points on a node's border
//! - cubic bezier connection paths between two anchors
//! - hit-testing of handles, delete controls and node bodies
//!
//! The renderer projects the results to screen space through the viewport;
//! the interaction controller converts pointer positions to canvas space
//! before calling the hit-tests.

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::graph::{HandleSide, Node};

/// Upper bound for the control-point offset of a connection curve.
pub const MAX_CONTROL_OFFSET: f32 = 100.0;

/// Default node width in canvas units.
pub const DEFAULT_NODE_WIDTH: f32 = 220.0;
/// Default node height in canvas units.
pub const DEFAULT_NODE_HEIGHT: f32 = 80.0;

/// A position in canvas or screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `|dx| + |dy|`
    pub fn manhattan(self, other: Point) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn distance(self, other: Point) -> f32 {
        (self - other).length()
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    fn sub(self, rhs: Vec2) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned rectangle, `min` inclusive, `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_size(min: Point, width: f32, height: f32) -> Self {
        Self {
            min,
            max: Point::new(min.x + width, min.y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Fixed visual dimensions shared by every node on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMetrics {
    pub width: f32,
    pub height: f32,
    /// Radius of the drawn handle circles.
    pub handle_radius: f32,
    /// Radius of the delete control at the top-right corner.
    pub delete_radius: f32,
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
            handle_radius: 6.0,
            delete_radius: 8.0,
        }
    }
}

impl NodeMetrics {
    pub fn node_rect(&self, node: &Node) -> Rect {
        Rect::from_min_size(node.position, self.width, self.height)
    }

    pub fn delete_control_center(&self, node: &Node) -> Point {
        Point::new(node.position.x + self.width, node.position.y)
    }
}

/// Unit vector pointing away from the node through `side`.
pub fn outward(side: HandleSide) -> Vec2 {
    match side {
        HandleSide::Top => Vec2::new(0.0, -1.0),
        HandleSide::Right => Vec2::new(1.0, 0.0),
        HandleSide::Bottom => Vec2::new(0.0, 1.0),
        HandleSide::Left => Vec2::new(-1.0, 0.0),
    }
}

/// Midpoint of the requested side of `node`.
pub fn handle_anchor(node: &Node, side: HandleSide, metrics: &NodeMetrics) -> Point {
    let Point { x, y } = node.position;
    let (w, h) = (metrics.width, metrics.height);
    match side {
        HandleSide::Top => Point::new(x + w / 2.0, y),
        HandleSide::Right => Point::new(x + w, y + h / 2.0),
        HandleSide::Bottom => Point::new(x + w / 2.0, y + h),
        HandleSide::Left => Point::new(x, y + h / 2.0),
    }
}

/// Cubic bezier curve described by its endpoints and two control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezier {
    pub fn points(&self) -> [Point; 4] {
        [self.from, self.ctrl1, self.ctrl2, self.to]
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let tt = t * t;
        let uu = u * u;
        let uuu = uu * u;
        let ttt = tt * t;
        let [p0, p1, p2, p3] = self.points();
        Point::new(
            uuu * p0.x + 3.0 * uu * t * p1.x + 3.0 * u * tt * p2.x + ttt * p3.x,
            uuu * p0.y + 3.0 * uu * t * p1.y + 3.0 * u * tt * p2.y + ttt * p3.y,
        )
    }

    /// Polyline approximation with `segments + 1` points, endpoints included.
    pub fn sample(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }

    /// Mapping every defining point, e.g. to project the curve to screen space.
    /// Affine maps commute with bezier evaluation, so the result is the same
    /// curve under the transform.
    pub fn map(&self, f: impl Fn(Point) -> Point) -> CubicBezier {
        CubicBezier {
            from: f(self.from),
            ctrl1: f(self.ctrl1),
            ctrl2: f(self.ctrl2),
            to: f(self.to),
        }
    }
}

/// Control-point offset used by [`connection_path`].
///
/// Half the manhattan distance, capped at [`MAX_CONTROL_OFFSET`]. Coincident
/// endpoints yield 0.
pub fn control_offset(p1: Point, p2: Point) -> f32 {
    let distance = p1.manhattan(p2);
    if !distance.is_finite() || distance <= 0.0 {
        return 0.0;
    }
    (distance * 0.5).min(MAX_CONTROL_OFFSET)
}

/// Flow-chart style curve leaving `p1` perpendicular to `side1` and entering
/// `p2` perpendicular to `side2`.
pub fn connection_path(p1: Point, side1: HandleSide, p2: Point, side2: HandleSide) -> CubicBezier {
    let offset = control_offset(p1, p2);
    CubicBezier {
        from: p1,
        ctrl1: p1 + outward(side1) * offset,
        ctrl2: p2 + outward(side2) * offset,
        to: p2,
    }
}

/// Curve for an existing edge between two nodes.
pub fn edge_path(
    source: &Node,
    source_handle: HandleSide,
    target: &Node,
    target_handle: HandleSide,
    metrics: &NodeMetrics,
) -> CubicBezier {
    connection_path(
        handle_anchor(source, source_handle, metrics),
        source_handle,
        handle_anchor(target, target_handle, metrics),
        target_handle,
    )
}

/// Side whose anchor lies within `tolerance` of `point`, nearest first.
pub fn hit_test_handle(
    node: &Node,
    point: Point,
    tolerance: f32,
    metrics: &NodeMetrics,
) -> Option<HandleSide> {
    HandleSide::ALL
        .iter()
        .map(|&side| (side, handle_anchor(node, side, metrics).distance(point)))
        .filter(|&(_, d)| d <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(side, _)| side)
}

/// Whether `point` lies inside the node rectangle (border inclusive).
pub fn hit_test_node_body(node: &Node, point: Point, metrics: &NodeMetrics) -> bool {
    metrics.node_rect(node).contains(point)
}

/// Whether `point` lies on the node's delete control.
pub fn hit_test_delete_control(node: &Node, point: Point, metrics: &NodeMetrics) -> bool {
    metrics.delete_control_center(node).distance(point) <= metrics.delete_radius
}
