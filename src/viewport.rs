//! Pan/zoom state and the screen <-> canvas transform.
//!
//! Going screen -> canvas the container origin and pan are subtracted first
//! and the result is divided by zoom; canvas -> screen scales first and then
//! translates. Every crossing of the boundary uses this ordering.

use crate::geometry::{Point, Vec2};

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.4;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f32 = 2.0;

/// Editing-session view state. Not part of the durable graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f32,
    /// Screen-space translation.
    pan: Vec2,
    /// Screen position of the canvas container's top-left corner.
    container_origin: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            container_origin: Point::ZERO,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Zoom as a whole percentage, for the toolbar label.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// `zoom = clamp(zoom + delta, MIN_ZOOM, MAX_ZOOM)`
    pub fn zoom_by(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
    }

    /// Absolute pan assignment.
    pub fn pan_to(&mut self, dx: f32, dy: f32) {
        self.pan = Vec2::new(dx, dy);
    }

    /// Track where the canvas container currently sits on screen.
    pub fn set_container_origin(&mut self, origin: Point) {
        self.container_origin = origin;
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        let local = screen - self.container_origin - self.pan;
        Point::new(local.x / self.zoom, local.y / self.zoom)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(canvas.x * self.zoom, canvas.y * self.zoom) + self.pan + self.container_origin.to_vec2()
    }

    /// Scale a canvas-space length to screen pixels.
    pub fn scale_len(&self, len: f32) -> f32 {
        len * self.zoom
    }
}
