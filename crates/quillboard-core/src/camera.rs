//! Camera module for the pan transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view offset for the canvas.
///
/// It accumulates pan deltas from the wheel handler and converts raw
/// client coordinates into canvas coordinates. Zoom is intentionally
/// absent; canvas coordinates are pre-scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Accumulated horizontal pan in screen pixels.
    pub x: f64,
    /// Accumulated vertical pan in screen pixels.
    pub y: f64,
}

impl Camera {
    /// Create a camera at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pan the camera by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Convert a raw client point to canvas coordinates.
    ///
    /// Subtracts the viewport origin (where the canvas sits in the host
    /// window) and the accumulated pan, so the result is independent of
    /// scroll and pan state.
    pub fn screen_to_canvas(&self, client: Point, viewport_origin: Point) -> Point {
        Point::new(
            client.x - viewport_origin.x - self.x,
            client.y - viewport_origin.y - self.y,
        )
    }
}
