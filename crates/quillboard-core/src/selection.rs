//! Selection geometry: resize handles and the marquee intersection test.

use std::collections::HashMap;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::layers::{Layer, LayerId};

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge midpoint positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// One of the eight resize handles around a selected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    Corner(Corner),
    Edge(Edge),
}

impl ResizeHandle {
    /// Whether dragging this handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft)
                | ResizeHandle::Corner(Corner::BottomLeft)
                | ResizeHandle::Edge(Edge::Left)
        )
    }

    /// Whether dragging this handle moves the right edge.
    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopRight)
                | ResizeHandle::Corner(Corner::BottomRight)
                | ResizeHandle::Edge(Edge::Right)
        )
    }

    /// Whether dragging this handle moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft)
                | ResizeHandle::Corner(Corner::TopRight)
                | ResizeHandle::Edge(Edge::Top)
        )
    }

    /// Whether dragging this handle moves the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::BottomLeft)
                | ResizeHandle::Corner(Corner::BottomRight)
                | ResizeHandle::Edge(Edge::Bottom)
        )
    }
}

/// Recompute a bounding box after dragging `handle` to `point`.
///
/// The opposite edge(s) stay fixed. Dragging an edge past the opposite
/// edge swaps min and max, so the box mirror-flips instead of going
/// negative.
pub fn resize_bounds(initial: Rect, handle: ResizeHandle, point: Point) -> Rect {
    let (x0, x1) = if handle.moves_left() {
        (point.x.min(initial.x1), point.x.max(initial.x1))
    } else if handle.moves_right() {
        (point.x.min(initial.x0), point.x.max(initial.x0))
    } else {
        (initial.x0, initial.x1)
    };

    let (y0, y1) = if handle.moves_top() {
        (point.y.min(initial.y1), point.y.max(initial.y1))
    } else if handle.moves_bottom() {
        (point.y.min(initial.y0), point.y.max(initial.y0))
    } else {
        (initial.y0, initial.y1)
    };

    Rect::new(x0, y0, x1, y1)
}

/// Axis-aligned overlap test. Touching edges count as overlap.
fn rects_overlap(a: Rect, b: Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

/// Return, in the given id order, every layer whose bounding box overlaps
/// the rectangle spanned by `a` and `b`.
///
/// The two corners are normalized first, so any opposite pair works. A
/// zero-area rectangle intersects nothing.
pub fn find_intersecting_layers_with_rectangle(
    order: &[LayerId],
    layers: &HashMap<LayerId, Layer>,
    a: Point,
    b: Point,
) -> Vec<LayerId> {
    let net = Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
    if net.width() == 0.0 || net.height() == 0.0 {
        return Vec::new();
    }

    order
        .iter()
        .copied()
        .filter(|id| {
            layers
                .get(id)
                .is_some_and(|layer| rects_overlap(layer.bounds(), net))
        })
        .collect()
}
