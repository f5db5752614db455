//! Freehand path layer.

use super::{Color, LayerId, LayerTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One pressure-weighted stroke sample.
///
/// Samples stored on a committed [`Path`] are in local coordinates,
/// relative to the layer's top-left corner. Samples in an in-progress
/// pencil draft are in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenPoint {
    pub x: f64,
    pub y: f64,
    /// Stylus pressure in `0.0..=1.0`; `0.5` for pointers without pressure.
    pub pressure: f64,
}

impl PenPoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }
}

/// A committed freehand stroke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    pub(crate) id: LayerId,
    /// Top-left corner of the stroke's bounding box.
    pub position: Point,
    /// Width of the bounding box at commit time.
    pub width: f64,
    /// Height of the bounding box at commit time.
    pub height: f64,
    /// Stroke color.
    pub fill: Color,
    /// Stroke samples in local coordinates.
    pub points: Vec<PenPoint>,
}

impl Path {
    /// Convert pencil-draft samples (canvas coordinates) into a path layer.
    ///
    /// The bounding box is computed over all samples and each sample is
    /// re-expressed relative to the box's top-left corner, so the layer's
    /// `{position, width, height}` is consistent with the other variants.
    /// Callers must pass at least 2 samples.
    pub fn from_pen_points(points: &[PenPoint], fill: Color) -> Self {
        debug_assert!(points.len() >= 2);

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        let local_points = points
            .iter()
            .map(|p| PenPoint::new(p.x - min_x, p.y - min_y, p.pressure))
            .collect();

        Self {
            id: Uuid::new_v4(),
            position: Point::new(min_x, min_y),
            width: max_x - min_x,
            height: max_y - min_y,
            fill,
            points: local_points,
        }
    }

    /// Number of stroke samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl LayerTrait for Path {
    fn id(&self) -> LayerId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    // Samples stay in local coordinates; only the box fields change.
    fn set_bounds(&mut self, bounds: Rect) {
        self.position = Point::new(bounds.x0, bounds.y0);
        self.width = bounds.width();
        self.height = bounds.height();
    }

    fn fill(&self) -> Color {
        self.fill
    }

    fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }
}
