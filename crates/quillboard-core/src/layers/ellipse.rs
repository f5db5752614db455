//! Ellipse layer.

use super::{Color, LayerId, LayerTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ellipse inscribed in its bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: LayerId,
    /// Top-left corner of the bounding box.
    pub position: Point,
    /// Width of the bounding box.
    pub width: f64,
    /// Height of the bounding box.
    pub height: f64,
    /// Fill color.
    pub fill: Color,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(position: Point, width: f64, height: f64, fill: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            fill,
        }
    }

    /// Center of the ellipse.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }
}

impl LayerTrait for Ellipse {
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
