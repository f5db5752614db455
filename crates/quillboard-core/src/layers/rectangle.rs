//! Rectangle layer.

use super::{Color, LayerId, LayerTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned filled rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: LayerId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Fill color.
    pub fill: Color,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64, fill: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            fill,
        }
    }
}

impl LayerTrait for Rectangle {
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
