//! Sticky note layer.

use super::{Color, LayerId, LayerTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sticky note: a filled card with editable text on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub(crate) id: LayerId,
    /// Top-left corner of the note.
    pub position: Point,
    /// Width of the note.
    pub width: f64,
    /// Height of the note.
    pub height: f64,
    /// Card fill color.
    pub fill: Color,
    /// Note text content.
    #[serde(default)]
    pub content: String,
}

impl Note {
    /// Create a new empty note.
    pub fn new(position: Point, width: f64, height: f64, fill: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            fill,
            content: String::new(),
        }
    }
}

impl LayerTrait for Note {
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
