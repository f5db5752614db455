//! Layer definitions for the whiteboard document.

mod ellipse;
mod note;
mod path;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use note::Note;
pub use path::{Path, PenPoint};
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for layers.
pub type LayerId = Uuid;

/// Default edge length for newly inserted shape layers.
pub const DEFAULT_LAYER_SIZE: f64 = 100.0;

/// Fill color (RGB8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255)
    }
}

/// The insertable layer kinds. Paths are created only by committing a
/// pencil draft, never from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Rectangle,
    Ellipse,
    Text,
    Note,
}

/// Common trait for all layer variants.
///
/// Every layer exposes the same positional capability: an axis-aligned
/// bounding box it can be moved and resized through.
pub trait LayerTrait {
    /// Get the unique identifier.
    fn id(&self) -> LayerId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Move the layer by a delta.
    fn translate(&mut self, delta: Vec2);

    /// Write a new bounding box onto the layer.
    fn set_bounds(&mut self, bounds: Rect);

    /// Get the fill color.
    fn fill(&self) -> Color;

    /// Set the fill color.
    fn set_fill(&mut self, fill: Color);
}

/// Enum wrapper for all layer types (for storage and serialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Layer {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Text(Text),
    Note(Note),
    Path(Path),
}

impl Layer {
    /// Create a new shape layer of the given kind at `position`, with the
    /// default size and the given fill.
    pub fn new(kind: LayerKind, position: Point, fill: Color) -> Self {
        let size = DEFAULT_LAYER_SIZE;
        match kind {
            LayerKind::Rectangle => Layer::Rectangle(Rectangle::new(position, size, size, fill)),
            LayerKind::Ellipse => Layer::Ellipse(Ellipse::new(position, size, size, fill)),
            LayerKind::Text => Layer::Text(Text::new(position, size, size, fill)),
            LayerKind::Note => Layer::Note(Note::new(position, size, size, fill)),
        }
    }

    pub fn id(&self) -> LayerId {
        match self {
            Layer::Rectangle(l) => l.id(),
            Layer::Ellipse(l) => l.id(),
            Layer::Text(l) => l.id(),
            Layer::Note(l) => l.id(),
            Layer::Path(l) => l.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Layer::Rectangle(l) => l.bounds(),
            Layer::Ellipse(l) => l.bounds(),
            Layer::Text(l) => l.bounds(),
            Layer::Note(l) => l.bounds(),
            Layer::Path(l) => l.bounds(),
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Layer::Rectangle(l) => l.translate(delta),
            Layer::Ellipse(l) => l.translate(delta),
            Layer::Text(l) => l.translate(delta),
            Layer::Note(l) => l.translate(delta),
            Layer::Path(l) => l.translate(delta),
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        match self {
            Layer::Rectangle(l) => l.set_bounds(bounds),
            Layer::Ellipse(l) => l.set_bounds(bounds),
            Layer::Text(l) => l.set_bounds(bounds),
            Layer::Note(l) => l.set_bounds(bounds),
            Layer::Path(l) => l.set_bounds(bounds),
        }
    }

    pub fn fill(&self) -> Color {
        match self {
            Layer::Rectangle(l) => l.fill(),
            Layer::Ellipse(l) => l.fill(),
            Layer::Text(l) => l.fill(),
            Layer::Note(l) => l.fill(),
            Layer::Path(l) => l.fill(),
        }
    }

    pub fn set_fill(&mut self, fill: Color) {
        match self {
            Layer::Rectangle(l) => l.set_fill(fill),
            Layer::Ellipse(l) => l.set_fill(fill),
            Layer::Text(l) => l.set_fill(fill),
            Layer::Note(l) => l.set_fill(fill),
            Layer::Path(l) => l.set_fill(fill),
        }
    }
}
