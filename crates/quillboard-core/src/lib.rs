//! Quillboard Core Library
//!
//! Platform-agnostic interaction core for the Quillboard collaborative
//! whiteboard: the pointer gesture state machine, the geometry behind it,
//! typed mutation operations against the shared layer document, and the
//! ephemeral presence each participant broadcasts to the others. Rendering,
//! transport, and durable storage live in the host shells built on top.

pub mod camera;
pub mod canvas;
pub mod document;
pub mod history;
pub mod layers;
pub mod presence;
pub mod room;
pub mod selection;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasState, InsertError, Tool};
pub use document::{BoardDocument, MAX_LAYERS};
pub use layers::{Color, Layer, LayerId, LayerKind, LayerTrait, Path, PenPoint, DEFAULT_LAYER_SIZE};
pub use presence::{
    connection_id_to_color, selection_colors, ConnectionId, Presence, PresencePatch,
    PresenceUpdate,
};
pub use room::{Room, Transaction};
pub use selection::{
    find_intersecting_layers_with_rectangle, resize_bounds, Corner, Edge, ResizeHandle,
};
