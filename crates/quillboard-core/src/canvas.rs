//! The interaction state machine and the document mutation operations.
//!
//! Raw pointer events enter here, get classified by the current mode, and
//! either become atomic document transactions or presence-only updates.

use kurbo::{Point, Rect, Vec2};
use thiserror::Error;

use crate::camera::Camera;
use crate::document::MAX_LAYERS;
use crate::layers::{Color, Layer, LayerId, LayerKind, Path, PenPoint};
use crate::presence::{selection_colors, ConnectionId, PresencePatch};
use crate::room::Room;
use crate::selection::{find_intersecting_layers_with_rectangle, resize_bounds, ResizeHandle};

/// Manhattan distance a pressed pointer must travel before the press
/// becomes a selection net.
const DRAG_THRESHOLD: f64 = 5.0;

/// Toolbar selection. Maps directly onto the idle interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Pointer / selection tool (default).
    Select,
    /// The next pointer-up inserts a layer of this kind.
    Insert(LayerKind),
    /// Freehand drawing.
    Pencil,
}

/// The active interaction mode. Exactly one variant at any time; purely
/// local, never broadcast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasState {
    /// Idle, nothing pressed.
    None,
    /// Pointer down, not yet past the drag threshold.
    Pressing {
        /// Canvas point where the press started.
        origin: Point,
    },
    /// Rectangular marquee in progress.
    SelectionNet {
        /// Canvas point where the marquee started.
        origin: Point,
        /// Last canvas point seen.
        current: Point,
    },
    /// Dragging the current selection.
    Translating {
        /// Last canvas point seen; deltas are incremental from here.
        current: Point,
    },
    /// Dragging a resize handle of a single selected layer.
    Resizing {
        /// Bounds of the layer when the handle was grabbed.
        initial_bounds: Rect,
        /// The handle being dragged.
        handle: ResizeHandle,
    },
    /// The next pointer-up inserts a new layer of this kind.
    Inserting { kind: LayerKind },
    /// Freehand drawing in progress.
    Pencil,
}

/// Why an insert was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    /// The board already holds [`MAX_LAYERS`] layers.
    #[error("board is at capacity ({MAX_LAYERS} layers)")]
    CapacityExceeded,
    /// The pencil draft had fewer than 2 samples.
    #[error("pencil draft needs at least 2 samples")]
    DraftTooShort,
}

/// The top-level interaction controller for one participant's canvas.
///
/// Owns the current [`CanvasState`], the [`Camera`], and the connection to
/// the shared [`Room`]; dispatches pointer events to the handler for the
/// active mode and decides which of them become document mutations versus
/// presence-only updates.
pub struct Canvas {
    room: Room,
    camera: Camera,
    mode: CanvasState,
    /// Where the canvas sits in the host window, in client pixels.
    viewport_origin: Point,
    /// Fill applied to every newly inserted layer until changed.
    last_used_color: Color,
}

impl Canvas {
    /// Create a canvas bound to a new room connection.
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            room: Room::new(connection_id),
            camera: Camera::new(),
            mode: CanvasState::None,
            viewport_origin: Point::ZERO,
            last_used_color: Color::black(),
        }
    }

    // --- Accessors ---

    pub fn mode(&self) -> CanvasState {
        self.mode
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn room_mut(&mut self) -> &mut Room {
        &mut self.room
    }

    pub fn last_used_color(&self) -> Color {
        self.last_used_color
    }

    /// Tell the canvas where it sits in the host window.
    pub fn set_viewport_origin(&mut self, origin: Point) {
        self.viewport_origin = origin;
    }

    /// Remote selections projected onto per-layer highlight colors.
    pub fn layer_selection_colors(&self) -> std::collections::HashMap<LayerId, Color> {
        selection_colors(self.room.others())
    }

    // --- Tool selection ---

    /// Select a tool from the toolbar. Never touches the document.
    pub fn set_tool(&mut self, tool: Tool) {
        self.mode = match tool {
            Tool::Select => CanvasState::None,
            Tool::Insert(kind) => CanvasState::Inserting { kind },
            Tool::Pencil => CanvasState::Pencil,
        };
    }

    // --- Pointer events ---

    /// Pointer pressed on the canvas background.
    pub fn on_pointer_down(&mut self, client: Point, pressure: f64) {
        let point = self.camera.screen_to_canvas(client, self.viewport_origin);
        match self.mode {
            // Insertion happens on pointer-up.
            CanvasState::Inserting { .. } => {}
            CanvasState::Pencil => self.start_drawing(point, pressure),
            _ => self.mode = CanvasState::Pressing { origin: point },
        }
    }

    /// Pointer moved. `primary_down` reports whether the primary button is
    /// still held.
    pub fn on_pointer_move(&mut self, client: Point, pressure: f64, primary_down: bool) {
        let point = self.camera.screen_to_canvas(client, self.viewport_origin);
        match self.mode {
            CanvasState::Pressing { origin } => {
                if manhattan_distance(origin, point) > DRAG_THRESHOLD {
                    self.mode = CanvasState::SelectionNet {
                        origin,
                        current: point,
                    };
                    self.update_selection_net(origin, point);
                }
            }
            CanvasState::SelectionNet { origin, .. } => {
                self.mode = CanvasState::SelectionNet {
                    origin,
                    current: point,
                };
                self.update_selection_net(origin, point);
            }
            CanvasState::Translating { .. } => self.translate_selection(point),
            CanvasState::Resizing { .. } => self.resize_selection(point),
            CanvasState::Pencil => {
                if primary_down {
                    self.continue_drawing(point, pressure);
                }
            }
            CanvasState::None | CanvasState::Inserting { .. } => {}
        }

        self.room.set_my_presence(PresencePatch {
            cursor: Some(Some(point)),
            ..Default::default()
        });
    }

    /// Pointer released. Deterministically terminates the active mode.
    pub fn on_pointer_up(&mut self, client: Point) {
        let point = self.camera.screen_to_canvas(client, self.viewport_origin);
        match self.mode {
            CanvasState::None | CanvasState::Pressing { .. } => {
                self.unselect_all();
                self.mode = CanvasState::None;
            }
            CanvasState::Pencil => match self.insert_path() {
                Err(InsertError::CapacityExceeded) => {
                    log::warn!("pencil stroke dropped: board is at capacity");
                }
                Err(InsertError::DraftTooShort) | Ok(_) => {}
            },
            CanvasState::Inserting { kind } => {
                if let Err(e) = self.insert_layer(kind, point) {
                    log::warn!("layer insert dropped: {e}");
                }
            }
            // A finished net, drag, or resize keeps its result.
            _ => self.mode = CanvasState::None,
        }
        self.room.history_resume();
    }

    /// Pointer left the canvas; hide the remote cursor.
    pub fn on_pointer_leave(&mut self) {
        self.room.set_my_presence(PresencePatch {
            cursor: Some(None),
            ..Default::default()
        });
    }

    /// Wheel scrolled: pan the camera.
    pub fn on_wheel(&mut self, delta: Vec2) {
        self.camera.pan(Vec2::new(-delta.x, -delta.y));
    }

    /// Pointer pressed on a rendered layer. Selects it (if needed) and
    /// starts a translate drag; the whole drag is one undo step.
    pub fn on_layer_pointer_down(&mut self, layer_id: LayerId, client: Point) {
        if matches!(
            self.mode,
            CanvasState::Pencil | CanvasState::Inserting { .. }
        ) {
            return;
        }

        self.room.history_pause();
        let point = self.camera.screen_to_canvas(client, self.viewport_origin);
        if !self.room.my_presence().selection.contains(&layer_id) {
            self.room.update(|txn| txn.set_selection(vec![layer_id]));
        }
        self.mode = CanvasState::Translating { current: point };
    }

    /// Pointer pressed on a resize handle of the single selected layer.
    pub fn on_resize_handle_pointer_down(&mut self, handle: ResizeHandle) {
        let selection = &self.room.my_presence().selection;
        if selection.len() != 1 {
            return;
        }
        let layer_id = selection[0];
        let Some(layer) = self.room.document().get(layer_id) else {
            return;
        };

        let initial_bounds = layer.bounds();
        self.room.history_pause();
        self.mode = CanvasState::Resizing {
            initial_bounds,
            handle,
        };
    }

    // --- Document mutation operations ---

    /// Insert a new layer of `kind` at `position` with the default size
    /// and the last-used fill.
    ///
    /// Errors with [`InsertError::CapacityExceeded`] at the layer cap; the
    /// interaction mode returns to idle either way.
    pub fn insert_layer(&mut self, kind: LayerKind, position: Point) -> Result<LayerId, InsertError> {
        if self.room.document().is_full() {
            self.mode = CanvasState::None;
            return Err(InsertError::CapacityExceeded);
        }

        let layer = Layer::new(kind, position, self.last_used_color);
        let id = layer.id();
        self.room.update(|txn| {
            txn.insert_layer(layer);
            txn.set_selection(vec![id]);
        });
        self.mode = CanvasState::None;
        Ok(id)
    }

    /// Commit the in-progress pencil draft as a path layer.
    ///
    /// The draft is cleared whether or not a layer was committed; the
    /// selection is untouched and the mode returns to [`CanvasState::Pencil`]
    /// so the user can keep drawing.
    pub fn insert_path(&mut self) -> Result<LayerId, InsertError> {
        let draft = self.room.my_presence().pencil_draft.clone();
        let Some(points) = draft else {
            return Err(InsertError::DraftTooShort);
        };

        let result = if points.len() < 2 {
            Err(InsertError::DraftTooShort)
        } else if self.room.document().is_full() {
            Err(InsertError::CapacityExceeded)
        } else {
            let fill = self
                .room
                .my_presence()
                .pen_color
                .unwrap_or(self.last_used_color);
            let layer = Layer::Path(Path::from_pen_points(&points, fill));
            let id = layer.id();
            self.room.update(|txn| txn.insert_layer(layer));
            Ok(id)
        };

        self.room.set_my_presence(PresencePatch {
            pencil_draft: Some(None),
            ..Default::default()
        });
        self.mode = CanvasState::Pencil;
        result
    }

    /// Move every selected layer by the delta since the last recorded
    /// point. No-op unless a translate drag is active.
    pub fn translate_selection(&mut self, point: Point) {
        let CanvasState::Translating { current } = self.mode else {
            return;
        };

        let delta = point - current;
        let selection = self.room.my_presence().selection.clone();
        if !selection.is_empty() {
            self.room.update(|txn| {
                for id in &selection {
                    if let Some(layer) = txn.layer_mut(*id) {
                        layer.translate(delta);
                    }
                }
            });
        }
        self.mode = CanvasState::Translating { current: point };
    }

    /// Resize the single selected layer from the frozen initial bounds.
    /// No-op unless a resize drag is active.
    pub fn resize_selection(&mut self, point: Point) {
        let CanvasState::Resizing {
            initial_bounds,
            handle,
        } = self.mode
        else {
            return;
        };
        let selection = &self.room.my_presence().selection;
        if selection.len() != 1 {
            return;
        }
        let layer_id = selection[0];

        let bounds = resize_bounds(initial_bounds, handle, point);
        self.room.update(|txn| {
            if let Some(layer) = txn.layer_mut(layer_id) {
                layer.set_bounds(bounds);
            }
        });
    }

    /// Clear the local selection. Undoable only when it changes something.
    pub fn unselect_all(&mut self) {
        if !self.room.my_presence().selection.is_empty() {
            self.room.update(|txn| txn.set_selection(Vec::new()));
        }
    }

    /// Delete every selected layer in one undoable step.
    pub fn delete_selection(&mut self) {
        let selection = self.room.my_presence().selection.clone();
        if selection.is_empty() {
            return;
        }
        self.room.update(|txn| {
            for id in &selection {
                txn.remove_layer(*id);
            }
            txn.set_selection(Vec::new());
        });
    }

    /// Set the fill of every selected layer and remember it as the color
    /// for the next insert.
    pub fn set_fill(&mut self, fill: Color) {
        self.last_used_color = fill;
        let selection = self.room.my_presence().selection.clone();
        if selection.is_empty() {
            return;
        }
        self.room.update(|txn| {
            for id in &selection {
                if let Some(layer) = txn.layer_mut(*id) {
                    layer.set_fill(fill);
                }
            }
        });
    }

    // --- History passthrough ---

    pub fn undo(&mut self) -> bool {
        self.room.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.room.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.room.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.room.can_redo()
    }

    // --- Gesture internals ---

    fn start_drawing(&mut self, point: Point, pressure: f64) {
        self.room.set_my_presence(PresencePatch {
            pencil_draft: Some(Some(vec![PenPoint::new(point.x, point.y, pressure)])),
            pen_color: Some(Some(self.last_used_color)),
            ..Default::default()
        });
    }

    fn continue_drawing(&mut self, point: Point, pressure: f64) {
        let Some(mut draft) = self.room.my_presence().pencil_draft.clone() else {
            return;
        };

        // Guard against a degenerate single-point "stroke" before the
        // pointer actually moves.
        let duplicate = draft.len() == 1 && draft[0].x == point.x && draft[0].y == point.y;
        if !duplicate {
            draft.push(PenPoint::new(point.x, point.y, pressure));
        }
        self.room.set_my_presence(PresencePatch {
            pencil_draft: Some(Some(draft)),
            ..Default::default()
        });
    }

    fn update_selection_net(&mut self, origin: Point, current: Point) {
        let document = self.room.document();
        let ids = find_intersecting_layers_with_rectangle(
            document.layer_order(),
            document.layers(),
            origin,
            current,
        );
        self.room.set_my_presence(PresencePatch {
            selection: Some(ids),
            ..Default::default()
        });
    }
}

fn manhattan_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Corner;

    fn canvas() -> Canvas {
        Canvas::new(1)
    }

    /// Insert a rectangle through the toolbar flow and return its id.
    fn insert_rectangle_at(canvas: &mut Canvas, x: f64, y: f64) -> LayerId {
        canvas.set_tool(Tool::Insert(LayerKind::Rectangle));
        canvas.on_pointer_up(Point::new(x, y));
        canvas.room().my_presence().selection[0]
    }

    #[test]
    fn test_insert_rectangle_end_to_end() {
        let mut canvas = canvas();
        canvas.set_tool(Tool::Insert(LayerKind::Rectangle));
        assert!(matches!(canvas.mode(), CanvasState::Inserting { .. }));

        canvas.on_pointer_up(Point::new(40.0, 40.0));

        assert_eq!(canvas.room().document().len(), 1);
        let id = canvas.room().document().layer_order()[0];
        let bounds = canvas.room().document().get(id).unwrap().bounds();
        assert!((bounds.x0 - 40.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 40.0).abs() < f64::EPSILON);
        assert_eq!(canvas.room().my_presence().selection, vec![id]);
        assert_eq!(canvas.mode(), CanvasState::None);
    }

    #[test]
    fn test_pointer_down_while_inserting_is_noop() {
        let mut canvas = canvas();
        canvas.set_tool(Tool::Insert(LayerKind::Note));
        canvas.on_pointer_down(Point::new(10.0, 10.0), 0.5);
        assert!(matches!(canvas.mode(), CanvasState::Inserting { .. }));
    }

    #[test]
    fn test_selection_net_end_to_end() {
        let mut canvas = canvas();
        let near = insert_rectangle_at(&mut canvas, 0.0, 0.0);
        let far = insert_rectangle_at(&mut canvas, 500.0, 500.0);
        canvas.set_tool(Tool::Select);

        // Shrink the near layer so only it falls inside the net.
        canvas.room_mut().update(|txn| {
            txn.layer_mut(near)
                .unwrap()
                .set_bounds(Rect::new(2.0, 2.0, 5.0, 5.0));
        });

        canvas.on_pointer_down(Point::new(0.0, 0.0), 0.5);
        assert_eq!(
            canvas.mode(),
            CanvasState::Pressing {
                origin: Point::ZERO
            }
        );

        canvas.on_pointer_move(Point::new(10.0, 10.0), 0.5, true);
        assert_eq!(
            canvas.mode(),
            CanvasState::SelectionNet {
                origin: Point::ZERO,
                current: Point::new(10.0, 10.0),
            }
        );
        let selection = &canvas.room().my_presence().selection;
        assert!(selection.contains(&near));
        assert!(!selection.contains(&far));
    }

    #[test]
    fn test_selection_net_survives_pointer_up() {
        let mut canvas = canvas();
        let id = insert_rectangle_at(&mut canvas, 2.0, 2.0);
        canvas.set_tool(Tool::Select);

        canvas.on_pointer_down(Point::new(0.0, 0.0), 0.5);
        canvas.on_pointer_move(Point::new(50.0, 50.0), 0.5, true);
        canvas.on_pointer_up(Point::new(50.0, 50.0));

        assert_eq!(canvas.mode(), CanvasState::None);
        assert_eq!(canvas.room().my_presence().selection, vec![id]);
    }

    #[test]
    fn test_idle_pointer_up_unselects() {
        let mut canvas = canvas();
        insert_rectangle_at(&mut canvas, 0.0, 0.0);
        assert_eq!(canvas.room().my_presence().selection.len(), 1);

        canvas.set_tool(Tool::Select);
        canvas.on_pointer_down(Point::new(300.0, 300.0), 0.5);
        canvas.on_pointer_up(Point::new(300.0, 300.0));

        assert!(canvas.room().my_presence().selection.is_empty());
        assert_eq!(canvas.mode(), CanvasState::None);
    }

    #[test]
    fn test_small_move_stays_pressing() {
        let mut canvas = canvas();
        canvas.on_pointer_down(Point::new(0.0, 0.0), 0.5);
        canvas.on_pointer_move(Point::new(2.0, 2.0), 0.5, true);
        assert!(matches!(canvas.mode(), CanvasState::Pressing { .. }));
    }

    #[test]
    fn test_pencil_commit_flow() {
        let mut canvas = canvas();
        canvas.set_tool(Tool::Pencil);

        canvas.on_pointer_down(Point::new(5.0, 5.0), 0.5);
        canvas.on_pointer_move(Point::new(15.0, 5.0), 0.5, true);
        canvas.on_pointer_move(Point::new(5.0, 15.0), 0.5, true);
        assert_eq!(
            canvas
                .room()
                .my_presence()
                .pencil_draft
                .as_ref()
                .unwrap()
                .len(),
            3
        );

        canvas.on_pointer_up(Point::new(5.0, 15.0));

        assert_eq!(canvas.room().document().len(), 1);
        assert!(canvas.room().my_presence().pencil_draft.is_none());
        assert_eq!(canvas.mode(), CanvasState::Pencil);

        let id = canvas.room().document().layer_order()[0];
        let bounds = canvas.room().document().get(id).unwrap().bounds();
        assert!((bounds.x0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 10.0).abs() < f64::EPSILON);
        // Pencil strokes do not steal the selection.
        assert!(canvas.room().my_presence().selection.is_empty());
    }

    #[test]
    fn test_single_point_stroke_not_committed() {
        let mut canvas = canvas();
        canvas.set_tool(Tool::Pencil);
        canvas.on_pointer_down(Point::new(5.0, 5.0), 0.5);
        canvas.on_pointer_up(Point::new(5.0, 5.0));

        assert!(canvas.room().document().is_empty());
        assert!(canvas.room().my_presence().pencil_draft.is_none());
        assert_eq!(canvas.mode(), CanvasState::Pencil);
    }

    #[test]
    fn test_duplicate_first_point_not_appended() {
        let mut canvas = canvas();
        canvas.set_tool(Tool::Pencil);
        canvas.on_pointer_down(Point::new(5.0, 5.0), 0.5);
        canvas.on_pointer_move(Point::new(5.0, 5.0), 0.5, true);

        assert_eq!(
            canvas
                .room()
                .my_presence()
                .pencil_draft
                .as_ref()
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_pencil_move_without_button_ignored() {
        let mut canvas = canvas();
        canvas.set_tool(Tool::Pencil);
        canvas.on_pointer_down(Point::new(5.0, 5.0), 0.5);
        canvas.on_pointer_move(Point::new(50.0, 50.0), 0.5, false);

        assert_eq!(
            canvas
                .room()
                .my_presence()
                .pencil_draft
                .as_ref()
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_capacity_cap_holds() {
        let mut canvas = canvas();
        for i in 0..MAX_LAYERS {
            canvas
                .insert_layer(LayerKind::Rectangle, Point::new(i as f64, 0.0))
                .unwrap();
        }

        let result = canvas.insert_layer(LayerKind::Ellipse, Point::ZERO);
        assert_eq!(result, Err(InsertError::CapacityExceeded));
        assert_eq!(canvas.room().document().len(), MAX_LAYERS);
        assert_eq!(canvas.room().document().layer_order().len(), MAX_LAYERS);
    }

    #[test]
    fn test_pencil_draft_dropped_at_capacity() {
        let mut canvas = canvas();
        for _ in 0..MAX_LAYERS {
            canvas.insert_layer(LayerKind::Rectangle, Point::ZERO).unwrap();
        }
        canvas.set_tool(Tool::Pencil);
        canvas.on_pointer_down(Point::new(0.0, 0.0), 0.5);
        canvas.on_pointer_move(Point::new(10.0, 10.0), 0.5, true);
        canvas.on_pointer_up(Point::new(10.0, 10.0));

        assert_eq!(canvas.room().document().len(), MAX_LAYERS);
        assert!(canvas.room().my_presence().pencil_draft.is_none());
    }

    #[test]
    fn test_translate_drag_is_one_undo_step() {
        let mut canvas = canvas();
        let id = insert_rectangle_at(&mut canvas, 10.0, 10.0);
        canvas.set_tool(Tool::Select);

        canvas.on_layer_pointer_down(id, Point::new(20.0, 20.0));
        assert!(matches!(canvas.mode(), CanvasState::Translating { .. }));
        canvas.on_pointer_move(Point::new(30.0, 20.0), 0.5, true);
        canvas.on_pointer_move(Point::new(40.0, 25.0), 0.5, true);
        canvas.on_pointer_move(Point::new(50.0, 30.0), 0.5, true);
        canvas.on_pointer_up(Point::new(50.0, 30.0));

        let bounds = canvas.room().document().get(id).unwrap().bounds();
        assert!((bounds.x0 - 40.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);

        // The whole drag reverts as a single step.
        assert!(canvas.undo());
        let bounds = canvas.room().document().get(id).unwrap().bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate_requires_matching_mode() {
        let mut canvas = canvas();
        let id = insert_rectangle_at(&mut canvas, 10.0, 10.0);

        // Mode is None after the insert; the call must not move anything.
        canvas.translate_selection(Point::new(90.0, 90.0));
        let bounds = canvas.room().document().get(id).unwrap().bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_from_corner() {
        let mut canvas = canvas();
        let id = insert_rectangle_at(&mut canvas, 0.0, 0.0);

        canvas.on_resize_handle_pointer_down(ResizeHandle::Corner(Corner::BottomRight));
        assert!(matches!(canvas.mode(), CanvasState::Resizing { .. }));

        canvas.on_pointer_move(Point::new(150.0, 60.0), 0.5, true);
        canvas.on_pointer_up(Point::new(150.0, 60.0));

        let bounds = canvas.room().document().get(id).unwrap().bounds();
        assert_eq!(bounds, Rect::new(0.0, 0.0, 150.0, 60.0));
        assert_eq!(canvas.mode(), CanvasState::None);
    }

    #[test]
    fn test_resize_ignored_with_multi_selection() {
        let mut canvas = canvas();
        let a = insert_rectangle_at(&mut canvas, 0.0, 0.0);
        let b = insert_rectangle_at(&mut canvas, 200.0, 200.0);
        canvas.room_mut().update(|txn| txn.set_selection(vec![a, b]));

        canvas.on_resize_handle_pointer_down(ResizeHandle::Corner(Corner::TopLeft));
        assert_eq!(canvas.mode(), CanvasState::None);
    }

    #[test]
    fn test_layer_pointer_down_selects() {
        let mut canvas = canvas();
        let id = insert_rectangle_at(&mut canvas, 0.0, 0.0);
        canvas.unselect_all();

        canvas.on_layer_pointer_down(id, Point::new(10.0, 10.0));
        assert_eq!(canvas.room().my_presence().selection, vec![id]);
    }

    #[test]
    fn test_layer_pointer_down_ignored_while_drawing() {
        let mut canvas = canvas();
        let id = insert_rectangle_at(&mut canvas, 0.0, 0.0);
        canvas.set_tool(Tool::Pencil);

        canvas.on_layer_pointer_down(id, Point::new(10.0, 10.0));
        assert_eq!(canvas.mode(), CanvasState::Pencil);
    }

    #[test]
    fn test_wheel_pans_camera() {
        let mut canvas = canvas();
        canvas.on_wheel(Vec2::new(10.0, -5.0));
        let camera = canvas.camera();
        assert!((camera.x + 10.0).abs() < f64::EPSILON);
        assert!((camera.y - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cursor_presence_tracks_moves() {
        let mut canvas = canvas();
        canvas.on_pointer_move(Point::new(12.0, 34.0), 0.5, false);
        assert_eq!(
            canvas.room().my_presence().cursor,
            Some(Point::new(12.0, 34.0))
        );

        canvas.on_pointer_leave();
        assert!(canvas.room().my_presence().cursor.is_none());
    }

    #[test]
    fn test_delete_selection_round_trips_through_undo() {
        let mut canvas = canvas();
        let id = insert_rectangle_at(&mut canvas, 0.0, 0.0);

        canvas.delete_selection();
        assert!(canvas.room().document().is_empty());
        assert!(canvas.room().my_presence().selection.is_empty());

        assert!(canvas.undo());
        assert!(canvas.room().document().get(id).is_some());
        assert_eq!(canvas.room().my_presence().selection, vec![id]);
    }

    #[test]
    fn test_set_fill_applies_to_selection_and_next_insert() {
        let mut canvas = canvas();
        let id = insert_rectangle_at(&mut canvas, 0.0, 0.0);

        let red = Color::new(220, 38, 38);
        canvas.set_fill(red);
        assert_eq!(canvas.room().document().get(id).unwrap().fill(), red);

        let next = insert_rectangle_at(&mut canvas, 50.0, 50.0);
        assert_eq!(canvas.room().document().get(next).unwrap().fill(), red);
    }

    #[test]
    fn test_unselect_all_is_idempotent() {
        let mut canvas = canvas();
        insert_rectangle_at(&mut canvas, 0.0, 0.0);

        canvas.unselect_all();
        let steps_before = canvas.can_undo();
        assert!(steps_before);
        // Nothing selected: no new undo step is recorded.
        let mut undo_count = 0;
        canvas.unselect_all();
        while canvas.undo() {
            undo_count += 1;
        }
        assert_eq!(undo_count, 2); // insert + the first unselect only
    }

    #[test]
    fn test_camera_pan_affects_insert_position() {
        let mut canvas = canvas();
        canvas.on_wheel(Vec2::new(-100.0, -100.0));
        let id = insert_rectangle_at(&mut canvas, 0.0, 0.0);

        let bounds = canvas.room().document().get(id).unwrap().bounds();
        assert!((bounds.x0 + 100.0).abs() < f64::EPSILON);
        assert!((bounds.y0 + 100.0).abs() < f64::EPSILON);
    }
}
