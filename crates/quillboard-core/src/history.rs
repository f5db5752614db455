//! Snapshot-based undo/redo with pause/resume drag bracketing.

use std::collections::HashMap;

use crate::document::BoardDocument;
use crate::layers::{Layer, LayerId};

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// One restorable state: the document plus the local selection that
/// accompanied it.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub(crate) layers: HashMap<LayerId, Layer>,
    pub(crate) layer_order: Vec<LayerId>,
    pub(crate) selection: Vec<LayerId>,
}

impl Snapshot {
    pub(crate) fn capture(document: &BoardDocument, selection: &[LayerId]) -> Self {
        let (layers, layer_order) = document.clone_state();
        Self {
            layers,
            layer_order,
            selection: selection.to_vec(),
        }
    }
}

/// Undo/redo stacks with a pause bracket for drag gestures.
///
/// While paused, recorded steps collapse into the snapshot captured at
/// `pause` time; `resume` commits that snapshot as a single undoable step,
/// and only if something was recorded in between. An interrupted gesture
/// therefore never leaves the history suspended or littered with
/// per-frame steps.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Snapshot captured when the current pause began.
    pending: Option<Snapshot>,
    /// Whether anything was recorded during the current pause.
    dirty: bool,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `snapshot` as the state to restore on the next undo.
    ///
    /// Call before mutating. While paused this only marks the pending
    /// gesture dirty.
    pub(crate) fn record(&mut self, snapshot: Snapshot) {
        if self.pending.is_some() {
            self.dirty = true;
            return;
        }
        self.push_undo(snapshot);
    }

    /// Begin a pause bracket, capturing the pre-gesture state. Nested
    /// pauses keep the earliest snapshot.
    pub(crate) fn pause(&mut self, snapshot: Snapshot) {
        if self.pending.is_none() {
            self.pending = Some(snapshot);
            self.dirty = false;
        }
    }

    /// End the pause bracket, committing the pre-gesture snapshot as one
    /// step if anything was recorded since `pause`.
    pub fn resume(&mut self) {
        if let Some(snapshot) = self.pending.take() {
            if self.dirty {
                self.push_undo(snapshot);
            }
        }
        self.dirty = false;
    }

    pub fn is_paused(&self) -> bool {
        self.pending.is_some()
    }

    /// Pop the last undo step, exchanging it for `current`.
    pub(crate) fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(snapshot)
    }

    /// Pop the last redo step, exchanging it for `current`.
    pub(crate) fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }
}
