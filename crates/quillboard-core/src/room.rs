//! In-process reference implementation of the shared room service.
//!
//! The interaction core is written against this surface: atomic document
//! transactions, fire-and-forget presence broadcast, a reactive view of
//! the other participants, and the history control. A networked
//! deployment swaps the storage and transport behind the same calls; the
//! core itself never blocks on either.

use crate::document::BoardDocument;
use crate::history::{History, Snapshot};
use crate::layers::{Layer, LayerId};
use crate::presence::{ConnectionId, Presence, PresencePatch, PresenceUpdate};
use std::collections::HashMap;

/// One participant's connection to a board.
pub struct Room {
    connection_id: ConnectionId,
    document: BoardDocument,
    presence: Presence,
    /// Latest known presence of every other participant.
    others: HashMap<ConnectionId, Presence>,
    history: History,
    /// Queued presence broadcasts (JSON), drained by the host transport.
    outgoing: Vec<String>,
}

/// Handle passed to [`Room::update`] closures. All writes issued through
/// it land in one atomic, undoable batch.
pub struct Transaction<'a> {
    document: &'a mut BoardDocument,
    presence: &'a mut Presence,
    presence_changed: bool,
}

impl Transaction<'_> {
    /// Insert a layer, appending it to the paint order.
    pub fn insert_layer(&mut self, layer: Layer) {
        self.document.insert_layer(layer);
    }

    /// Remove a layer and its order entry.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        self.document.remove_layer(id)
    }

    /// Mutable access to one layer.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.document.get_mut(id)
    }

    /// Read view of the document inside the transaction.
    pub fn document(&self) -> &BoardDocument {
        self.document
    }

    /// The local selection as of this transaction.
    pub fn selection(&self) -> &[LayerId] {
        &self.presence.selection
    }

    /// Replace the local selection. Part of the same undoable batch.
    pub fn set_selection(&mut self, selection: Vec<LayerId>) {
        self.presence.selection = selection;
        self.presence_changed = true;
    }
}

impl Room {
    /// Create a room connection with an empty document.
    pub fn new(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            document: BoardDocument::new(),
            presence: Presence::default(),
            others: HashMap::new(),
            history: History::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Snapshot read of the shared document.
    pub fn document(&self) -> &BoardDocument {
        &self.document
    }

    /// The local participant's presence.
    pub fn my_presence(&self) -> &Presence {
        &self.presence
    }

    /// Presence of every other participant.
    pub fn others(&self) -> impl Iterator<Item = (ConnectionId, &Presence)> {
        self.others.iter().map(|(id, presence)| (*id, presence))
    }

    // --- Document transactions ---

    /// Run an atomic mutation transaction.
    ///
    /// The pre-transaction state is recorded as one undoable step (or
    /// folded into the active pause bracket); selection changes made
    /// inside the closure are broadcast once the batch completes.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Transaction) -> R) -> R {
        self.history
            .record(Snapshot::capture(&self.document, &self.presence.selection));

        let mut txn = Transaction {
            document: &mut self.document,
            presence: &mut self.presence,
            presence_changed: false,
        };
        let result = f(&mut txn);
        let presence_changed = txn.presence_changed;

        if presence_changed {
            self.queue_presence();
        }
        result
    }

    // --- Presence ---

    /// Apply a sparse presence update and broadcast it. Fire-and-forget:
    /// never recorded in history, never awaited.
    pub fn set_my_presence(&mut self, patch: PresencePatch) {
        self.presence.apply(patch);
        self.queue_presence();
    }

    /// Feed a remote participant's presence into the `others` view.
    pub fn apply_remote_presence(&mut self, connection_id: ConnectionId, presence: Presence) {
        if connection_id != self.connection_id {
            self.others.insert(connection_id, presence);
        }
    }

    /// Drop a disconnected participant.
    pub fn remove_peer(&mut self, connection_id: ConnectionId) {
        self.others.remove(&connection_id);
    }

    /// Drain the queued outgoing presence broadcasts.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    // --- History ---

    /// Suspend undo recording for the duration of a drag gesture.
    pub fn history_pause(&mut self) {
        self.history
            .pause(Snapshot::capture(&self.document, &self.presence.selection));
    }

    /// Resume undo recording, collapsing the suspended gesture into one
    /// step.
    pub fn history_resume(&mut self) {
        self.history.resume();
    }

    /// Undo the last step. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = Snapshot::capture(&self.document, &self.presence.selection);
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone step. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let current = Snapshot::capture(&self.document, &self.presence.selection);
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.document
            .set_state(snapshot.layers, snapshot.layer_order);
        self.presence.selection = snapshot.selection;
        self.queue_presence();
    }

    fn queue_presence(&mut self) {
        let update = PresenceUpdate {
            connection_id: self.connection_id,
            presence: self.presence.clone(),
        };
        match serde_json::to_string(&update) {
            Ok(json) => self.outgoing.push(json),
            Err(e) => log::error!("failed to serialize presence update: {e}"),
        }
    }
}
