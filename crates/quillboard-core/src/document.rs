//! The shared board document: layers keyed by id plus their paint order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::layers::{Layer, LayerId};

/// Hard capacity ceiling on the number of layers in one board.
pub const MAX_LAYERS: usize = 100;

/// The durable layer store. Mutated only inside room transactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardDocument {
    layers: HashMap<LayerId, Layer>,
    /// Paint order, back to front. Append-only on insert.
    layer_order: Vec<LayerId>,
}

impl BoardDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a layer, appending its id to the paint order.
    pub fn insert_layer(&mut self, layer: Layer) {
        let id = layer.id();
        self.layer_order.push(id);
        self.layers.insert(id, layer);
    }

    /// Remove a layer and its order entry.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        self.layer_order.retain(|&layer_id| layer_id != id);
        self.layers.remove(&id)
    }

    /// Look up a layer by id.
    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    /// Look up a layer by id, mutably.
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    /// All layers keyed by id.
    pub fn layers(&self) -> &HashMap<LayerId, Layer> {
        &self.layers
    }

    /// Paint order, back to front.
    pub fn layer_order(&self) -> &[LayerId] {
        &self.layer_order
    }

    /// Layers in paint order.
    pub fn layers_ordered(&self) -> impl Iterator<Item = &Layer> {
        self.layer_order.iter().filter_map(|id| self.layers.get(id))
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Whether the document has reached [`MAX_LAYERS`].
    pub fn is_full(&self) -> bool {
        self.layers.len() >= MAX_LAYERS
    }

    /// Replace the whole store. Used when restoring a history snapshot.
    pub(crate) fn set_state(&mut self, layers: HashMap<LayerId, Layer>, layer_order: Vec<LayerId>) {
        self.layers = layers;
        self.layer_order = layer_order;
    }

    pub(crate) fn clone_state(&self) -> (HashMap<LayerId, Layer>, Vec<LayerId>) {
        (self.layers.clone(), self.layer_order.clone())
    }
}
