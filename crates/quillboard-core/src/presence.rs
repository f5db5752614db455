//! Ephemeral per-participant presence and its projections.
//!
//! Presence is broadcast best-effort and overwritten at pointer-move
//! frequency; it never touches the durable document.

use std::collections::HashMap;

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::layers::{Color, LayerId, PenPoint};

/// Identifier the presence channel assigns to each connection.
pub type ConnectionId = u32;

/// Highlight palette cycled through by connection id.
const CONNECTION_PALETTE: [Color; 5] = [
    Color { r: 220, g: 38, b: 38 },
    Color { r: 217, g: 119, b: 6 },
    Color { r: 5, g: 150, b: 105 },
    Color { r: 124, g: 58, b: 237 },
    Color { r: 219, g: 39, b: 119 },
];

/// Deterministic highlight color for a connection, stable for its lifetime.
pub fn connection_id_to_color(connection_id: ConnectionId) -> Color {
    CONNECTION_PALETTE[connection_id as usize % CONNECTION_PALETTE.len()]
}

/// Ephemeral state one participant broadcasts to the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Presence {
    /// Ids of the layers this participant has selected.
    pub selection: Vec<LayerId>,
    /// Cursor position in canvas coordinates, if over the canvas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Point>,
    /// In-progress pencil stroke, in canvas coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pencil_draft: Option<Vec<PenPoint>>,
    /// Stroke color of the in-progress pencil draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pen_color: Option<Color>,
}

/// Sparse presence update. Only present fields are applied.
#[derive(Debug, Clone, Default)]
pub struct PresencePatch {
    pub selection: Option<Vec<LayerId>>,
    pub cursor: Option<Option<Point>>,
    pub pencil_draft: Option<Option<Vec<PenPoint>>>,
    pub pen_color: Option<Option<Color>>,
}

impl Presence {
    /// Apply a sparse update in place.
    pub fn apply(&mut self, patch: PresencePatch) {
        if let Some(selection) = patch.selection {
            self.selection = selection;
        }
        if let Some(cursor) = patch.cursor {
            self.cursor = cursor;
        }
        if let Some(draft) = patch.pencil_draft {
            self.pencil_draft = draft;
        }
        if let Some(pen_color) = patch.pen_color {
            self.pen_color = pen_color;
        }
    }
}

/// One queued presence broadcast, serialized for the host transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceUpdate {
    pub connection_id: ConnectionId,
    #[serde(flatten)]
    pub presence: Presence,
}

/// Project remote selections onto per-layer highlight colors.
///
/// Each selected layer gets the selecting connection's palette color. When
/// two participants select the same layer the last one iterated wins; the
/// highlight is visual only, so the race is acceptable.
pub fn selection_colors<'a>(
    others: impl Iterator<Item = (ConnectionId, &'a Presence)>,
) -> HashMap<LayerId, Color> {
    let mut colors = HashMap::new();
    for (connection_id, presence) in others {
        for layer_id in &presence.selection {
            colors.insert(*layer_id, connection_id_to_color(connection_id));
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_connection_color_stable_and_cycling() {
        assert_eq!(connection_id_to_color(0), connection_id_to_color(0));
        assert_eq!(connection_id_to_color(2), connection_id_to_color(7));
        assert_ne!(connection_id_to_color(0), connection_id_to_color(1));
    }

    #[test]
    fn test_patch_touches_only_named_fields() {
        let mut presence = Presence {
            selection: vec![Uuid::new_v4()],
            cursor: Some(Point::new(1.0, 1.0)),
            pencil_draft: None,
            pen_color: None,
        };

        presence.apply(PresencePatch {
            cursor: Some(None),
            ..Default::default()
        });

        assert!(presence.cursor.is_none());
        assert_eq!(presence.selection.len(), 1);
    }

    #[test]
    fn test_selection_colors_projection() {
        let shared = Uuid::new_v4();
        let only_b = Uuid::new_v4();
        let a = Presence {
            selection: vec![shared],
            ..Default::default()
        };
        let b = Presence {
            selection: vec![shared, only_b],
            ..Default::default()
        };

        let colors = selection_colors([(0, &a), (1, &b)].into_iter());

        // Later selector wins the contested layer.
        assert_eq!(colors[&shared], connection_id_to_color(1));
        assert_eq!(colors[&only_b], connection_id_to_color(1));
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn test_presence_update_serializes_flat() {
        let update = PresenceUpdate {
            connection_id: 3,
            presence: Presence::default(),
        };
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"connection_id\":3"));
        assert!(json.contains("\"selection\":[]"));
    }
}
