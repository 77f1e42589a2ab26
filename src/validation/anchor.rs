//! Anchor selection for freeform validation.
//!
//! One placed piece becomes the coordinate origin so that relative
//! geometry is invariant to where the whole arrangement sits on the table
//! (or in the camera frame). Selection is deliberately sticky: once a
//! first-placed piece is remembered, it stays the anchor while present,
//! so the anchor does not flicker as pieces are added and removed.

use std::collections::HashMap;

use crate::pose::Pose;
use crate::validation::types::Placement;

/// Chooses the anchor piece and remembers it across calls.
///
/// Selection priority:
/// 1. the preferred anchor, if set and currently placed;
/// 2. the remembered first-placed piece, if currently placed;
/// 3. the lexicographically smallest element ID.
///
/// This is the only mutable cross-call state in the engine. It is a value
/// owned by one puzzle session; reset it when a new session starts.
#[derive(Debug, Clone, Default)]
pub struct AnchorSelector {
    preferred: Option<String>,
    first_placed: Option<String>,
}

impl AnchorSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or clear) the preferred anchor. A preference for a piece that
    /// is not placed is ignored at selection time, not rejected here.
    pub fn set_preferred(&mut self, anchor: Option<String>) {
        self.preferred = anchor;
    }

    /// Forget all remembered state. Call at the start of a puzzle session.
    pub fn reset(&mut self) {
        self.preferred = None;
        self.first_placed = None;
    }

    /// Pick the anchor for the current placement set, or `None` when it
    /// is empty. Losing the remembered piece forces re-selection.
    pub fn select(&mut self, placements: &HashMap<String, Placement>) -> Option<String> {
        if placements.is_empty() {
            self.first_placed = None;
            return None;
        }

        if let Some(preferred) = &self.preferred {
            if placements.contains_key(preferred) {
                let chosen = preferred.clone();
                self.first_placed.get_or_insert_with(|| chosen.clone());
                return Some(chosen);
            }
        }

        if let Some(first) = &self.first_placed {
            if placements.contains_key(first) {
                return Some(first.clone());
            }
            self.first_placed = None;
        }

        let chosen = placements.keys().min().cloned();
        self.first_placed = chosen.clone();
        chosen
    }
}

/// Re-express every placement relative to the anchor:
/// `rel[i] = world[anchor]⁻¹ ⊕ world[i]`. The anchor itself maps to the
/// exact identity pose. Discrete rotation and mirror state pass through
/// unchanged; they are already relative quantities between pieces.
pub fn relative_placements(
    anchor_id: &str,
    world: &HashMap<String, Placement>,
) -> HashMap<String, Placement> {
    let Some(anchor) = world.get(anchor_id) else {
        return HashMap::new();
    };
    let inverse = anchor.pose.inverse();
    world
        .iter()
        .map(|(id, placement)| {
            let pose = if id == anchor_id {
                Pose::identity()
            } else {
                inverse.transform(&placement.pose)
            };
            (
                id.clone(),
                Placement::new(pose, placement.rotation_index, placement.mirrored),
            )
        })
        .collect()
}
