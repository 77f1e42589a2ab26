//! Value types for the puzzle document.
//!
//! Everything here is an immutable value keyed by string ID and resolved
//! through lookup tables; constraints reference pieces and features by
//! name, never by pointer, so the data stays acyclic.

use serde::{Deserialize, Serialize};

use crate::pose::Point;

/// One piece instance in an arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlacedElement {
    pub id: String,
    /// Shape ID resolved against the [`crate::ShapeLibrary`].
    pub shape: String,
    /// Discrete rotation in `[0, rotation_step)`.
    #[serde(default)]
    pub rotation_index: u32,
    #[serde(default)]
    pub mirrored: bool,
    /// Authoring position (the solution layout, or the lattice cell in
    /// lattice mode).
    pub position: Point,
}

/// Kind of pairwise geometric rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstraintKind {
    CornerToCorner,
    EdgeToEdge,
}

/// Required relative direction of two edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeOrientation {
    SameDirection,
    OppositeDirection,
}

/// One geometric rule between two pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RelationConstraint {
    pub id: String,
    pub piece_a: String,
    pub piece_b: String,
    pub kind: ConstraintKind,
    /// Feature ID on piece A's shape (corner or edge, per `kind`).
    pub feature_a: String,
    /// Feature ID on piece B's shape.
    pub feature_b: String,
    /// Required distance between the features; `None` means coincidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    /// Required discrete rotation of B relative to A, modulo the step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_delta: Option<u32>,
    /// Edge-to-edge only: required direction alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<EdgeOrientation>,
    /// Edge-to-edge only: minimum projected-overlap ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_overlap_ratio: Option<f64>,
    /// Resolve feature IDs through the chirality mapping when the piece
    /// is mirrored.
    #[serde(default)]
    pub mirror_aware: bool,
}

/// Numeric fuzz for geometric equality. All fields must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Tolerances {
    /// Positional slack for corner/edge coincidence, in units.
    pub position: f64,
    /// Angular slack for edge direction alignment, in radians.
    pub angle: f64,
    /// Slack for edge projected-overlap checks, in units.
    pub edge_alignment: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            position: 0.05,
            angle: 0.1,
            edge_alignment: 0.05,
        }
    }
}

/// How an arrangement is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Invariant to the arrangement's global position and rotation.
    #[default]
    Freeform,
    /// Grid-indexed: absolute cell coordinates matter.
    Lattice,
}

/// Validation metadata for one puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ArrangementMeta {
    pub mode: ValidationMode,
    /// Number of discrete rotation positions per full turn (8 = 45° steps).
    pub rotation_step: u32,
    /// Global rotation indices under which the solved arrangement is
    /// accepted (freeform mode).
    pub allowed_global_rotations: Vec<u32>,
    pub tolerances: Tolerances,
}

impl Default for ArrangementMeta {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Freeform,
            rotation_step: 8,
            allowed_global_rotations: vec![0],
            tolerances: Tolerances::default(),
        }
    }
}

/// One puzzle's full definition: pieces, constraint graph, metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GridArrangement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: ArrangementMeta,
    #[serde(default)]
    pub elements: Vec<PlacedElement>,
    #[serde(default)]
    pub constraints: Vec<RelationConstraint>,
}

impl GridArrangement {
    /// Look up a placed element by ID.
    pub fn element(&self, id: &str) -> Option<&PlacedElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Look up a constraint by ID.
    pub fn constraint(&self, id: &str) -> Option<&RelationConstraint> {
        self.constraints.iter().find(|c| c.id == id)
    }
}
