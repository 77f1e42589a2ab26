//! Shared types for the validation pipeline.

use std::collections::HashMap;

use crate::arrangement::GridArrangement;
use crate::pose::Pose;
use crate::shapes::ShapeLibrary;
use crate::validation::config::EngineConfig;
use crate::validation::result::ValidationResult;

/// The observed state of one piece: continuous pose plus the discrete
/// rotation and mirror state the interaction layer tracks for it.
///
/// The pose is the piece's rigid transform in whatever frame the map is
/// expressed in (world for a pose source, anchor-relative inside the
/// validator). The discrete rotation index and mirror flag are applied to
/// the shape's unit-space geometry before the pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pose: Pose,
    pub rotation_index: u32,
    pub mirrored: bool,
}

impl Placement {
    pub fn new(pose: Pose, rotation_index: u32, mirrored: bool) -> Self {
        Self {
            pose,
            rotation_index,
            mirrored,
        }
    }
}

/// Everything a validator needs for one evaluation pass.
///
/// `relative` holds anchor-relative placements (the anchor itself maps to
/// the identity pose); `world` holds the raw poses for rule sets that are
/// not anchor-invariant (lattice mode).
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub arrangement: &'a GridArrangement,
    pub library: &'a ShapeLibrary,
    pub config: &'a EngineConfig,
    pub world: &'a HashMap<String, Placement>,
    pub relative: &'a HashMap<String, Placement>,
}

/// A rule set evaluated over one arrangement and placement snapshot.
///
/// Implementations must not panic on malformed data: a constraint that
/// cannot be resolved is recorded as violated, never raised as a fault.
pub trait ArrangementValidator {
    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationResult;
}
