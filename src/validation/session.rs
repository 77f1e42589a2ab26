//! Win-condition orchestration.
//!
//! A [`WinConditionSession`] owns one puzzle's arrangement, shape library,
//! validator, and anchor-selector state, and turns a pose snapshot into a
//! [`ValidationResult`] with a single synchronous [`evaluate`] call. Safe
//! to call on every relevant pose update: end of a drag gesture, or once
//! per processed vision frame.
//!
//! [`evaluate`]: WinConditionSession::evaluate

use std::collections::HashMap;

use crate::arrangement::{GridArrangement, ValidationMode};
use crate::pose::Pose;
use crate::shapes::ShapeLibrary;
use crate::validation::anchor::{relative_placements, AnchorSelector};
use crate::validation::combine::CompositeValidator;
use crate::validation::config::EngineConfig;
use crate::validation::engine::GeometricValidator;
use crate::validation::lattice::LatticeValidator;
use crate::validation::result::ValidationResult;
use crate::validation::types::{ArrangementValidator, Placement, ValidationContext};

/// Where current piece placements come from: the touch layer or the
/// vision pipeline, selected at composition time.
pub trait PoseSource {
    /// Current world-frame placements of all placed pieces.
    fn current_placements(&self) -> HashMap<String, Placement>;

    /// Optional anchor preference. A hint, not a mandate: a hinted piece
    /// that is not placed is ignored.
    fn anchor_hint(&self) -> Option<String> {
        None
    }
}

/// A fixed placement snapshot. Used by tests and by the authoring CLI to
/// replay an arrangement's own authored positions.
#[derive(Debug, Clone, Default)]
pub struct StaticPoseSource {
    placements: HashMap<String, Placement>,
    anchor: Option<String>,
}

impl StaticPoseSource {
    pub fn new(placements: HashMap<String, Placement>) -> Self {
        Self {
            placements,
            anchor: None,
        }
    }

    pub fn with_anchor_hint(mut self, anchor: &str) -> Self {
        self.anchor = Some(anchor.to_string());
        self
    }

    /// Snapshot the authored positions of an arrangement, with zero
    /// continuous rotation. Lets authoring tools confirm a puzzle's own
    /// layout satisfies its constraint graph.
    pub fn from_arrangement(arrangement: &GridArrangement) -> Self {
        let placements = arrangement
            .elements
            .iter()
            .map(|element| {
                (
                    element.id.clone(),
                    Placement::new(
                        Pose::new(element.position.x, element.position.y, 0.0),
                        element.rotation_index,
                        element.mirrored,
                    ),
                )
            })
            .collect();
        Self::new(placements)
    }
}

impl PoseSource for StaticPoseSource {
    fn current_placements(&self) -> HashMap<String, Placement> {
        self.placements.clone()
    }

    fn anchor_hint(&self) -> Option<String> {
        self.anchor.clone()
    }
}

/// One puzzle session: arrangement, shapes, validator, and the sticky
/// anchor state. One instance per session; sessions stay independent.
pub struct WinConditionSession {
    arrangement: GridArrangement,
    library: ShapeLibrary,
    config: EngineConfig,
    validator: Box<dyn ArrangementValidator>,
    anchor: AnchorSelector,
    /// True when the preference was set through [`set_preferred_anchor`];
    /// pose-source hints must not displace an explicit pin.
    ///
    /// [`set_preferred_anchor`]: WinConditionSession::set_preferred_anchor
    anchor_pinned: bool,
}

impl WinConditionSession {
    /// Build a session with the validator the arrangement's mode calls
    /// for: the geometric rule set alone in freeform mode, composed with
    /// the lattice rule set in lattice mode.
    pub fn new(arrangement: GridArrangement, library: ShapeLibrary) -> Self {
        let validator: Box<dyn ArrangementValidator> = match arrangement.meta.mode {
            ValidationMode::Freeform => Box::new(GeometricValidator::new()),
            ValidationMode::Lattice => Box::new(
                CompositeValidator::new()
                    .with(Box::new(GeometricValidator::new()))
                    .with(Box::new(LatticeValidator::new())),
            ),
        };
        Self {
            arrangement,
            library,
            config: EngineConfig::default(),
            validator,
            anchor: AnchorSelector::new(),
            anchor_pinned: false,
        }
    }

    /// Replace the validator, e.g. to compose extra per-puzzle rules.
    pub fn with_validator(mut self, validator: Box<dyn ArrangementValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn arrangement(&self) -> &GridArrangement {
        &self.arrangement
    }

    /// Pin the anchor choice, overriding pose-source hints. Passing
    /// `None` removes the pin and lets hints apply again.
    pub fn set_preferred_anchor(&mut self, anchor: Option<String>) {
        self.anchor_pinned = anchor.is_some();
        self.anchor.set_preferred(anchor);
    }

    /// Forget the sticky anchor and any pin. Call when a new puzzle
    /// session starts.
    pub fn reset(&mut self) {
        self.anchor_pinned = false;
        self.anchor.reset();
    }

    /// Pull current poses, compute anchor-relative placements, run the
    /// validator, and stamp the chosen anchor onto the result. Pure
    /// aside from the anchor selector's sticky memory.
    pub fn evaluate(&mut self, source: &dyn PoseSource) -> ValidationResult {
        let world = source.current_placements();
        if !self.anchor_pinned {
            if let Some(hint) = source.anchor_hint() {
                self.anchor.set_preferred(Some(hint));
            }
        }

        let anchor_id = self.anchor.select(&world);
        let relative = match &anchor_id {
            Some(anchor) => relative_placements(anchor, &world),
            None => HashMap::new(),
        };

        let ctx = ValidationContext {
            arrangement: &self.arrangement,
            library: &self.library,
            config: &self.config,
            world: &world,
            relative: &relative,
        };
        let mut result = self.validator.validate(&ctx);
        result.anchor = anchor_id;
        // Global rotation detection is stubbed: freeform arrangements
        // report the canonical orientation.
        result.global_rotation_index = match self.arrangement.meta.mode {
            ValidationMode::Freeform => Some(0),
            ValidationMode::Lattice => None,
        };
        result
    }
}
