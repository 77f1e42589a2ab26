//! Puzzle Fit - geometric win-condition engine for camera-based puzzle games
//!
//! This library decides whether a free-form arrangement of puzzle pieces
//! satisfies a puzzle's solution graph, independent of whether the pieces
//! were placed by touch or detected by a vision pipeline. It performs
//! anchor-relative rigid-transform composition, discrete-rotation and
//! mirror reasoning, tolerance-based geometric equality, and pairwise
//! overlap detection.
//!
//! # Example
//!
//! ```rust
//! use puzzle_fit::{evaluate_authored, GridArrangement};
//!
//! let puzzle = GridArrangement::from_toml_str(r#"
//!     [[elements]]
//!     id = "sq"
//!     shape = "square"
//!     position = { x = 0.0, y = 0.0 }
//! "#).unwrap();
//!
//! let result = evaluate_authored(&puzzle);
//! assert!(result.passed);
//! assert_eq!(result.anchor.as_deref(), Some("sq"));
//! ```

pub mod arrangement;
pub mod pose;
pub mod shapes;
pub mod validation;

pub use arrangement::{
    check_integrity, ArrangementError, ArrangementMeta, ConstraintKind, EdgeOrientation,
    GridArrangement, IntegrityIssue, PlacedElement, RelationConstraint, Tolerances, ValidationMode,
};
pub use pose::{Point, Pose};
pub use shapes::{ChiralityMapping, ShapeGeometry, ShapeLibrary};
pub use validation::{
    AnchorSelector, ArrangementValidator, CompositeValidator, EngineConfig, GeometricValidator,
    LatticeValidator, OverlapReport, Placement, PoseSource, StaticPoseSource, ValidationContext,
    ValidationResult, WinConditionSession,
};

/// Evaluate an arrangement against its own authored positions with the
/// built-in tangram shape library.
///
/// This is the one-shot entry point for authoring tools: a shippable
/// puzzle's authored layout must satisfy its own constraint graph.
pub fn evaluate_authored(arrangement: &GridArrangement) -> ValidationResult {
    let source = StaticPoseSource::from_arrangement(arrangement);
    let mut session = WinConditionSession::new(arrangement.clone(), ShapeLibrary::tangram());
    session.evaluate(&source)
}
