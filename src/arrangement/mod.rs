//! Puzzle arrangement data model and persisted document format
//!
//! A [`GridArrangement`] is the sole channel between puzzle authoring and
//! runtime validation: the piece list, the pairwise constraint graph, and
//! validation metadata. It is authored once, persisted as TOML, and is
//! read-only input to the validator.

pub mod format;
pub mod integrity;
pub mod types;

pub use format::ArrangementError;
pub use integrity::{check_integrity, IntegrityIssue};
pub use types::{
    ArrangementMeta, ConstraintKind, EdgeOrientation, GridArrangement, PlacedElement,
    RelationConstraint, Tolerances, ValidationMode,
};
