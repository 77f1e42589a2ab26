//! Constraint validation and win-condition evaluation
//!
//! The pipeline is: pose source → anchor selection → constraint
//! validation, wired together by [`WinConditionSession::evaluate`]. Every
//! call recomputes a fresh [`ValidationResult`]; the only cross-call state
//! is the anchor selector's sticky first-placed memory, which is scoped to
//! the session.

pub mod anchor;
pub mod combine;
pub mod config;
pub mod engine;
pub mod lattice;
pub mod result;
pub mod session;
pub mod types;

pub use anchor::AnchorSelector;
pub use combine::CompositeValidator;
pub use config::EngineConfig;
pub use engine::GeometricValidator;
pub use lattice::LatticeValidator;
pub use result::{OverlapReport, ValidationResult};
pub use session::{PoseSource, StaticPoseSource, WinConditionSession};
pub use types::{ArrangementValidator, Placement, ValidationContext};
