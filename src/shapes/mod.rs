//! Canonical shape geometry for puzzle pieces
//!
//! Each piece type has one [`ShapeGeometry`] in unit space with semantically
//! named corners and edges, so constraints can refer to "the hypotenuse"
//! rather than a vertex index. Mirror-able shapes additionally carry a
//! [`ChiralityMapping`] that translates feature IDs between the canonical
//! and mirrored orientation.

pub mod chirality;
pub mod geometry;
pub mod library;

pub use chirality::ChiralityMapping;
pub use geometry::{BoundingBox, Corner, Edge, ShapeGeometry};
pub use library::ShapeLibrary;
