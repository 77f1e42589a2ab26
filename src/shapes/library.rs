//! Shape arena keyed by string ID, with the built-in tangram set.

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

use crate::pose::Point;
use crate::shapes::chirality::ChiralityMapping;
use crate::shapes::geometry::{corner, edge, id_map, ShapeGeometry};

const THREE_QUARTER_PI: f64 = 3.0 * FRAC_PI_4;

/// ID -> shape lookup table, plus per-shape chirality mappings.
///
/// Shapes are immutable values resolved by ID; pieces and constraints
/// reference them by name, never by pointer.
#[derive(Debug, Clone, Default)]
pub struct ShapeLibrary {
    shapes: HashMap<String, ShapeGeometry>,
    chirality: HashMap<String, ChiralityMapping>,
}

impl ShapeLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard tangram shape set: three right-isosceles triangle sizes,
    /// the unit square, and the parallelogram (the chiral piece).
    pub fn tangram() -> Self {
        let mut lib = Self::new();
        lib.insert_shape(right_triangle("triangle-small", 1.0));
        lib.insert_shape(right_triangle("triangle-medium", SQRT_2));
        lib.insert_shape(right_triangle("triangle-large", 2.0));
        lib.insert_shape(unit_square());
        lib.insert_shape(parallelogram());

        for id in ["triangle-small", "triangle-medium", "triangle-large"] {
            lib.insert_chirality(ChiralityMapping {
                shape_id: id.to_string(),
                corners: id_map(&[("east", "north"), ("north", "east")]),
                edges: id_map(&[("base", "rise"), ("rise", "base")]),
            });
        }
        lib.insert_chirality(ChiralityMapping {
            shape_id: "parallelogram".to_string(),
            corners: id_map(&[("sw", "se"), ("se", "sw"), ("ne", "nw"), ("nw", "ne")]),
            edges: id_map(&[("slant-east", "slant-west"), ("slant-west", "slant-east")]),
        });
        lib
    }

    pub fn insert_shape(&mut self, shape: ShapeGeometry) {
        self.shapes.insert(shape.id.clone(), shape);
    }

    pub fn insert_chirality(&mut self, mapping: ChiralityMapping) {
        self.chirality.insert(mapping.shape_id.clone(), mapping);
    }

    pub fn shape(&self, id: &str) -> Option<&ShapeGeometry> {
        self.shapes.get(id)
    }

    /// The chirality mapping for a shape, if it is mirror-able.
    pub fn chirality(&self, shape_id: &str) -> Option<&ChiralityMapping> {
        self.chirality.get(shape_id)
    }

    pub fn shape_ids(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }
}

/// Right isosceles triangle with legs of length `leg`, right angle at the
/// origin, legs along +x ("base") and +y ("rise").
fn right_triangle(id: &str, leg: f64) -> ShapeGeometry {
    let vertices = vec![
        Point::new(0.0, 0.0),
        Point::new(leg, 0.0),
        Point::new(0.0, leg),
    ];
    ShapeGeometry {
        id: id.to_string(),
        corners: vec![
            corner("right-angle", 0, FRAC_PI_2),
            corner("east", 1, FRAC_PI_4),
            corner("north", 2, FRAC_PI_4),
        ],
        edges: vec![
            edge("base", 0, 1, &vertices),
            edge("hypotenuse", 1, 2, &vertices),
            edge("rise", 2, 0, &vertices),
        ],
        vertices,
    }
}

fn unit_square() -> ShapeGeometry {
    let vertices = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ];
    ShapeGeometry {
        id: "square".to_string(),
        corners: vec![
            corner("sw", 0, FRAC_PI_2),
            corner("se", 1, FRAC_PI_2),
            corner("ne", 2, FRAC_PI_2),
            corner("nw", 3, FRAC_PI_2),
        ],
        edges: vec![
            edge("south", 0, 1, &vertices),
            edge("east", 1, 2, &vertices),
            edge("north", 2, 3, &vertices),
            edge("west", 3, 0, &vertices),
        ],
        vertices,
    }
}

/// Tangram parallelogram: long sides of length 1, slanted sides at 45
/// degrees. The only tangram piece whose mirror image is not a rotation.
fn parallelogram() -> ShapeGeometry {
    let vertices = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.5, 0.5),
        Point::new(0.5, 0.5),
    ];
    ShapeGeometry {
        id: "parallelogram".to_string(),
        corners: vec![
            corner("sw", 0, FRAC_PI_4),
            corner("se", 1, THREE_QUARTER_PI),
            corner("ne", 2, FRAC_PI_4),
            corner("nw", 3, THREE_QUARTER_PI),
        ],
        edges: vec![
            edge("south", 0, 1, &vertices),
            edge("slant-east", 1, 2, &vertices),
            edge("north", 2, 3, &vertices),
            edge("slant-west", 3, 0, &vertices),
        ],
        vertices,
    }
}
