//! Per-piece-type polygon geometry in unit space.
//!
//! ## Mirror-then-rotate
//!
//! [`ShapeGeometry::transformed_vertices`] mirrors about the Y axis FIRST,
//! then rotates by `rotation_index × (2π / rotation_step)`. The order is
//! significant for asymmetric shapes: mirroring after rotating yields a
//! different polygon. Mirroring also reverses the polygon winding, which is
//! why directed edges of mirrored pieces swap endpoints (handled by the
//! validator, not here).

use std::collections::HashMap;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::pose::Point;

/// A semantically named corner of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Corner {
    /// Feature ID, unique within the shape (e.g. `"right-angle"`).
    pub id: String,
    /// Index into the shape's vertex list.
    pub vertex: usize,
    /// Interior angle at this corner, in radians.
    pub interior_angle: f64,
}

/// A semantically named directed edge of a shape, running start → end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Edge {
    /// Feature ID, unique within the shape (e.g. `"hypotenuse"`).
    pub id: String,
    /// Start vertex index.
    pub start: usize,
    /// End vertex index.
    pub end: usize,
    /// Edge length in unit space.
    pub length: f64,
}

/// Canonical geometry for one piece type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShapeGeometry {
    pub id: String,
    /// Polygon vertices in unit space, counter-clockwise winding.
    pub vertices: Vec<Point>,
    pub corners: Vec<Corner>,
    pub edges: Vec<Edge>,
}

impl ShapeGeometry {
    /// Look up a corner by feature ID.
    pub fn corner(&self, id: &str) -> Option<&Corner> {
        self.corners.iter().find(|c| c.id == id)
    }

    /// Look up an edge by feature ID.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Rotation angle in radians for a discrete rotation index.
    pub fn index_angle(rotation_index: u32, rotation_step: u32) -> f64 {
        if rotation_step == 0 {
            return 0.0;
        }
        TAU * f64::from(rotation_index) / f64::from(rotation_step)
    }

    /// All vertices after applying the piece's own mirror and discrete
    /// rotation: mirror about the Y axis first, then rotate.
    pub fn transformed_vertices(
        &self,
        rotation_index: u32,
        mirrored: bool,
        rotation_step: u32,
    ) -> Vec<Point> {
        let angle = Self::index_angle(rotation_index, rotation_step);
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        self.vertices
            .iter()
            .map(|v| {
                let x = if mirrored { -v.x } else { v.x };
                let y = v.y;
                Point {
                    x: x * cos_a - y * sin_a,
                    y: x * sin_a + y * cos_a,
                }
            })
            .collect()
    }

    /// One vertex after the piece's own mirror/rotation transform.
    pub fn transformed_vertex(
        &self,
        index: usize,
        rotation_index: u32,
        mirrored: bool,
        rotation_step: u32,
    ) -> Option<Point> {
        let v = self.vertices.get(index)?;
        let angle = Self::index_angle(rotation_index, rotation_step);
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let x = if mirrored { -v.x } else { v.x };
        Some(Point {
            x: x * cos_a - v.y * sin_a,
            y: x * sin_a + v.y * cos_a,
        })
    }
}

/// Axis-aligned bounding box of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounding box of a non-empty point set. Returns `None` for an empty set.
    pub fn of_points(points: &[Point]) -> Option<BoundingBox> {
        let first = points.first()?;
        let mut bb = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            bb.min_x = bb.min_x.min(p.x);
            bb.min_y = bb.min_y.min(p.y);
            bb.max_x = bb.max_x.max(p.x);
            bb.max_y = bb.max_y.max(p.y);
        }
        Some(bb)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Area of the intersection with another box, 0.0 when disjoint.
    pub fn intersection_area(&self, other: &BoundingBox) -> f64 {
        let w = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let h = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if w > 0.0 && h > 0.0 {
            w * h
        } else {
            0.0
        }
    }
}

/// Helper for building shapes: derives edge lengths from vertices.
pub(crate) fn edge(id: &str, start: usize, end: usize, vertices: &[Point]) -> Edge {
    let length = vertices[start].distance_to(vertices[end]);
    Edge {
        id: id.to_string(),
        start,
        end,
        length,
    }
}

/// Helper for building shapes.
pub(crate) fn corner(id: &str, vertex: usize, interior_angle: f64) -> Corner {
    Corner {
        id: id.to_string(),
        vertex,
        interior_angle,
    }
}

/// Helper for building chirality maps from `(from, to)` pairs.
pub(crate) fn id_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::library::ShapeLibrary;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_index_angle() {
        assert!(approx(ShapeGeometry::index_angle(0, 8), 0.0));
        assert!(approx(ShapeGeometry::index_angle(2, 8), std::f64::consts::FRAC_PI_2));
        assert!(approx(ShapeGeometry::index_angle(4, 8), std::f64::consts::PI));
    }

    #[test]
    fn test_transformed_vertices_identity() {
        let lib = ShapeLibrary::tangram();
        let tri = lib.shape("triangle-small").unwrap();
        let verts = tri.transformed_vertices(0, false, 8);
        assert_eq!(verts, tri.vertices);
    }

    #[test]
    fn test_mirror_flips_x() {
        let lib = ShapeLibrary::tangram();
        let tri = lib.shape("triangle-small").unwrap();
        let verts = tri.transformed_vertices(0, true, 8);
        for (m, v) in verts.iter().zip(&tri.vertices) {
            assert!(approx(m.x, -v.x));
            assert!(approx(m.y, v.y));
        }
    }

    #[test]
    fn test_mirror_before_rotate_order_matters() {
        // For an asymmetric shape, mirror-then-rotate differs from
        // rotate-then-mirror. Compare against a manually computed point.
        let lib = ShapeLibrary::tangram();
        let tri = lib.shape("triangle-small").unwrap();
        // Vertex (1, 0): mirror -> (-1, 0); rotate 90 degrees CCW -> (0, -1).
        let verts = tri.transformed_vertices(2, true, 8);
        assert!(approx(verts[1].x, 0.0), "x: got {}", verts[1].x);
        assert!(approx(verts[1].y, -1.0), "y: got {}", verts[1].y);
        // Rotate-then-mirror would have produced (0, 1).
    }

    #[test]
    fn test_bounding_box_of_points() {
        let points = [
            Point::new(1.0, -2.0),
            Point::new(-1.0, 4.0),
            Point::new(0.5, 0.0),
        ];
        let bb = BoundingBox::of_points(&points).unwrap();
        assert_eq!(bb.min_x, -1.0);
        assert_eq!(bb.max_x, 1.0);
        assert_eq!(bb.min_y, -2.0);
        assert_eq!(bb.max_y, 4.0);
        assert!(BoundingBox::of_points(&[]).is_none());
    }

    #[test]
    fn test_intersection_area() {
        let a = BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 2.0,
            max_y: 2.0,
        };
        let b = BoundingBox {
            min_x: 1.0,
            min_y: 1.0,
            max_x: 3.0,
            max_y: 3.0,
        };
        let c = BoundingBox {
            min_x: 5.0,
            min_y: 5.0,
            max_x: 6.0,
            max_y: 6.0,
        };
        assert!(approx(a.intersection_area(&b), 1.0));
        assert!(approx(b.intersection_area(&a), 1.0));
        assert_eq!(a.intersection_area(&c), 0.0);
    }
}
