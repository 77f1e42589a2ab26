//! The geometric constraint validator.
//!
//! For each declared [`RelationConstraint`] the validator resolves both
//! pieces and their anchor-relative placements, transforms shape-local
//! feature points to anchor-relative world coordinates (the piece's own
//! mirror/rotation transform first, then its pose), and checks the rule
//! within the puzzle's tolerances. Any failure to resolve a reference
//! marks that constraint violated; nothing in this path can panic.
//!
//! After the constraint pass, a pairwise overlap sweep compares the
//! axis-aligned bounding boxes of all transformed pieces. This is an
//! explicit approximation: AABB intersection both under- and over-reports
//! for rotated pieces, and is kept for parity with the shipped behavior.

use std::collections::HashSet;

use crate::arrangement::{ConstraintKind, EdgeOrientation, RelationConstraint};
use crate::pose::Point;
use crate::shapes::{BoundingBox, ShapeGeometry};
use crate::validation::result::ValidationResult;
use crate::validation::types::{ArrangementValidator, Placement, ValidationContext};

/// Outcome of checking one constraint.
enum Outcome {
    Satisfied,
    Violated { hint: Option<String> },
}

impl Outcome {
    fn violated() -> Self {
        Outcome::Violated { hint: None }
    }
}

/// The generic geometric rule set: pairwise constraints plus the global
/// overlap sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricValidator;

impl GeometricValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ArrangementValidator for GeometricValidator {
    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::pass();

        for constraint in &ctx.arrangement.constraints {
            let outcome = match constraint.kind {
                ConstraintKind::CornerToCorner => check_corner_to_corner(constraint, ctx),
                ConstraintKind::EdgeToEdge => check_edge_to_edge(constraint, ctx),
            };
            // Unresolvable references read as violated, same as a real miss.
            match outcome.unwrap_or_else(Outcome::violated) {
                Outcome::Satisfied => {}
                Outcome::Violated { hint } => {
                    result.record_violation(&constraint.id);
                    if let Some(hint) = hint {
                        result.add_hint(&constraint.id, hint);
                    }
                }
            }
        }

        detect_overlaps(ctx, &mut result);
        result
    }
}

/// Resolve a piece's shape and anchor-relative placement.
fn resolve<'a>(
    ctx: &'a ValidationContext<'_>,
    piece_id: &str,
) -> Option<(&'a ShapeGeometry, Placement)> {
    let element = ctx.arrangement.element(piece_id)?;
    let placement = ctx.relative.get(piece_id)?;
    let shape = ctx.library.shape(&element.shape)?;
    Some((shape, *placement))
}

/// A corner's position in anchor-relative world coordinates.
fn world_corner(
    ctx: &ValidationContext<'_>,
    shape: &ShapeGeometry,
    placement: &Placement,
    feature: &str,
    mirror_aware: bool,
) -> Option<Point> {
    let feature = if placement.mirrored && mirror_aware {
        ctx.library
            .chirality(&shape.id)
            .map(|map| map.map_corner(feature))
            .unwrap_or(feature)
    } else {
        feature
    };
    let corner = shape.corner(feature)?;
    let step = ctx.arrangement.meta.rotation_step;
    let local =
        shape.transformed_vertex(corner.vertex, placement.rotation_index, placement.mirrored, step)?;
    Some(placement.pose.apply(local))
}

/// An edge's endpoints in anchor-relative world coordinates, keeping the
/// edge's directed sense. Mirroring reverses polygon winding, so a
/// mirrored piece's directed edge runs end → start.
fn world_edge(
    ctx: &ValidationContext<'_>,
    shape: &ShapeGeometry,
    placement: &Placement,
    feature: &str,
    mirror_aware: bool,
) -> Option<(Point, Point)> {
    let feature = if placement.mirrored && mirror_aware {
        ctx.library
            .chirality(&shape.id)
            .map(|map| map.map_edge(feature))
            .unwrap_or(feature)
    } else {
        feature
    };
    let edge = shape.edge(feature)?;
    let step = ctx.arrangement.meta.rotation_step;
    let start =
        shape.transformed_vertex(edge.start, placement.rotation_index, placement.mirrored, step)?;
    let end =
        shape.transformed_vertex(edge.end, placement.rotation_index, placement.mirrored, step)?;
    let (start, end) = if placement.mirrored {
        (end, start)
    } else {
        (start, end)
    };
    Some((placement.pose.apply(start), placement.pose.apply(end)))
}

/// Actual discrete rotation of B relative to A, modulo the step.
fn rotation_delta(a: &Placement, b: &Placement, step: u32) -> Option<u32> {
    if step == 0 {
        return None;
    }
    Some((b.rotation_index % step + step - a.rotation_index % step) % step)
}

fn check_corner_to_corner(
    constraint: &RelationConstraint,
    ctx: &ValidationContext<'_>,
) -> Option<Outcome> {
    let (shape_a, placement_a) = resolve(ctx, &constraint.piece_a)?;
    let (shape_b, placement_b) = resolve(ctx, &constraint.piece_b)?;

    if let Some(required) = constraint.rotation_delta {
        let actual = rotation_delta(&placement_a, &placement_b, ctx.arrangement.meta.rotation_step)?;
        if actual != required {
            return Some(Outcome::violated());
        }
    }

    let point_a = world_corner(ctx, shape_a, &placement_a, &constraint.feature_a, constraint.mirror_aware)?;
    let point_b = world_corner(ctx, shape_b, &placement_b, &constraint.feature_b, constraint.mirror_aware)?;

    let tolerance = ctx.arrangement.meta.tolerances.position;
    let required_gap = constraint.gap.unwrap_or(0.0);
    let distance = point_a.distance_to(point_b);
    let error = (distance - required_gap).abs();

    if error <= tolerance {
        return Some(Outcome::Satisfied);
    }

    let hint = (error <= ctx.config.near_miss_factor * tolerance).then(|| {
        format!(
            "corner '{}' of '{}' is {:.3} from corner '{}' of '{}' (needs {:.3} \u{b1} {:.3})",
            constraint.feature_a,
            constraint.piece_a,
            distance,
            constraint.feature_b,
            constraint.piece_b,
            required_gap,
            tolerance,
        )
    });
    Some(Outcome::Violated { hint })
}

fn check_edge_to_edge(
    constraint: &RelationConstraint,
    ctx: &ValidationContext<'_>,
) -> Option<Outcome> {
    let (shape_a, placement_a) = resolve(ctx, &constraint.piece_a)?;
    let (shape_b, placement_b) = resolve(ctx, &constraint.piece_b)?;

    if let Some(required) = constraint.rotation_delta {
        let actual = rotation_delta(&placement_a, &placement_b, ctx.arrangement.meta.rotation_step)?;
        if actual != required {
            return Some(Outcome::violated());
        }
    }

    let (start_a, end_a) =
        world_edge(ctx, shape_a, &placement_a, &constraint.feature_a, constraint.mirror_aware)?;
    let (start_b, end_b) =
        world_edge(ctx, shape_b, &placement_b, &constraint.feature_b, constraint.mirror_aware)?;

    let direction_a = normalize(end_a.x - start_a.x, end_a.y - start_a.y)?;
    let direction_b = normalize(end_b.x - start_b.x, end_b.y - start_b.y)?;
    let dot = direction_a.0 * direction_b.0 + direction_a.1 * direction_b.1;

    let cos_tolerance = ctx.arrangement.meta.tolerances.angle.cos();
    let aligned = match constraint.orientation {
        Some(EdgeOrientation::SameDirection) => dot >= cos_tolerance,
        Some(EdgeOrientation::OppositeDirection) => dot <= -cos_tolerance,
        // No required orientation: parallel either way.
        None => dot.abs() >= cos_tolerance,
    };
    if !aligned {
        return Some(Outcome::violated());
    }

    let required_gap = constraint.gap.unwrap_or(0.0);
    let midpoint_distance = start_a.midpoint(end_a).distance_to(start_b.midpoint(end_b));
    if (midpoint_distance - required_gap).abs() > ctx.arrangement.meta.tolerances.edge_alignment {
        return Some(Outcome::violated());
    }

    if let Some(required_ratio) = constraint.min_overlap_ratio {
        // Placeholder: the projected-overlap computation is unimplemented,
        // so a fixed estimate stands in for the measured ratio.
        if ctx.config.projected_overlap_estimate < required_ratio {
            return Some(Outcome::violated());
        }
    }

    Some(Outcome::Satisfied)
}

fn normalize(x: f64, y: f64) -> Option<(f64, f64)> {
    let length = (x * x + y * y).sqrt();
    if length <= f64::EPSILON {
        return None;
    }
    Some((x / length, y / length))
}

/// Pairwise AABB overlap sweep over all placed pieces.
///
/// Pairs related by a declared constraint are expected to touch; the sweep
/// guards against overlap among the pairs the constraint graph never
/// mentions.
fn detect_overlaps(ctx: &ValidationContext<'_>, result: &mut ValidationResult) {
    let mut constrained_pairs: HashSet<(&str, &str)> = HashSet::new();
    for constraint in &ctx.arrangement.constraints {
        constrained_pairs.insert(ordered_pair(&constraint.piece_a, &constraint.piece_b));
    }

    let step = ctx.arrangement.meta.rotation_step;
    let boxes: Vec<(&str, BoundingBox)> = ctx
        .arrangement
        .elements
        .iter()
        .filter_map(|element| {
            let placement = ctx.relative.get(&element.id)?;
            let shape = ctx.library.shape(&element.shape)?;
            let world: Vec<Point> = shape
                .transformed_vertices(placement.rotation_index, placement.mirrored, step)
                .into_iter()
                .map(|v| placement.pose.apply(v))
                .collect();
            Some((element.id.as_str(), BoundingBox::of_points(&world)?))
        })
        .collect();

    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            let (id_a, box_a) = &boxes[i];
            let (id_b, box_b) = &boxes[j];
            if constrained_pairs.contains(&ordered_pair(id_a, id_b)) {
                continue;
            }
            let area = box_a.intersection_area(box_b);
            if area > ctx.config.overlap_area_epsilon {
                result.record_overlap(id_a, id_b, area);
            }
        }
    }
}

fn ordered_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
