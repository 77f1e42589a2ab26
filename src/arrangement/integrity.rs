//! Authoring-side referential integrity checks.
//!
//! The runtime validator treats malformed references as "constraint
//! violated" and never faults, so catching bad puzzle data is the
//! authoring tool's job. This module is that check: it resolves every
//! reference in a [`GridArrangement`] against the shape library and
//! reports what does not hold up.

use std::collections::HashSet;

use thiserror::Error;

use crate::arrangement::types::{ConstraintKind, GridArrangement, RelationConstraint};
use crate::shapes::{ShapeGeometry, ShapeLibrary};

/// One problem found in a puzzle document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrityIssue {
    #[error("duplicate element id '{id}'")]
    DuplicateElement { id: String },

    #[error("duplicate constraint id '{id}'")]
    DuplicateConstraint { id: String },

    #[error("element '{element}' references unknown shape '{shape}'{}", format_suggestions(.suggestions))]
    UnknownShape {
        element: String,
        shape: String,
        suggestions: Vec<String>,
    },

    #[error("element '{element}' rotation index {index} out of range [0, {step})")]
    RotationIndexOutOfRange {
        element: String,
        index: u32,
        step: u32,
    },

    #[error("constraint '{constraint}' references unknown piece '{piece}'{}", format_suggestions(.suggestions))]
    UnknownPiece {
        constraint: String,
        piece: String,
        suggestions: Vec<String>,
    },

    #[error("constraint '{constraint}' relates piece '{piece}' to itself")]
    SelfReference { constraint: String, piece: String },

    #[error("constraint '{constraint}' references unknown {kind} '{feature}' on shape '{shape}'{}", format_suggestions(.suggestions))]
    UnknownFeature {
        constraint: String,
        shape: String,
        kind: &'static str,
        feature: String,
        suggestions: Vec<String>,
    },

    #[error("constraint '{constraint}' sets {field}, which only applies to edge-to-edge constraints")]
    EdgeFieldOnCornerConstraint {
        constraint: String,
        field: &'static str,
    },

    #[error("constraint '{constraint}' has invalid {field}: {reason}")]
    InvalidValue {
        constraint: String,
        field: &'static str,
        reason: String,
    },

    #[error("metadata: {reason}")]
    InvalidMeta { reason: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Validate every reference and numeric bound in an arrangement.
///
/// An empty result means the document is shippable.
pub fn check_integrity(
    arrangement: &GridArrangement,
    library: &ShapeLibrary,
) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    let step = arrangement.meta.rotation_step;

    if step == 0 {
        issues.push(IntegrityIssue::InvalidMeta {
            reason: "rotation step must be at least 1".to_string(),
        });
    }
    let t = &arrangement.meta.tolerances;
    for (name, value) in [
        ("position", t.position),
        ("angle", t.angle),
        ("edge-alignment", t.edge_alignment),
    ] {
        if value < 0.0 {
            issues.push(IntegrityIssue::InvalidMeta {
                reason: format!("{} tolerance must be non-negative, got {}", name, value),
            });
        }
    }
    for &index in &arrangement.meta.allowed_global_rotations {
        if step > 0 && index >= step {
            issues.push(IntegrityIssue::InvalidMeta {
                reason: format!(
                    "allowed global rotation {} out of range [0, {})",
                    index, step
                ),
            });
        }
    }

    let shape_ids: Vec<String> = library.shape_ids().map(str::to_string).collect();
    let mut seen_elements = HashSet::new();
    for element in &arrangement.elements {
        if !seen_elements.insert(element.id.as_str()) {
            issues.push(IntegrityIssue::DuplicateElement {
                id: element.id.clone(),
            });
        }
        if library.shape(&element.shape).is_none() {
            issues.push(IntegrityIssue::UnknownShape {
                element: element.id.clone(),
                shape: element.shape.clone(),
                suggestions: find_similar(&shape_ids, &element.shape, 2),
            });
        }
        if step > 0 && element.rotation_index >= step {
            issues.push(IntegrityIssue::RotationIndexOutOfRange {
                element: element.id.clone(),
                index: element.rotation_index,
                step,
            });
        }
    }

    let element_ids: Vec<String> = arrangement.elements.iter().map(|e| e.id.clone()).collect();
    let mut seen_constraints = HashSet::new();
    for constraint in &arrangement.constraints {
        if !seen_constraints.insert(constraint.id.as_str()) {
            issues.push(IntegrityIssue::DuplicateConstraint {
                id: constraint.id.clone(),
            });
        }
        check_constraint(constraint, arrangement, library, &element_ids, step, &mut issues);
    }

    issues
}

fn check_constraint(
    constraint: &RelationConstraint,
    arrangement: &GridArrangement,
    library: &ShapeLibrary,
    element_ids: &[String],
    step: u32,
    issues: &mut Vec<IntegrityIssue>,
) {
    if constraint.piece_a == constraint.piece_b {
        issues.push(IntegrityIssue::SelfReference {
            constraint: constraint.id.clone(),
            piece: constraint.piece_a.clone(),
        });
    }

    for (piece, feature) in [
        (&constraint.piece_a, &constraint.feature_a),
        (&constraint.piece_b, &constraint.feature_b),
    ] {
        let Some(element) = arrangement.element(piece) else {
            issues.push(IntegrityIssue::UnknownPiece {
                constraint: constraint.id.clone(),
                piece: piece.clone(),
                suggestions: find_similar(element_ids, piece, 2),
            });
            continue;
        };
        let Some(shape) = library.shape(&element.shape) else {
            // Already reported as UnknownShape on the element.
            continue;
        };
        check_feature(constraint, shape, element.mirrored, feature, library, issues);
    }

    if constraint.kind == ConstraintKind::CornerToCorner {
        if constraint.orientation.is_some() {
            issues.push(IntegrityIssue::EdgeFieldOnCornerConstraint {
                constraint: constraint.id.clone(),
                field: "orientation",
            });
        }
        if constraint.min_overlap_ratio.is_some() {
            issues.push(IntegrityIssue::EdgeFieldOnCornerConstraint {
                constraint: constraint.id.clone(),
                field: "min-overlap-ratio",
            });
        }
    }

    if let Some(gap) = constraint.gap {
        if gap < 0.0 {
            issues.push(IntegrityIssue::InvalidValue {
                constraint: constraint.id.clone(),
                field: "gap",
                reason: format!("must be non-negative, got {}", gap),
            });
        }
    }
    if let Some(ratio) = constraint.min_overlap_ratio {
        if !(0.0..=1.0).contains(&ratio) {
            issues.push(IntegrityIssue::InvalidValue {
                constraint: constraint.id.clone(),
                field: "min-overlap-ratio",
                reason: format!("must be within [0, 1], got {}", ratio),
            });
        }
    }
    if let Some(delta) = constraint.rotation_delta {
        if step > 0 && delta >= step {
            issues.push(IntegrityIssue::InvalidValue {
                constraint: constraint.id.clone(),
                field: "rotation-delta",
                reason: format!("must be within [0, {}), got {}", step, delta),
            });
        }
    }
}

fn check_feature(
    constraint: &RelationConstraint,
    shape: &ShapeGeometry,
    mirrored: bool,
    feature: &str,
    library: &ShapeLibrary,
    issues: &mut Vec<IntegrityIssue>,
) {
    // Resolve the ID the same way the validator will at runtime.
    let chirality = library.chirality(&shape.id);
    let effective = if mirrored && constraint.mirror_aware {
        match (constraint.kind, chirality) {
            (ConstraintKind::CornerToCorner, Some(map)) => map.map_corner(feature),
            (ConstraintKind::EdgeToEdge, Some(map)) => map.map_edge(feature),
            (_, None) => feature,
        }
    } else {
        feature
    };

    let (found, kind, candidates) = match constraint.kind {
        ConstraintKind::CornerToCorner => (
            shape.corner(effective).is_some(),
            "corner",
            shape.corners.iter().map(|c| c.id.clone()).collect::<Vec<_>>(),
        ),
        ConstraintKind::EdgeToEdge => (
            shape.edge(effective).is_some(),
            "edge",
            shape.edges.iter().map(|e| e.id.clone()).collect::<Vec<_>>(),
        ),
    };
    if !found {
        issues.push(IntegrityIssue::UnknownFeature {
            constraint: constraint.id.clone(),
            shape: shape.id.clone(),
            kind,
            feature: effective.to_string(),
            suggestions: find_similar(&candidates, effective, 2),
        });
    }
}

/// Compute Levenshtein edit distance between two strings.
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (m, n) = (a_chars.len(), b_chars.len());
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];
    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Find known IDs within a maximum edit distance of the target.
fn find_similar(known: &[String], target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(String, usize)> = known
        .iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist > 0 && dist <= max_distance).then(|| (name.clone(), dist))
        })
        .collect();
    candidates.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    candidates.into_iter().map(|(name, _)| name).take(3).collect()
}
