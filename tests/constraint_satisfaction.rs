//! Integration tests verifying that declared constraints are judged
//! correctly from placement snapshots: exact satisfaction, tolerance
//! boundaries, discrete rotation deltas, and the silent-failure posture
//! for malformed references.

use std::collections::HashMap;

use puzzle_fit::{
    ConstraintKind, EdgeOrientation, EngineConfig, GridArrangement, PlacedElement, Placement,
    Point, Pose, RelationConstraint, ShapeLibrary, StaticPoseSource, ValidationResult,
    WinConditionSession,
};

fn element(id: &str, shape: &str, x: f64, y: f64) -> PlacedElement {
    PlacedElement {
        id: id.to_string(),
        shape: shape.to_string(),
        rotation_index: 0,
        mirrored: false,
        position: Point::new(x, y),
    }
}

fn corner_constraint(id: &str, a: &str, fa: &str, b: &str, fb: &str) -> RelationConstraint {
    RelationConstraint {
        id: id.to_string(),
        piece_a: a.to_string(),
        piece_b: b.to_string(),
        kind: ConstraintKind::CornerToCorner,
        feature_a: fa.to_string(),
        feature_b: fb.to_string(),
        gap: None,
        rotation_delta: None,
        orientation: None,
        min_overlap_ratio: None,
        mirror_aware: false,
    }
}

fn at(x: f64, y: f64) -> Placement {
    Placement::new(Pose::new(x, y, 0.0), 0, false)
}

fn evaluate(
    arrangement: &GridArrangement,
    placements: HashMap<String, Placement>,
) -> ValidationResult {
    let mut session = WinConditionSession::new(arrangement.clone(), ShapeLibrary::tangram());
    session.evaluate(&StaticPoseSource::new(placements))
}

/// Two unit squares sharing the edge x = 1, tied corner-to-corner.
fn side_by_side_squares() -> GridArrangement {
    GridArrangement {
        elements: vec![
            element("a", "square", 0.0, 0.0),
            element("b", "square", 1.0, 0.0),
        ],
        constraints: vec![corner_constraint("touch", "a", "se", "b", "sw")],
        ..Default::default()
    }
}

#[test]
fn test_corner_coincidence_exact() {
    let arrangement = side_by_side_squares();
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.0, 0.0)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert!(result.passed, "expected pass, got {:?}", result);
}

#[test]
fn test_corner_within_tolerance_passes() {
    // Default position tolerance is 0.05; a 0.03 miss is inside it.
    let arrangement = side_by_side_squares();
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.03, 0.0)),
    ]);
    assert!(evaluate(&arrangement, placements).passed);
}

#[test]
fn test_corner_beyond_tolerance_fails() {
    let arrangement = side_by_side_squares();
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.2, 0.0)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert!(!result.passed);
    assert_eq!(result.violated, vec!["touch".to_string()]);
    // 0.2 is beyond 3x tolerance: no near-miss hint.
    assert!(result.hints.is_empty());
}

#[test]
fn test_near_miss_hint_attached() {
    // A 0.1 miss fails the 0.05 tolerance but is within 3x of passing.
    let arrangement = side_by_side_squares();
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.1, 0.0)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert!(!result.passed);
    let hint = result.hints.get("touch").expect("near-miss hint expected");
    assert!(hint.contains("0.100"), "hint: {}", hint);
    assert!(hint.contains("needs 0.000"), "hint: {}", hint);
}

#[test]
fn test_declared_gap_matched() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0].gap = Some(0.5);
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.5, 0.0)),
    ]);
    assert!(evaluate(&arrangement, placements).passed);
}

#[test]
fn test_rotation_delta_satisfied() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0].gap = Some(1.0);
    arrangement.constraints[0].rotation_delta = Some(2);
    // b rotated two steps (90 degrees); its sw corner stays at its pose
    // origin, one unit from a's se corner.
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), Placement::new(Pose::new(2.0, 0.0, 0.0), 2, false)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert!(result.passed, "expected pass, got {:?}", result);
}

#[test]
fn test_rotation_delta_wrong_fails() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0].gap = Some(1.0);
    arrangement.constraints[0].rotation_delta = Some(2);
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), Placement::new(Pose::new(2.0, 0.0, 0.0), 3, false)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert_eq!(result.violated, vec!["touch".to_string()]);
}

#[test]
fn test_rotation_delta_wraps_modulo_step() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0].rotation_delta = Some(2);
    // Indices 7 and 1: (1 + 8 - 7) mod 8 = 2.
    // Both squares rotated the same amounts around their own origins;
    // place them so the constrained corners still coincide.
    let a = Placement::new(Pose::new(0.0, 0.0, 0.0), 7, false);
    let b = Placement::new(Pose::new(0.0, 0.0, 0.0), 1, false);
    let library = ShapeLibrary::tangram();
    let square = library.shape("square").unwrap();
    let se = square.corner("se").unwrap();
    let a_corner = square.transformed_vertex(se.vertex, 7, false, 8).unwrap();
    let sw = square.corner("sw").unwrap();
    let b_corner = square.transformed_vertex(sw.vertex, 1, false, 8).unwrap();
    // Shift b so the corners coincide exactly.
    let b = Placement::new(
        Pose::new(b.pose.x + a_corner.x - b_corner.x, b.pose.y + a_corner.y - b_corner.y, 0.0),
        1,
        false,
    );
    let placements = HashMap::from([("a".to_string(), a), ("b".to_string(), b)]);
    let result = evaluate(&arrangement, placements);
    assert!(result.passed, "expected pass, got {:?}", result);
}

#[test]
fn test_edge_opposite_direction_satisfied() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0] = RelationConstraint {
        kind: ConstraintKind::EdgeToEdge,
        feature_a: "east".to_string(),
        feature_b: "west".to_string(),
        orientation: Some(EdgeOrientation::OppositeDirection),
        ..corner_constraint("seam", "a", "", "b", "")
    };
    // a's east edge runs up at x = 1; b's west edge runs down at x = 1.
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.0, 0.0)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert!(result.passed, "expected pass, got {:?}", result);
}

#[test]
fn test_edge_same_direction_rejects_antiparallel() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0] = RelationConstraint {
        kind: ConstraintKind::EdgeToEdge,
        feature_a: "east".to_string(),
        feature_b: "west".to_string(),
        orientation: Some(EdgeOrientation::SameDirection),
        ..corner_constraint("seam", "a", "", "b", "")
    };
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.0, 0.0)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert_eq!(result.violated, vec!["seam".to_string()]);
}

#[test]
fn test_edge_midpoint_gap_enforced() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0] = RelationConstraint {
        kind: ConstraintKind::EdgeToEdge,
        feature_a: "east".to_string(),
        feature_b: "west".to_string(),
        orientation: Some(EdgeOrientation::OppositeDirection),
        ..corner_constraint("seam", "a", "", "b", "")
    };
    // Edges stay antiparallel but slide apart vertically.
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.0, 0.5)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert_eq!(result.violated, vec!["seam".to_string()]);
}

#[test]
fn test_min_overlap_ratio_placeholder_accepts_full_range() {
    // The projected-overlap computation is a placeholder fixed at 1.0,
    // so any ratio up to 1.0 is currently accepted.
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0] = RelationConstraint {
        kind: ConstraintKind::EdgeToEdge,
        feature_a: "east".to_string(),
        feature_b: "west".to_string(),
        orientation: Some(EdgeOrientation::OppositeDirection),
        min_overlap_ratio: Some(0.8),
        ..corner_constraint("seam", "a", "", "b", "")
    };
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.0, 0.0)),
    ]);
    assert!(evaluate(&arrangement, placements).passed);
}

#[test]
fn test_lowered_overlap_estimate_fails_min_ratio() {
    // Lowering the placeholder estimate below the requested ratio makes
    // the min-overlap check bite.
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0] = RelationConstraint {
        kind: ConstraintKind::EdgeToEdge,
        feature_a: "east".to_string(),
        feature_b: "west".to_string(),
        orientation: Some(EdgeOrientation::OppositeDirection),
        min_overlap_ratio: Some(0.8),
        ..corner_constraint("seam", "a", "", "b", "")
    };
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.0, 0.0)),
    ]);
    let mut session = WinConditionSession::new(arrangement, ShapeLibrary::tangram())
        .with_config(EngineConfig::new().with_projected_overlap_estimate(0.5));
    let result = session.evaluate(&StaticPoseSource::new(placements));
    assert_eq!(result.violated, vec!["seam".to_string()]);
}

#[test]
fn test_unknown_piece_reference_is_violated_not_fatal() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0].piece_b = "ghost".to_string();
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.0, 0.0)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert!(!result.passed);
    assert_eq!(result.violated, vec!["touch".to_string()]);
}

#[test]
fn test_unknown_feature_reference_is_violated_not_fatal() {
    let mut arrangement = side_by_side_squares();
    arrangement.constraints[0].feature_a = "hypotenuse".to_string();
    let placements = HashMap::from([
        ("a".to_string(), at(0.0, 0.0)),
        ("b".to_string(), at(1.0, 0.0)),
    ]);
    let result = evaluate(&arrangement, placements);
    assert_eq!(result.violated, vec!["touch".to_string()]);
}

#[test]
fn test_unplaced_piece_violates_its_constraints() {
    let arrangement = side_by_side_squares();
    let placements = HashMap::from([("a".to_string(), at(0.0, 0.0))]);
    let result = evaluate(&arrangement, placements);
    assert_eq!(result.violated, vec!["touch".to_string()]);
}
