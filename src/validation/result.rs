//! Evaluation output.

use std::collections::HashMap;
use std::fmt::Write as _;

/// A pair of pieces whose bounding boxes intersect.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapReport {
    pub piece_a: String,
    pub piece_b: String,
    /// AABB intersection area in unit².
    pub area: f64,
}

/// The outcome of one `evaluate()` call. Recomputed fresh every time,
/// never mutated in place by callers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    /// True when no constraint is violated and no pieces overlap.
    pub passed: bool,
    /// IDs of violated constraints, in constraint-graph order.
    pub violated: Vec<String>,
    pub overlaps: Vec<OverlapReport>,
    /// Near-miss hints keyed by constraint ID.
    pub hints: HashMap<String, String>,
    /// The piece chosen as the coordinate origin, if any piece was placed.
    pub anchor: Option<String>,
    /// Discrete rotation of the whole solved arrangement relative to
    /// canonical. Currently a constant stub in freeform mode.
    pub global_rotation_index: Option<u32>,
}

impl ValidationResult {
    /// A passing result with nothing recorded.
    pub fn pass() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    pub fn record_violation(&mut self, constraint_id: &str) {
        self.violated.push(constraint_id.to_string());
        self.passed = false;
    }

    pub fn record_overlap(&mut self, piece_a: &str, piece_b: &str, area: f64) {
        self.overlaps.push(OverlapReport {
            piece_a: piece_a.to_string(),
            piece_b: piece_b.to_string(),
            area,
        });
        self.passed = false;
    }

    /// Attach a near-miss hint. First writer wins on key collision.
    pub fn add_hint(&mut self, constraint_id: &str, hint: String) {
        self.hints
            .entry(constraint_id.to_string())
            .or_insert(hint);
    }

    /// Fold another validator's verdict into this one: lists union,
    /// first writer wins on hint keys, `passed` requires both to pass.
    pub fn merge(&mut self, other: ValidationResult) {
        self.passed = self.passed && other.passed;
        self.violated.extend(other.violated);
        self.overlaps.extend(other.overlaps);
        for (key, hint) in other.hints {
            self.hints.entry(key).or_insert(hint);
        }
        if self.anchor.is_none() {
            self.anchor = other.anchor;
        }
        if self.global_rotation_index.is_none() {
            self.global_rotation_index = other.global_rotation_index;
        }
    }

    /// Plain-text report, used by the authoring CLI.
    pub fn report(&self, puzzle_name: Option<&str>) -> String {
        let mut out = String::new();
        let name = puzzle_name.unwrap_or("puzzle");
        let status = if self.passed { "solved" } else { "not solved" };
        let _ = writeln!(out, "{}: {}", name, status);
        let _ = writeln!(
            out,
            "anchor: {}",
            self.anchor.as_deref().unwrap_or("(none)")
        );
        if !self.violated.is_empty() {
            let _ = writeln!(out, "violated constraints ({}):", self.violated.len());
            for id in &self.violated {
                let _ = writeln!(out, "  - {}", id);
            }
        }
        if !self.overlaps.is_empty() {
            let _ = writeln!(out, "overlaps ({}):", self.overlaps.len());
            for o in &self.overlaps {
                let _ = writeln!(out, "  - {} / {} (area {:.3})", o.piece_a, o.piece_b, o.area);
            }
        }
        if !self.hints.is_empty() {
            let mut keys: Vec<_> = self.hints.keys().collect();
            keys.sort();
            let _ = writeln!(out, "hints:");
            for key in keys {
                let _ = writeln!(out, "  - {}: {}", key, self.hints[key]);
            }
        }
        out
    }
}
