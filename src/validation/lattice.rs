//! Grid-indexed rule set for lattice-mode puzzles.
//!
//! Unlike freeform validation, lattice mode cares about absolute cell
//! coordinates: each piece must sit on the cell its authored position
//! names, and no two pieces may claim the same cell. This rule set
//! composes with the geometric validator through the
//! [`CompositeValidator`](crate::validation::CompositeValidator).

use std::collections::HashMap;

use crate::validation::result::ValidationResult;
use crate::validation::types::{ArrangementValidator, ValidationContext};

/// Area reported for two pieces claiming the same cell.
const CELL_AREA: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct LatticeValidator;

impl LatticeValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ArrangementValidator for LatticeValidator {
    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut result = ValidationResult::pass();
        let tolerance = ctx.arrangement.meta.tolerances.position;

        // Cell occupancy, in element order for determinism.
        let mut occupied: HashMap<(i64, i64), &str> = HashMap::new();

        for element in &ctx.arrangement.elements {
            // Lattice checks use world poses; a missing piece violates
            // its placement rule like any other miss.
            let Some(placement) = ctx.world.get(&element.id) else {
                result.record_violation(&lattice_rule_id(&element.id));
                continue;
            };

            let dx = placement.pose.x - element.position.x;
            let dy = placement.pose.y - element.position.y;
            if dx.abs() > tolerance || dy.abs() > tolerance {
                result.record_violation(&lattice_rule_id(&element.id));
            }
            if placement.rotation_index != element.rotation_index
                || placement.mirrored != element.mirrored
            {
                result.record_violation(&lattice_rule_id(&element.id));
            }

            let cell = (
                placement.pose.x.round() as i64,
                placement.pose.y.round() as i64,
            );
            if let Some(other) = occupied.get(&cell) {
                result.record_overlap(other, &element.id, CELL_AREA);
            } else {
                occupied.insert(cell, &element.id);
            }
        }

        result
    }
}

/// Violations are keyed per element, not per declared constraint, since
/// lattice rules are implicit in the arrangement itself.
fn lattice_rule_id(element_id: &str) -> String {
    format!("lattice:{}", element_id)
}
