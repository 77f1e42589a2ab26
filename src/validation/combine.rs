//! Running several rule sets over one arrangement.

use crate::validation::result::ValidationResult;
use crate::validation::types::{ArrangementValidator, ValidationContext};

/// Runs each validator over the same context and merges their verdicts:
/// violated-constraint and overlap lists union, near-miss hints merge with
/// first writer winning, and the overall result passes only when every
/// sub-validator passes.
///
/// This lets a puzzle-type-specific rule set compose with the generic
/// geometric one without either knowing about the other.
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn ArrangementValidator>>,
}

impl CompositeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, validator: Box<dyn ArrangementValidator>) -> Self {
        self.validators.push(validator);
        self
    }
}

impl ArrangementValidator for CompositeValidator {
    fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationResult {
        let mut merged = ValidationResult::pass();
        for validator in &self.validators {
            merged.merge(validator.validate(ctx));
        }
        merged
    }
}
