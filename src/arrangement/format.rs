//! Loading and saving the puzzle document (TOML).

use std::path::Path;

use thiserror::Error;

use crate::arrangement::types::GridArrangement;

/// Errors that can occur when loading or saving a puzzle document.
#[derive(Error, Debug)]
pub enum ArrangementError {
    #[error("failed to read puzzle file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse puzzle TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize puzzle TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl GridArrangement {
    /// Load an arrangement from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ArrangementError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load an arrangement from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ArrangementError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the arrangement to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ArrangementError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
