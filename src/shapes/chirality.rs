//! Mirror (chirality) feature-ID remapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Feature-ID translation between a shape's canonical and mirrored
/// orientation.
///
/// When a piece is mirrored and a constraint is mirror-aware, the feature
/// IDs it names are resolved through this mapping before the geometric
/// lookup. IDs absent from the map pass through unchanged (features that
/// lie on the mirror axis keep their identity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChiralityMapping {
    pub shape_id: String,
    /// Canonical corner ID -> mirrored corner ID.
    pub corners: HashMap<String, String>,
    /// Canonical edge ID -> mirrored edge ID.
    pub edges: HashMap<String, String>,
}

impl ChiralityMapping {
    /// Translate a corner feature ID into the mirrored orientation.
    pub fn map_corner<'a>(&'a self, id: &'a str) -> &'a str {
        self.corners.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Translate an edge feature ID into the mirrored orientation.
    pub fn map_edge<'a>(&'a self, id: &'a str) -> &'a str {
        self.edges.get(id).map(String::as_str).unwrap_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::geometry::id_map;

    #[test]
    fn test_mapped_ids_translate() {
        let mapping = ChiralityMapping {
            shape_id: "triangle-small".to_string(),
            corners: id_map(&[("east", "north"), ("north", "east")]),
            edges: id_map(&[("base", "rise"), ("rise", "base")]),
        };
        assert_eq!(mapping.map_corner("east"), "north");
        assert_eq!(mapping.map_edge("rise"), "base");
    }

    #[test]
    fn test_unmapped_ids_pass_through() {
        let mapping = ChiralityMapping {
            shape_id: "triangle-small".to_string(),
            corners: HashMap::new(),
            edges: HashMap::new(),
        };
        assert_eq!(mapping.map_corner("right-angle"), "right-angle");
        assert_eq!(mapping.map_edge("hypotenuse"), "hypotenuse");
    }
}
