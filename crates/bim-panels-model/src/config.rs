// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel configuration

use crate::{ClassificationEntry, Color, Result, ENTITIES_SYSTEM, PREDEFINED_TYPES_SYSTEM};
use serde::{Deserialize, Serialize};

/// System name for classification by `IFCRELDEFINESBYPROPERTIES`
pub const PROPERTIES_SYSTEM: &str = "value";

/// Settings shared by all panels
///
/// Every field has a default, so a partial JSON document is enough to
/// override one setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelsConfig {
    /// Highlighter style used while hovering rows
    pub hover_highlighter: String,
    /// Highlighter style used for clicked rows
    pub select_highlighter: String,
    /// Debounce for search inputs
    pub search_debounce_ms: u32,
    /// Initial value of the walls colour input
    pub walls_color: String,
    /// Entity groups that count as walls
    pub wall_entities: Vec<String>,
    /// Systems shown in the classification panel tree
    pub classification_systems: Vec<ClassificationEntry>,
    /// Systems shown in the project information panel tree
    pub entity_systems: Vec<ClassificationEntry>,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            hover_highlighter: "hover".to_string(),
            select_highlighter: "select".to_string(),
            search_debounce_ms: 200,
            walls_color: "#202932".to_string(),
            wall_entities: vec!["IFCWALLSTANDARDCASE".to_string(), "IFCWALL".to_string()],
            classification_systems: vec![
                ClassificationEntry::new(ENTITIES_SYSTEM, "Entities"),
                ClassificationEntry::new(PROPERTIES_SYSTEM, "Properties"),
                ClassificationEntry::new(PREDEFINED_TYPES_SYSTEM, "Predefined Types"),
            ],
            entity_systems: vec![ClassificationEntry::new(ENTITIES_SYSTEM, "Entities")],
        }
    }
}

impl PanelsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PanelsConfig = serde_json::from_str(json)?;
        // Reject a bad colour up front rather than at first render
        Color::from_hex(&config.walls_color)?;
        Ok(config)
    }

    /// Walls colour, falling back to the default on a bad value
    pub fn walls_color(&self) -> Color {
        Color::from_hex(&self.walls_color).unwrap_or(Color::new(
            0x20 as f32 / 255.0,
            0x29 as f32 / 255.0,
            0x32 as f32 / 255.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PanelsConfig::default();
        assert_eq!(config.search_debounce_ms, 200);
        assert_eq!(config.walls_color().to_hex(), "#202932");
        assert_eq!(config.classification_systems.len(), 3);
        assert_eq!(config.classification_systems[1].label, "Properties");
    }

    #[test]
    fn test_partial_override() {
        let config = PanelsConfig::from_json(r#"{"search_debounce_ms": 350}"#).unwrap();
        assert_eq!(config.search_debounce_ms, 350);
        assert_eq!(config.hover_highlighter, "hover");
    }

    #[test]
    fn test_rejects_bad_color() {
        assert!(PanelsConfig::from_json(r##"{"walls_color": "#zz0000"}"##).is_err());
    }
}
