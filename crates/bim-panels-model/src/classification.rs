// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classification systems and groups

use crate::{ExpressId, FragmentIdMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// System name used by classification by entity
pub const ENTITIES_SYSTEM: &str = "entities";
/// System name used by classification by predefined type
pub const PREDEFINED_TYPES_SYSTEM: &str = "predefinedTypes";
/// System name used by classification by spatial structure
pub const SPATIAL_STRUCTURES_SYSTEM: &str = "spatialStructures";

/// One bucket of a classification system
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationGroup {
    pub map: FragmentIdMap,
    /// Entity that defines the group (a storey, a property set), if any
    pub id: Option<ExpressId>,
}

/// Group name to group
pub type ClassificationSystem = BTreeMap<String, ClassificationGroup>;

/// System name to its groups
pub type ClassificationList = BTreeMap<String, ClassificationSystem>;

/// A system shown in a classification tree, with its display label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    pub system: String,
    pub label: String,
}

impl ClassificationEntry {
    pub fn new(system: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            label: label.into(),
        }
    }
}

/// Query for `Classifier::find`: system name to accepted group names
///
/// Groups within one system are united; systems are intersected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassificationFilter(BTreeMap<String, Vec<String>>);

impl ClassificationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, system: impl Into<String>, groups: &[&str]) -> Self {
        self.0
            .entry(system.into())
            .or_default()
            .extend(groups.iter().map(|g| g.to_string()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
