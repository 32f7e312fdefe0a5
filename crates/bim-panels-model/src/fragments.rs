// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Loaded fragment groups

use crate::{ExpressId, FragmentIdMap, PropertiesTable, RelationsMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single geometry fragment and the express ids it renders
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FragmentItem {
    /// Mesh uuid
    pub uuid: String,
    /// Express ids drawn by this fragment
    pub ids: Vec<ExpressId>,
}

impl FragmentItem {
    pub fn new(uuid: impl Into<String>, ids: impl IntoIterator<Item = ExpressId>) -> Self {
        Self {
            uuid: uuid.into(),
            ids: ids.into_iter().collect(),
        }
    }
}

/// Extra data passed to a load alongside the geometry buffer
#[derive(Clone, Debug, Default)]
pub struct LoadData {
    pub properties: Option<PropertiesTable>,
    pub relations_map: Option<RelationsMap>,
    /// Display name for the models list
    pub name: Option<String>,
}

impl LoadData {
    pub fn with_properties(mut self, properties: Option<PropertiesTable>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_relations(mut self, relations_map: Option<RelationsMap>) -> Self {
        self.relations_map = relations_map;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A loaded model
///
/// Owns the properties it was imported with, so exports never reach into
/// another model's data.
#[derive(Clone, Debug)]
pub struct FragmentsGroup {
    pub uuid: String,
    pub name: String,
    pub items: Vec<FragmentItem>,
    /// Geometry buffer the group was decoded from
    pub geometry: Vec<u8>,
    properties: Option<PropertiesTable>,
    relations_map: Option<RelationsMap>,
}

impl FragmentsGroup {
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        items: Vec<FragmentItem>,
        geometry: Vec<u8>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            items,
            geometry,
            properties: None,
            relations_map: None,
        }
    }

    pub fn with_properties(mut self, properties: Option<PropertiesTable>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_relations(mut self, relations_map: Option<RelationsMap>) -> Self {
        self.relations_map = relations_map;
        self
    }

    /// Properties loaded with this group
    pub fn local_properties(&self) -> Option<&PropertiesTable> {
        self.properties.as_ref()
    }

    pub fn relations_map(&self) -> Option<&RelationsMap> {
        self.relations_map.as_ref()
    }

    /// Express id to the fragments that draw it
    pub fn fragments_by_id(&self) -> BTreeMap<ExpressId, Vec<&str>> {
        let mut index: BTreeMap<ExpressId, Vec<&str>> = BTreeMap::new();
        for item in &self.items {
            for id in &item.ids {
                index.entry(*id).or_default().push(item.uuid.as_str());
            }
        }
        index
    }

    /// Fragment id map covering `ids`; ids without geometry are dropped
    pub fn fragment_map(&self, ids: impl IntoIterator<Item = ExpressId>) -> FragmentIdMap {
        let index = self.fragments_by_id();
        let mut map = FragmentIdMap::new();
        for id in ids {
            if let Some(fragments) = index.get(&id) {
                for fragment in fragments {
                    map.insert(*fragment, id);
                }
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> FragmentsGroup {
        FragmentsGroup::new(
            "g1",
            "Model",
            vec![
                FragmentItem::new("a", [ExpressId(1), ExpressId(2)]),
                FragmentItem::new("b", [ExpressId(2), ExpressId(3)]),
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_fragment_map_skips_ids_without_geometry() {
        let map = group().fragment_map([ExpressId(2), ExpressId(99)]);
        assert!(map.contains("a", ExpressId(2)));
        assert!(map.contains("b", ExpressId(2)));
        assert_eq!(map.id_count(), 1);
    }
}
