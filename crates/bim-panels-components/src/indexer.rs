// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relation maps per loaded group

use bim_panels_model::{ExpressId, FragmentsGroup, RelationsIndexer, RelationsMap, Result};
use rustc_hash::FxHashMap;

/// Keeps the relations map of every processed group
#[derive(Default)]
pub struct IfcRelationsIndexer {
    maps: FxHashMap<String, RelationsMap>,
}

impl IfcRelationsIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the relations a group was loaded with
    ///
    /// Returns false when the group carries no relations map.
    pub fn process(&mut self, group: &FragmentsGroup) -> bool {
        match group.relations_map() {
            Some(map) => {
                log::debug!("Indexed {} related entities for {}", map.len(), group.name);
                self.maps.insert(group.uuid.clone(), map.clone());
                true
            }
            None => false,
        }
    }

    pub fn relations_map(&self, group_uuid: &str) -> Option<&RelationsMap> {
        self.maps.get(group_uuid)
    }

    /// Related ids of one entity through an inverse attribute
    pub fn entity_relations(
        &self,
        group_uuid: &str,
        id: ExpressId,
        attribute: &str,
    ) -> Vec<ExpressId> {
        self.maps
            .get(group_uuid)
            .map(|map| map.related(id, attribute).to_vec())
            .unwrap_or_default()
    }

    pub fn relations_map_to_json(&self, map: &RelationsMap) -> Result<String> {
        map.to_json()
    }

    pub fn forget(&mut self, group_uuid: &str) {
        self.maps.remove(group_uuid);
    }
}

impl RelationsIndexer for IfcRelationsIndexer {
    fn relations_map_from_json(&self, json: &str) -> Result<RelationsMap> {
        RelationsMap::from_json(json)
    }
}
