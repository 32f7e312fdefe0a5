// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inverse-attribute relation maps (`relations-map.json`)

use crate::{ExpressId, ModelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inverse attributes, in the order their indices are written to JSON
pub const INVERSE_ATTRIBUTES: &[&str] = &[
    "IsDecomposedBy",
    "Decomposes",
    "AssociatedTo",
    "HasAssociations",
    "ClassificationForObjects",
    "IsGroupedBy",
    "HasAssignments",
    "IsDefinedBy",
    "DefinesOcurrence",
    "IsTypedBy",
    "Types",
    "Defines",
    "ContainedInStructure",
    "ContainsElements",
    "HasControlElements",
    "AssignedToFlowElement",
    "ConnectedTo",
    "ConnectedFrom",
    "ReferencedBy",
    "Declares",
    "HasContext",
    "Controls",
    "IsNestedBy",
    "Nests",
    "DefinesType",
];

/// Index of an inverse attribute by name
pub fn relation_index(attribute: &str) -> Option<usize> {
    INVERSE_ATTRIBUTES.iter().position(|a| *a == attribute)
}

/// Name of an inverse attribute by index
pub fn relation_name(index: usize) -> Result<&'static str> {
    INVERSE_ATTRIBUTES
        .get(index)
        .copied()
        .ok_or(ModelError::InvalidRelationIndex(index))
}

/// Relations of one entity: relation index to related ids
pub type EntityRelations = BTreeMap<usize, Vec<ExpressId>>;

/// Express id to its inverse relations
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationsMap(BTreeMap<ExpressId, EntityRelations>);

impl RelationsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the JSON form `{"12": {"0": [13, 14]}}`
    ///
    /// Relation indices outside [`INVERSE_ATTRIBUTES`] are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: RelationsMap = serde_json::from_str(json)?;
        for relations in map.0.values() {
            if let Some(bad) = relations.keys().find(|i| **i >= INVERSE_ATTRIBUTES.len()) {
                return Err(ModelError::InvalidRelationIndex(*bad));
            }
        }
        Ok(map)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Related ids of `id` through `attribute`
    pub fn related(&self, id: ExpressId, attribute: &str) -> &[ExpressId] {
        relation_index(attribute)
            .and_then(|index| self.0.get(&id)?.get(&index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Record `related` under `id` through `attribute`
    pub fn add(&mut self, id: ExpressId, attribute: &str, related: ExpressId) -> Result<()> {
        let index = relation_index(attribute)
            .ok_or_else(|| ModelError::other(format!("Unknown inverse attribute {}", attribute)))?;
        let list = self.0.entry(id).or_default().entry(index).or_default();
        if !list.contains(&related) {
            list.push(related);
        }
        Ok(())
    }

    pub fn get(&self, id: ExpressId) -> Option<&EntityRelations> {
        self.0.get(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_query() {
        let map = RelationsMap::from_json(r#"{"1": {"0": [2, 3]}, "3": {"13": [10, 11]}}"#).unwrap();
        assert_eq!(map.related(ExpressId(1), "IsDecomposedBy"), &[ExpressId(2), ExpressId(3)]);
        assert_eq!(map.related(ExpressId(3), "ContainsElements").len(), 2);
        assert!(map.related(ExpressId(2), "IsDecomposedBy").is_empty());
    }

    #[test]
    fn test_rejects_unknown_index() {
        let err = RelationsMap::from_json(r#"{"1": {"99": [2]}}"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRelationIndex(99)));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut map = RelationsMap::new();
        map.add(ExpressId(5), "ContainsElements", ExpressId(6)).unwrap();
        map.add(ExpressId(5), "ContainsElements", ExpressId(6)).unwrap();
        assert_eq!(map.related(ExpressId(5), "ContainsElements"), &[ExpressId(6)]);
        assert!(map.add(ExpressId(5), "NoSuchThing", ExpressId(6)).is_err());
        assert_eq!(relation_name(13).unwrap(), "ContainsElements");
    }
}
