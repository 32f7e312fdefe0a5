// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property tables loaded from `properties.json`
//!
//! A table maps express ids to loosely typed records. Records keep the shape
//! the fragments exporter writes: attribute keys holding either plain values
//! (`expressID`, `type`) or tagged objects like `{"type": 1, "value": "Wall"}`.
//! Entity handles are tagged objects with `type` 5.

use crate::{ExpressId, IfcType, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Tag used by the fragments properties format for entity references
pub const HANDLE_TAG: u64 = 5;

/// One entity's attributes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRecord(Map<String, Value>);

impl PropertyRecord {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    /// Raw attribute as stored
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Attribute value, unwrapping `{"value": ...}` tagged objects
    pub fn value(&self, key: &str) -> Option<&Value> {
        match self.0.get(key)? {
            Value::Object(obj) => obj.get("value"),
            other => Some(other),
        }
    }

    /// Attribute value as a string slice
    pub fn string(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    /// `expressID` attribute
    pub fn express_id(&self) -> Option<ExpressId> {
        self.value("expressID")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok())
            .map(ExpressId)
    }

    /// Entity class, from a numeric web-ifc code or a STEP name
    pub fn ifc_type(&self) -> Option<IfcType> {
        match self.0.get("type")? {
            Value::Number(n) => n
                .as_u64()
                .and_then(|code| u32::try_from(code).ok())
                .map(IfcType::from_code),
            Value::String(s) => Some(IfcType::parse(s)),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.string("Name")
    }

    pub fn predefined_type(&self) -> Option<&str> {
        self.string("PredefinedType")
    }

    /// Single entity handle stored under `key`
    pub fn handle(&self, key: &str) -> Option<ExpressId> {
        self.0.get(key).and_then(value_as_handle)
    }

    /// List of entity handles stored under `key`
    pub fn handles(&self, key: &str) -> Vec<ExpressId> {
        match self.0.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(value_as_handle).collect(),
            Some(single) => value_as_handle(single).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// First attribute whose key starts with `prefix`
    pub fn key_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.0
            .keys()
            .find(|k| k.starts_with(prefix))
            .map(String::as_str)
    }

    /// Object-valued attributes in key order
    ///
    /// These are what the CSV exporter calls property sets: the attribute key
    /// is the set name and the object's keys are the property names.
    pub fn property_sets(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.0.iter().filter_map(|(key, value)| match value {
            Value::Object(obj) => Some((key.as_str(), obj)),
            _ => None,
        })
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn value_as_handle(value: &Value) -> Option<ExpressId> {
    let obj = value.as_object()?;
    if obj.get("type").and_then(Value::as_u64) != Some(HANDLE_TAG) {
        return None;
    }
    obj.get("value")
        .and_then(Value::as_u64)
        .and_then(|id| u32::try_from(id).ok())
        .map(ExpressId)
}

/// Express id to record
///
/// Top-level entries that are not entity records (non-numeric keys such as
/// `coordinationMatrix`, or non-object values) are kept aside and written
/// back by [`PropertiesTable::to_json`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertiesTable {
    records: BTreeMap<ExpressId, PropertyRecord>,
    extra: Map<String, Value>,
}

impl PropertiesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `properties.json`; malformed JSON is an error
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Map<String, Value> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (key, value) in raw {
            match (key.parse::<u32>(), value) {
                (Ok(id), Value::Object(attributes)) => {
                    table.records.insert(ExpressId(id), PropertyRecord(attributes));
                }
                (_, value) => {
                    log::debug!("Keeping non-entity entry '{}' in properties", key);
                    table.extra.insert(key, value);
                }
            }
        }
        Ok(table)
    }

    /// Serialize records and non-entity entries back into one object
    pub fn to_json(&self) -> Result<String> {
        let mut raw = self.extra.clone();
        for (id, record) in &self.records {
            raw.insert(id.0.to_string(), Value::Object(record.0.clone()));
        }
        Ok(serde_json::to_string(&raw)?)
    }

    pub fn get(&self, id: ExpressId) -> Option<&PropertyRecord> {
        self.records.get(&id)
    }

    pub fn insert(&mut self, id: ExpressId, record: PropertyRecord) {
        self.records.insert(id, record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExpressId, &PropertyRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Top-level entries that are not entity records
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Records of one IFC class
    pub fn of_type<'a>(
        &'a self,
        ifc_type: &'a IfcType,
    ) -> impl Iterator<Item = (ExpressId, &'a PropertyRecord)> + 'a {
        self.iter()
            .filter(move |(_, record)| record.ifc_type().as_ref() == Some(ifc_type))
    }

    /// Number of entity records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(ExpressId, PropertyRecord)> for PropertiesTable {
    fn from_iter<T: IntoIterator<Item = (ExpressId, PropertyRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
            extra: Map::new(),
        }
    }
}
