// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-Panels Components - in-memory collaborators for the viewer panels
//!
//! - [`FragmentsManager`] - registry of loaded groups, in load order
//! - [`Classifier`] - groups elements by entity, predefined type, spatial
//!   container or relationship
//! - [`Highlighter`] - named selections (hover, select) for the renderer host
//! - [`IfcRelationsIndexer`] - relation maps per group
//!
//! Geometry decoding goes through a [`bim_panels_model::FragmentsCodec`]
//! supplied by the host.

mod classifier;
mod fragments;
mod highlighter;
mod indexer;
mod spatial;

pub use classifier::{Classifier, ColorEvent, ColorListener};
pub use fragments::{FragmentsManager, LoadedListener};
pub use highlighter::{HighlightEvent, HighlightListener, Highlighter};
pub use indexer::IfcRelationsIndexer;
pub use spatial::build_spatial_tree;

#[cfg(test)]
pub(crate) mod test_support {
    use bim_panels_model::{
        ExpressId, FragmentItem, FragmentsCodec, FragmentsGroup, ModelError, PropertiesTable,
        RelationsMap, Result,
    };

    /// Codec for tests: `uuid:id,id;uuid:id` as UTF-8
    pub struct TextCodec;

    impl FragmentsCodec for TextCodec {
        fn decode(&self, geometry: &[u8]) -> Result<Vec<FragmentItem>> {
            let text = std::str::from_utf8(geometry).map_err(|e| ModelError::codec(e.to_string()))?;
            text.split(';')
                .filter(|part| !part.is_empty())
                .map(|part| {
                    let (uuid, ids) = part
                        .split_once(':')
                        .ok_or_else(|| ModelError::codec(format!("bad item '{}'", part)))?;
                    let ids = ids
                        .split(',')
                        .filter(|s| !s.is_empty())
                        .map(|s| {
                            s.parse::<u32>()
                                .map(ExpressId)
                                .map_err(|e| ModelError::codec(e.to_string()))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(FragmentItem::new(uuid, ids))
                })
                .collect()
        }

        fn encode(&self, group: &FragmentsGroup) -> Result<Vec<u8>> {
            let parts: Vec<String> = group
                .items
                .iter()
                .map(|item| {
                    let ids: Vec<String> = item.ids.iter().map(|id| id.0.to_string()).collect();
                    format!("{}:{}", item.uuid, ids.join(","))
                })
                .collect();
            Ok(parts.join(";").into_bytes())
        }
    }

    /// Small building: project 1 > site 2 > building 3 > storeys 4, 5
    pub const PROPERTIES: &str = r#"{
        "1": {"expressID": 1, "type": 103090709, "Name": {"type": 1, "value": "Demo Project"}},
        "2": {"expressID": 2, "type": 4097777520, "Name": {"type": 1, "value": "Site"}},
        "3": {"expressID": 3, "type": 4031249490, "Name": {"type": 1, "value": "House"}},
        "4": {"expressID": 4, "type": 3124254112, "Name": {"type": 1, "value": "Ground Floor"}},
        "5": {"expressID": 5, "type": 3124254112, "Name": {"type": 1, "value": "First Floor"}},
        "10": {"expressID": 10, "type": 2391406946, "Name": {"type": 1, "value": "Wall North"},
               "PredefinedType": {"type": 3, "value": "STANDARD"}},
        "11": {"expressID": 11, "type": 3512223829, "Name": {"type": 1, "value": "Wall South"}},
        "12": {"expressID": 12, "type": 395920057, "Name": {"type": 1, "value": "Front Door"},
               "PredefinedType": {"type": 3, "value": "DOOR"}},
        "13": {"expressID": 13, "type": 1529196076, "Name": {"type": 1, "value": "Roof Slab"},
               "PredefinedType": {"type": 3, "value": "ROOF"}},
        "20": {"expressID": 20, "type": 1451395588, "Name": {"type": 1, "value": "Pset_WallCommon"}},
        "21": {"expressID": 21, "type": 4186316022,
               "RelatedObjects": [{"type": 5, "value": 10}, {"type": 5, "value": 11}],
               "RelatingPropertyDefinition": {"type": 5, "value": 20}}
    }"#;

    pub const RELATIONS: &str =
        r#"{"1": {"0": [2]}, "2": {"0": [3]}, "3": {"0": [4, 5]}, "4": {"13": [10, 11, 12]}, "5": {"13": [13]}}"#;

    pub fn geometry() -> Vec<u8> {
        b"frag-a:10,11;frag-b:12;frag-c:13".to_vec()
    }

    pub fn group() -> FragmentsGroup {
        FragmentsGroup::new(
            "group-1",
            "House",
            TextCodec.decode(&geometry()).unwrap_or_default(),
            geometry(),
        )
        .with_properties(PropertiesTable::from_json(PROPERTIES).ok())
        .with_relations(RelationsMap::from_json(RELATIONS).ok())
    }
}
