// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits
//!
//! These are the seams between the panels and whatever owns geometry:
//! the binary fragments format, IFC conversion, and the group registry.

use crate::{FragmentItem, FragmentsGroup, LoadData, RelationsMap, Result};
use std::sync::Arc;

/// Binary fragments geometry format
///
/// The format itself lives outside this workspace; implementations wrap it.
pub trait FragmentsCodec {
    /// Decode a `geometry.frag` buffer into its fragment items
    fn decode(&self, geometry: &[u8]) -> Result<Vec<FragmentItem>>;

    /// Encode a group back into a `geometry.frag` buffer
    fn encode(&self, group: &FragmentsGroup) -> Result<Vec<u8>>;
}

/// Accepts decoded archive contents
///
/// One call per import: geometry, properties and relations arrive together.
pub trait FragmentsLoader {
    fn load(&mut self, geometry: Vec<u8>, data: LoadData) -> Result<Arc<FragmentsGroup>>;
}

/// Read side of the group registry, used by the exporters
pub trait FragmentsExporter {
    /// First loaded group, in load order
    fn first_group(&self) -> Option<Arc<FragmentsGroup>>;

    /// Serialize a group's geometry
    fn export(&self, group: &FragmentsGroup) -> Result<Vec<u8>>;
}

/// Decodes `relations-map.json`
pub trait RelationsIndexer {
    fn relations_map_from_json(&self, json: &str) -> Result<RelationsMap>;
}

/// IFC conversion output, ready for [`FragmentsLoader::load`]
#[derive(Clone, Debug, Default)]
pub struct ConvertedIfc {
    pub geometry: Vec<u8>,
    pub data: LoadData,
}

/// Converts IFC files to fragments
pub trait IfcLoader {
    /// Convert the bytes of an `.ifc` file named `name`
    fn convert(&self, ifc: &[u8], name: &str) -> Result<ConvertedIfc>;
}
