// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fragments geometry export

use crate::{ArchiveError, Result};
use bim_panels_model::{FragmentsExporter, PropertiesTable};

/// A file ready to be handed to the browser as a download
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// Export the first loaded group
///
/// Yields `geometry.frag`, followed by `geometry.json` when the group carries
/// properties. No loaded group yields no files.
pub fn export_fragments(exporter: &dyn FragmentsExporter) -> Result<Vec<ExportFile>> {
    let Some(group) = exporter.first_group() else {
        log::debug!("Export requested with no loaded groups");
        return Ok(Vec::new());
    };

    let geometry = exporter.export(&group)?;
    let mut files = vec![ExportFile::new(
        "geometry.frag",
        "application/octet-stream",
        geometry,
    )];

    if let Some(properties) = group.local_properties() {
        files.push(ExportFile::new(
            "geometry.json",
            "application/json",
            properties.to_json()?.into_bytes(),
        ));
    }

    log::info!("Exported fragments of {} ({} files)", group.name, files.len());
    Ok(files)
}

/// Write edited properties back into the loaded table
///
/// Never implemented; always fails.
pub fn update_props_table(_properties: &PropertiesTable) -> Result<()> {
    Err(ArchiveError::Unimplemented("updatePropsTable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim_panels_model::{ExpressId, FragmentItem, FragmentsGroup, ModelError};
    use std::sync::Arc;

    struct Registry {
        groups: Vec<Arc<FragmentsGroup>>,
        fail: bool,
    }

    impl FragmentsExporter for Registry {
        fn first_group(&self) -> Option<Arc<FragmentsGroup>> {
            self.groups.first().cloned()
        }

        fn export(&self, group: &FragmentsGroup) -> bim_panels_model::Result<Vec<u8>> {
            if self.fail {
                return Err(ModelError::codec("encoder unavailable"));
            }
            Ok(group.geometry.clone())
        }
    }

    fn group(name: &str, properties: Option<PropertiesTable>) -> Arc<FragmentsGroup> {
        Arc::new(
            FragmentsGroup::new(
                name,
                name,
                vec![FragmentItem::new("f", [ExpressId(1)])],
                name.as_bytes().to_vec(),
            )
            .with_properties(properties),
        )
    }

    #[test]
    fn test_no_groups_no_files() {
        let registry = Registry {
            groups: Vec::new(),
            fail: false,
        };
        assert!(export_fragments(&registry).unwrap().is_empty());
    }

    #[test]
    fn test_exports_first_group_only() {
        let table = PropertiesTable::from_json(r#"{"1": {"expressID": 1}}"#).ok();
        let registry = Registry {
            groups: vec![group("first", table), group("second", None)],
            fail: false,
        };
        let files = export_fragments(&registry).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "geometry.frag");
        assert_eq!(files[0].bytes, b"first");
        assert_eq!(files[1].name, "geometry.json");
        assert_eq!(files[1].bytes, br#"{"1":{"expressID":1}}"#);
    }

    #[test]
    fn test_geometry_json_keeps_non_entity_entries() {
        let json = r#"{"1":{"expressID":1},"coordinationMatrix":[1,0,0]}"#;
        let registry = Registry {
            groups: vec![group("first", PropertiesTable::from_json(json).ok())],
            fail: false,
        };
        let files = export_fragments(&registry).unwrap();
        let written: serde_json::Value = serde_json::from_slice(&files[1].bytes).unwrap();
        assert_eq!(written, serde_json::from_str::<serde_json::Value>(json).unwrap());
    }

    #[test]
    fn test_geometry_only_without_properties() {
        let registry = Registry {
            groups: vec![group("bare", None)],
            fail: false,
        };
        let files = export_fragments(&registry).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mime, "application/octet-stream");
    }

    #[test]
    fn test_encoder_failure_propagates() {
        let registry = Registry {
            groups: vec![group("x", None)],
            fail: true,
        };
        assert!(matches!(
            export_fragments(&registry),
            Err(ArchiveError::Model(ModelError::Codec(_)))
        ));
    }

    #[test]
    fn test_update_props_table_unimplemented() {
        let err = update_props_table(&PropertiesTable::new()).unwrap_err();
        assert!(matches!(err, ArchiveError::Unimplemented("updatePropsTable")));
    }
}
