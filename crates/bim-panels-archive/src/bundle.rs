// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zip decomposition into geometry, properties and relations

use crate::{ArchiveError, Result};
use bim_panels_model::{
    FragmentsGroup, FragmentsLoader, LoadData, PropertiesTable, RelationsIndexer, RelationsMap,
};
use std::io::{Cursor, Read, Write};
use std::sync::Arc;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const GEOMETRY_ENTRY: &str = "geometry.frag";
pub const PROPERTIES_ENTRY: &str = "properties.json";
pub const RELATIONS_ENTRY: &str = "relations-map.json";

/// Decoded contents of a fragments zip
#[derive(Clone, Debug, Default)]
pub struct FragmentsBundle {
    pub geometry: Vec<u8>,
    pub properties: Option<PropertiesTable>,
    pub relations_map: Option<RelationsMap>,
}

impl FragmentsBundle {
    /// Read a bundle from zip bytes
    ///
    /// `geometry.frag` is required. The JSON entries are optional, but once
    /// present they must decode.
    pub fn from_zip(bytes: &[u8], indexer: &dyn RelationsIndexer) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let geometry = match read_entry(&mut archive, GEOMETRY_ENTRY, bytes.len())? {
            Some(geometry) => geometry,
            None => return Err(ArchiveError::MissingGeometry),
        };

        let properties = match read_text_entry(&mut archive, PROPERTIES_ENTRY)? {
            Some(json) => {
                let table = PropertiesTable::from_json(&json)?;
                log::info!("Loaded properties: {} records", table.len());
                Some(table)
            }
            None => None,
        };

        let relations_map = match read_text_entry(&mut archive, RELATIONS_ENTRY)? {
            Some(json) => {
                let map = indexer.relations_map_from_json(&json)?;
                log::info!("Loaded relations map: {} entities", map.len());
                Some(map)
            }
            None => None,
        };

        Ok(Self {
            geometry,
            properties,
            relations_map,
        })
    }

    /// Write the bundle as a deflated zip
    pub fn to_zip(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        writer.start_file(GEOMETRY_ENTRY, options)?;
        writer.write_all(&self.geometry)?;

        if let Some(properties) = &self.properties {
            writer.start_file(PROPERTIES_ENTRY, options)?;
            writer.write_all(properties.to_json()?.as_bytes())?;
        }
        if let Some(relations) = &self.relations_map {
            writer.start_file(RELATIONS_ENTRY, options)?;
            writer.write_all(relations.to_json()?.as_bytes())?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Import a fragments zip and hand it to `loader` in a single call
///
/// A missing `geometry.frag` aborts before the loader is touched. Decode
/// errors propagate; nothing is retried or rolled back.
pub fn import_fragments(
    bytes: &[u8],
    loader: &mut dyn FragmentsLoader,
    indexer: &dyn RelationsIndexer,
    name: Option<&str>,
) -> Result<Arc<FragmentsGroup>> {
    let bundle = FragmentsBundle::from_zip(bytes, indexer)?;

    let mut data = LoadData::default()
        .with_properties(bundle.properties)
        .with_relations(bundle.relations_map);
    if let Some(name) = name {
        data = data.with_name(name);
    }

    let group = loader.load(bundle.geometry, data)?;
    log::info!("Fragments loaded with geometry, properties, and relations map");
    Ok(group)
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    archive_len: usize,
) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    // The header size is untrusted
    let mut buffer = Vec::with_capacity(capacity_hint(file.size(), archive_len));
    file.read_to_end(&mut buffer)?;
    Ok(Some(buffer))
}

/// Preallocation for an entry claiming `claimed` bytes, capped by the archive
fn capacity_hint(claimed: u64, archive_len: usize) -> usize {
    usize::try_from(claimed).map_or(archive_len, |claimed| claimed.min(archive_len))
}

fn read_text_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(Some(text))
}
