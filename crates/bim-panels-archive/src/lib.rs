// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-Panels Archive - fragments bundles in and out
//!
//! A fragments bundle is a zip with up to three entries:
//!
//! | entry | required | content |
//! |---|---|---|
//! | `geometry.frag` | yes | binary fragments geometry |
//! | `properties.json` | no | [`PropertiesTable`](bim_panels_model::PropertiesTable) |
//! | `relations-map.json` | no | [`RelationsMap`](bim_panels_model::RelationsMap) |
//!
//! There is no manifest, version tag or checksum.
//!
//! # Example
//!
//! ```ignore
//! use bim_panels_archive::{import_fragments, export_csv};
//!
//! let group = import_fragments(&zip_bytes, &mut manager, &indexer, Some("house.zip"))?;
//! if let Some(file) = export_csv(&manager) {
//!     download(file);
//! }
//! ```

mod bundle;
mod csv;
mod error;
mod export;

pub use bundle::{
    import_fragments, FragmentsBundle, GEOMETRY_ENTRY, PROPERTIES_ENTRY, RELATIONS_ENTRY,
};
pub use csv::{export_csv, properties_csv, CSV_HEADER};
pub use error::{ArchiveError, Result};
pub use export::{export_fragments, update_props_table, ExportFile};
