// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BIM-Panels Model - Shared types and collaborator traits
//!
//! This crate holds the data the viewer panels pass around (fragment id maps,
//! property tables, relation maps, classifications) and the traits the panels
//! use to talk to their collaborators. Anything that needs a renderer or a
//! geometry format stays behind a trait.
//!
//! # Architecture
//!
//! - [`FragmentsCodec`] - Binary fragment geometry decoding/encoding
//! - [`FragmentsLoader`] - Accepts decoded archive contents and produces a group
//! - [`IfcLoader`] - Converts raw IFC bytes into a fragments group
//! - [`RelationsIndexer`] - Decodes relation maps and answers inverse-attribute queries
//!
//! # Example
//!
//! ```ignore
//! use bim_panels_model::{PropertiesTable, ExpressId};
//!
//! let table = PropertiesTable::from_json(json)?;
//! if let Some(record) = table.get(ExpressId(186)) {
//!     println!("{:?} {:?}", record.ifc_type(), record.name());
//! }
//! ```

pub mod classification;
pub mod config;
pub mod error;
pub mod fragments;
pub mod properties;
pub mod relations;
pub mod spatial;
pub mod traits;
pub mod types;

pub use classification::*;
pub use config::*;
pub use error::*;
pub use fragments::*;
pub use properties::*;
pub use relations::*;
pub use spatial::*;
pub use traits::*;
pub use types::*;
