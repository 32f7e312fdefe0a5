// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for archive operations

use bim_panels_model::ModelError;
use thiserror::Error;

/// Result type alias for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Not a readable zip archive
    #[error("Invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// `geometry.frag` is absent
    #[error("No geometry found in the file!")]
    MissingGeometry,

    /// Reading an entry failed (includes non UTF-8 JSON entries)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding properties, relations or geometry failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Operation exists but was never implemented
    #[error("Function not implemented: {0}")]
    Unimplemented(&'static str),
}
