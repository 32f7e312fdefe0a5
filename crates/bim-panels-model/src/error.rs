// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model operations

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while decoding or handling model data
#[derive(Error, Debug)]
pub enum ModelError {
    /// JSON (de)serialization failed
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Colour string is not `#rrggbb`
    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    /// Relation index outside the inverse attribute list
    #[error("Unknown relation index {0}")]
    InvalidRelationIndex(usize),

    /// Geometry codec failure
    #[error("Fragments codec error: {0}")]
    Codec(String),

    /// IFC conversion failure
    #[error("IFC conversion failed: {0}")]
    IfcConversion(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl ModelError {
    /// Create a new codec error
    pub fn codec(msg: impl Into<String>) -> Self {
        ModelError::Codec(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        ModelError::Other(msg.into())
    }
}
