//! Catalog error types.

use std::path::PathBuf;

/// Errors that can occur while loading station catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON for a city catalog
    #[error("failed to parse {path:?}: {message}")]
    Json { path: PathBuf, message: String },

    /// A station has coordinates outside WGS84 bounds
    #[error("station {name} ({line}) in {city} has invalid coordinates: {reason}")]
    InvalidStation {
        city: String,
        name: String,
        line: String,
        reason: String,
    },

    /// City identifier not recognised
    #[error("unknown city: {0}")]
    UnknownCity(String),
}
