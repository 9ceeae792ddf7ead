//! Error types for registry-config

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} configuration at {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported configuration format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("Registry '{id}' is configured more than once")]
    DuplicateRegistry { id: String },

    #[error("Registry at position {position} has an empty id")]
    EmptyRegistryId { position: usize },
}
