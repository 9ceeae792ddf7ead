//! Error types for registry-catalog

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Artifact coordinates could not be parsed.
    #[error("invalid artifact coordinates '{coords}': {reason}")]
    InvalidCoords { coords: String, reason: String },

    /// The merger was given nothing to merge.
    #[error("no extension catalogs to merge")]
    EmptyMerge,
}
