use mirin_bundle::BundleError;
use thiserror::Error;

/// Why a subsystem could not serve a logical path.
///
/// Only [`FsError::NotOwned`] lets the [`Filesystem`](super::Filesystem)
/// move on to the next subsystem; every other variant ends the lookup.
#[derive(Debug, Error)]
pub enum FsError {
    /// The path does not belong to this subsystem.
    #[error("`{path}` is not owned by this subsystem")]
    NotOwned { path: String },

    /// Neither the store nor any bundle holds the entry.
    #[error("`{path}` not found")]
    NotFound { path: String },

    /// A candidate container was read but could not be indexed.
    #[error("failed to ingest bundle `{container}`")]
    Ingest {
        container: String,
        #[source]
        source: BundleError,
    },

    /// The file opened but delivered fewer bytes than required.
    #[error("short read on `{path}`")]
    ShortRead { path: String },

    #[error("io error on `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
