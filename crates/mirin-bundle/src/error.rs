use thiserror::Error;

/// Failure while ingesting a container into a repository.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The container bytes could not be parsed as an archive.
    #[error("container `{container}` is not a readable archive")]
    Archive {
        container: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry inside the container could not be decompressed.
    #[error("failed to extract `{entry}` from container `{container}`")]
    Entry {
        container: String,
        entry: String,
        #[source]
        source: std::io::Error,
    },
}
