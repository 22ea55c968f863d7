use super::error::FsError;

/// One source of files the engine can read from.
///
/// A [`Filesystem`](super::Filesystem) holds several of these and asks them
/// in order; a subsystem answers [`FsError::NotOwned`] for paths it does not
/// recognise.
pub trait FileSubsystem: Send + Sync {
    /// Whether `path` belongs to this subsystem, existing or not.
    fn owns(&self, _path: &str) -> bool {
        true
    }

    fn is_file(&self, path: &str) -> bool;

    /// Replaces `out` with the whole file. `out` is untouched on error.
    fn read_file(&self, path: &str, out: &mut Vec<u8>) -> Result<(), FsError>;

    /// Copies up to `buf.len()` bytes of the file into `buf`.
    fn read_file_into(&self, path: &str, buf: &mut [u8]) -> Result<usize, FsError>;

    fn list_files(&self, _path: &str) -> Vec<String> {
        Vec::new()
    }

    fn list_folders(&self, _path: &str) -> Vec<String> {
        Vec::new()
    }
}
