use std::io;

/// Platform handle used to open packaged assets by raw path.
///
/// Missing entries are reported uniformly as `None`.
pub trait AssetManager {
    fn open(&self, raw_path: &str) -> Option<Box<dyn Asset + '_>>;
}

/// One open packaged asset. Dropping it closes the underlying resource.
pub trait Asset {
    /// Declared length of the asset in bytes.
    fn length(&self) -> u64;

    /// Bytes left between the read cursor and the declared end.
    fn remaining_length(&self) -> u64;

    /// Reads into `buf`, advancing the cursor.
    ///
    /// Implementations are not required to stop at the declared end; the
    /// platform primitive is known to keep reading into whatever asset is
    /// packed next. [`AssetFile`](super::AssetFile) does the clamping.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}
