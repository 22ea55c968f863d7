use super::asset::{Asset, AssetManager};

/// Reader over a single packaged asset.
///
/// Tracks the declared file size and never lets a read cross it, whatever
/// the underlying [`Asset`] would do. The asset is closed on drop and on
/// every re-open.
#[derive(Default)]
pub struct AssetFile<'a> {
    asset: Option<Box<dyn Asset + 'a>>,
    file_size: usize,
}

impl<'a> AssetFile<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `raw_path`, closing whatever was open before.
    pub fn open<M>(&mut self, mgr: &'a M, raw_path: &str) -> bool
    where
        M: AssetManager + ?Sized,
    {
        self.close();

        let Some(asset) = mgr.open(raw_path) else {
            return false;
        };
        self.file_size = usize::try_from(asset.length()).unwrap_or(usize::MAX);
        self.asset = Some(asset);
        true
    }

    pub fn close(&mut self) {
        self.asset = None;
        self.file_size = 0;
    }

    pub fn is_ready(&self) -> bool {
        self.asset.is_some()
    }

    /// Declared size of the open asset; `0` when nothing is open.
    pub fn size(&self) -> usize {
        self.file_size
    }

    /// Read cursor, derived from what the asset reports as remaining.
    pub fn tell(&self) -> usize {
        match &self.asset {
            Some(asset) => {
                let remaining = usize::try_from(asset.remaining_length()).unwrap_or(usize::MAX);
                self.file_size.saturating_sub(remaining)
            }
            None => 0,
        }
    }

    /// Reads at most `size() - tell()` bytes into `dst`.
    ///
    /// Returns the number of bytes transferred; `0` means nothing was read,
    /// either because the clamp left nothing to read or the asset failed.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let remaining = self.file_size.saturating_sub(self.tell());
        let to_read = dst.len().min(remaining);
        if to_read == 0 {
            return 0;
        }
        if to_read < dst.len() {
            log::trace!("clamped asset read from {} to {} bytes", dst.len(), to_read);
        }

        let Some(asset) = self.asset.as_mut() else {
            return 0;
        };
        match asset.read(&mut dst[..to_read]) {
            Ok(n) => n.min(to_read),
            Err(err) => {
                log::debug!("asset read failed: {err}");
                0
            }
        }
    }

    /// Reads the whole asset. `None` unless exactly `size()` bytes arrive.
    pub fn read_all(&mut self) -> Option<Vec<u8>> {
        let mut out = vec![0; self.file_size];
        if self.read(&mut out) == self.file_size {
            Some(out)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesys::PackedAssets;

    fn pack() -> PackedAssets {
        PackedAssets::new()
            .with("a.bin", b"AAAA".to_vec())
            .with("b.bin", b"BBBBBB".to_vec())
            .with("empty", Vec::new())
    }

    // ── open / close ──────────────────────────────────────────────────────

    #[test]
    fn open_reports_size_and_zero_cursor() {
        let assets = pack();
        let mut file = AssetFile::new();

        assert!(file.open(&assets, "b.bin"));
        assert!(file.is_ready());
        assert_eq!(file.size(), 6);
        assert_eq!(file.tell(), 0);
    }

    #[test]
    fn open_missing_leaves_reader_closed() {
        let assets = pack();
        let mut file = AssetFile::new();

        assert!(file.open(&assets, "a.bin"));
        assert!(!file.open(&assets, "nope"));
        assert!(!file.is_ready());
        assert_eq!(file.size(), 0);
        assert_eq!(file.tell(), 0);
    }

    #[test]
    fn reopen_replaces_previous_asset() {
        let assets = pack();
        let mut file = AssetFile::new();

        assert!(file.open(&assets, "a.bin"));
        let mut buf = [0u8; 2];
        assert_eq!(file.read(&mut buf), 2);

        assert!(file.open(&assets, "b.bin"));
        assert_eq!(file.tell(), 0);
        assert_eq!(file.read_all().unwrap(), b"BBBBBB");
    }

    // ── read ──────────────────────────────────────────────────────────────

    #[test]
    fn read_never_crosses_declared_end() {
        // The packed store would happily continue into "b.bin".
        let assets = pack();
        let mut file = AssetFile::new();
        assert!(file.open(&assets, "a.bin"));

        let mut buf = [0u8; 16];
        assert_eq!(file.read(&mut buf), 4);
        assert_eq!(&buf[..4], b"AAAA");
        assert!(buf[4..].iter().all(|b| *b == 0));
        assert_eq!(file.tell(), 4);
    }

    #[test]
    fn read_after_end_transfers_nothing() {
        let assets = pack();
        let mut file = AssetFile::new();
        assert!(file.open(&assets, "a.bin"));

        let mut buf = [0u8; 4];
        assert_eq!(file.read(&mut buf), 4);
        assert_eq!(file.read(&mut buf), 0);
    }

    #[test]
    fn partial_reads_advance_cursor() {
        let assets = pack();
        let mut file = AssetFile::new();
        assert!(file.open(&assets, "b.bin"));

        let mut buf = [0u8; 4];
        assert_eq!(file.read(&mut buf), 4);
        assert_eq!(file.tell(), 4);
        assert_eq!(file.read(&mut buf), 2);
        assert_eq!(file.tell(), 6);
    }

    #[test]
    fn read_without_open_is_zero() {
        let mut file = AssetFile::new();
        let mut buf = [0u8; 4];
        assert_eq!(file.read(&mut buf), 0);
    }

    #[test]
    fn zero_capacity_read_is_zero() {
        let assets = pack();
        let mut file = AssetFile::new();
        assert!(file.open(&assets, "a.bin"));
        assert_eq!(file.read(&mut []), 0);
        assert_eq!(file.tell(), 0);
    }

    // ── read_all ──────────────────────────────────────────────────────────

    #[test]
    fn read_all_returns_exact_size() {
        let assets = pack();
        let mut file = AssetFile::new();
        assert!(file.open(&assets, "a.bin"));
        assert_eq!(file.read_all().unwrap(), b"AAAA");
    }

    #[test]
    fn read_all_after_partial_read_fails() {
        let assets = pack();
        let mut file = AssetFile::new();
        assert!(file.open(&assets, "b.bin"));

        let mut buf = [0u8; 1];
        file.read(&mut buf);
        assert!(file.read_all().is_none());
    }

    #[test]
    fn read_all_of_empty_asset_is_empty() {
        let assets = pack();
        let mut file = AssetFile::new();
        assert!(file.open(&assets, "empty"));
        assert_eq!(file.read_all(), Some(Vec::new()));
    }
}
