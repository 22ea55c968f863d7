use std::collections::HashMap;
use std::io;
use std::ops::Range;

use super::asset::{Asset, AssetManager};

/// In-memory asset store with every asset packed back to back.
///
/// Behaves like the platform store: an asset reports its own length, but a
/// raw read only stops at the end of the whole pack, so an unclamped read
/// runs into the next asset.
#[derive(Debug, Default, Clone)]
pub struct PackedAssets {
    data: Vec<u8>,
    index: HashMap<String, Range<usize>>,
}

impl PackedAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an asset. Re-inserting a path points it at the new bytes.
    pub fn insert(&mut self, raw_path: impl Into<String>, bytes: impl AsRef<[u8]>) {
        let start = self.data.len();
        self.data.extend_from_slice(bytes.as_ref());
        self.index.insert(raw_path.into(), start..self.data.len());
    }

    pub fn with(mut self, raw_path: impl Into<String>, bytes: impl AsRef<[u8]>) -> Self {
        self.insert(raw_path, bytes);
        self
    }

    pub fn contains(&self, raw_path: &str) -> bool {
        self.index.contains_key(raw_path)
    }
}

impl AssetManager for PackedAssets {
    fn open(&self, raw_path: &str) -> Option<Box<dyn Asset + '_>> {
        let range = self.index.get(raw_path)?.clone();
        Some(Box::new(PackedAsset {
            pack: &self.data,
            cursor: range.start,
            range,
        }))
    }
}

struct PackedAsset<'a> {
    pack: &'a [u8],
    range: Range<usize>,
    cursor: usize,
}

impl Asset for PackedAsset<'_> {
    fn length(&self) -> u64 {
        self.range.len() as u64
    }

    fn remaining_length(&self) -> u64 {
        self.range.end.saturating_sub(self.cursor) as u64
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = &self.pack[self.cursor.min(self.pack.len())..];
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.cursor += n;
        Ok(n)
    }
}
