use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use super::asset::{Asset, AssetManager};

/// Asset store backed by a host directory.
///
/// Lets desktop builds and tools serve the same raw paths the packaged
/// store would. Paths that try to leave the root are treated as missing.
#[derive(Debug, Clone)]
pub struct DirAssetManager {
    root: PathBuf,
}

impl DirAssetManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, raw_path: &str) -> Option<PathBuf> {
        let rel = Path::new(raw_path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return None;
        }
        Some(self.root.join(rel))
    }
}

impl AssetManager for DirAssetManager {
    fn open(&self, raw_path: &str) -> Option<Box<dyn Asset + '_>> {
        let path = self.resolve(raw_path)?;
        let file = File::open(&path).ok()?;
        let meta = file.metadata().ok()?;
        if !meta.is_file() {
            return None;
        }
        Some(Box::new(DirAsset {
            file,
            len: meta.len(),
            pos: 0,
        }))
    }
}

struct DirAsset {
    file: File,
    len: u64,
    pos: u64,
}

impl Asset for DirAsset {
    fn length(&self) -> u64 {
        self.len
    }

    fn remaining_length(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    /// Fills `buf` up to end of file; a single `read` call may stop short
    /// (Linux caps one call at about 2 GiB).
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        self.pos += filled as u64;
        Ok(filled)
    }
}
