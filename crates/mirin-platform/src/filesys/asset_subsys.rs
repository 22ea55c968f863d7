use std::sync::PoisonError;

use mirin_bundle::SharedBundleRepository;

use super::asset::AssetManager;
use super::error::FsError;
use super::reader::AssetFile;
use super::subsys::FileSubsystem;

/// Logical prefix of the packaged-asset namespace.
pub const DEFAULT_ASSET_PREFIX: &str = ":asset";

/// Configuration for an [`AssetSubsystem`].
#[derive(Debug, Clone)]
pub struct AssetSubsysConfig {
    /// Paths starting with this token are served by the subsystem.
    pub prefix: String,
}

impl Default for AssetSubsysConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ASSET_PREFIX.to_owned(),
        }
    }
}

/// Serves logical paths under a fixed prefix from a packaged-asset store.
///
/// Resolution order for a raw path `dir/bundle/name`:
/// 1. the asset `dir/bundle/name` itself;
/// 2. entry `name` of the already indexed container `dir/bundle`;
/// 3. the asset `dir/bundle`, ingested into the bundle repository, then
///    entry `name` of it.
///
/// [`is_file`](FileSubsystem::is_file) only checks step 1.
pub struct AssetSubsystem<M> {
    prefix: String,
    mgr: M,
    bundles: SharedBundleRepository,
}

impl<M: AssetManager> AssetSubsystem<M> {
    pub fn new(mgr: M, bundles: SharedBundleRepository) -> Self {
        Self::with_config(mgr, bundles, AssetSubsysConfig::default())
    }

    pub fn with_config(mgr: M, bundles: SharedBundleRepository, config: AssetSubsysConfig) -> Self {
        Self {
            prefix: config.prefix,
            mgr,
            bundles,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn asset_manager(&self) -> &M {
        &self.mgr
    }

    /// Strips the prefix and at most one following `/`.
    ///
    /// `None` if `path` does not start with the prefix.
    pub fn make_raw_path<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        Some(rest.strip_prefix('/').unwrap_or(rest))
    }

    pub fn make_logical_path(&self, raw_path: &str) -> String {
        if raw_path.is_empty() {
            self.prefix.clone()
        } else {
            format!("{}/{}", self.prefix, raw_path)
        }
    }

    fn raw_path<'p>(&self, path: &'p str) -> Result<&'p str, FsError> {
        self.make_raw_path(path).ok_or_else(|| FsError::NotOwned {
            path: path.to_owned(),
        })
    }

    /// Looks `raw_path` up as a bundle entry, ingesting its container on a miss.
    ///
    /// The repository lock is held for the whole sequence so two callers
    /// racing on the same cold container ingest it once.
    fn with_bundle_entry<R>(&self, raw_path: &str, f: impl FnOnce(&[u8]) -> R) -> Result<R, FsError> {
        let not_found = || FsError::NotFound {
            path: raw_path.to_owned(),
        };
        let (container, entry) = split_container(raw_path).ok_or_else(not_found)?;

        let mut bundles = self.bundles.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(data) = bundles.get_file_data(container, entry) {
            return Ok(f(data));
        }
        if bundles.has_container(container) {
            log::debug!("bundle `{container}` has no entry `{entry}`");
            return Err(not_found());
        }

        let mut file = AssetFile::new();
        if !file.open(&self.mgr, container) {
            log::debug!("no asset or container for `{raw_path}`");
            return Err(not_found());
        }
        let bytes = file.read_all().ok_or_else(|| FsError::ShortRead {
            path: container.to_owned(),
        })?;
        file.close();

        bundles
            .notify(container, &bytes)
            .map_err(|source| FsError::Ingest {
                container: container.to_owned(),
                source,
            })?;

        match bundles.get_file_data(container, entry) {
            Some(data) => Ok(f(data)),
            None => {
                log::debug!("bundle `{container}` has no entry `{entry}`");
                Err(not_found())
            }
        }
    }
}

/// Splits `a/b/name` into (`a/b`, `name`). Both halves must be non-empty.
fn split_container(raw_path: &str) -> Option<(&str, &str)> {
    let (container, entry) = raw_path.rsplit_once('/')?;
    if container.is_empty() || entry.is_empty() {
        return None;
    }
    Some((container, entry))
}

impl<M> FileSubsystem for AssetSubsystem<M>
where
    M: AssetManager + Send + Sync,
{
    fn owns(&self, path: &str) -> bool {
        self.make_raw_path(path).is_some()
    }

    fn is_file(&self, path: &str) -> bool {
        self.make_raw_path(path)
            .is_some_and(|raw| AssetFile::new().open(&self.mgr, raw))
    }

    fn read_file(&self, path: &str, out: &mut Vec<u8>) -> Result<(), FsError> {
        let raw = self.raw_path(path)?;

        let mut file = AssetFile::new();
        if file.open(&self.mgr, raw) {
            return match file.read_all() {
                Some(data) => {
                    *out = data;
                    Ok(())
                }
                None => Err(FsError::ShortRead {
                    path: raw.to_owned(),
                }),
            };
        }

        *out = self.with_bundle_entry(raw, <[u8]>::to_vec)?;
        Ok(())
    }

    fn read_file_into(&self, path: &str, buf: &mut [u8]) -> Result<usize, FsError> {
        let raw = self.raw_path(path)?;

        let mut file = AssetFile::new();
        let n = if file.open(&self.mgr, raw) {
            file.read(buf)
        } else {
            self.with_bundle_entry(raw, |data| {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                n
            })?
        };

        if n == 0 {
            return Err(FsError::ShortRead {
                path: raw.to_owned(),
            });
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesys::{Asset, PackedAssets};
    use mirin_bundle::{shared, BundleError, BundleRepository, ZipBundleRepository};
    use std::io::{Cursor, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use zip::write::SimpleFileOptions;

    fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    struct CountingAssets {
        inner: PackedAssets,
        opens: AtomicUsize,
    }

    impl AssetManager for CountingAssets {
        fn open(&self, raw_path: &str) -> Option<Box<dyn Asset + '_>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.inner.open(raw_path)
        }
    }

    struct CountingBundles {
        inner: ZipBundleRepository,
        notifies: Arc<AtomicUsize>,
    }

    impl BundleRepository for CountingBundles {
        fn get_file_data(&self, container: &str, entry: &str) -> Option<&[u8]> {
            self.inner.get_file_data(container, entry)
        }

        fn notify(&mut self, container: &str, bytes: &[u8]) -> Result<(), BundleError> {
            self.notifies.fetch_add(1, Ordering::SeqCst);
            self.inner.notify(container, bytes)
        }

        fn has_container(&self, container: &str) -> bool {
            self.inner.has_container(container)
        }
    }

    fn subsystem(assets: PackedAssets) -> (AssetSubsystem<CountingAssets>, Arc<AtomicUsize>) {
        let notifies = Arc::new(AtomicUsize::new(0));
        let bundles = shared(CountingBundles {
            inner: ZipBundleRepository::new(),
            notifies: Arc::clone(&notifies),
        });
        let mgr = CountingAssets {
            inner: assets,
            opens: AtomicUsize::new(0),
        };
        (AssetSubsystem::new(mgr, bundles), notifies)
    }

    fn opens(sub: &AssetSubsystem<CountingAssets>) -> usize {
        sub.asset_manager().opens.load(Ordering::SeqCst)
    }

    fn store() -> PackedAssets {
        PackedAssets::new()
            .with("shaders/a.spv", b"spirv")
            .with("shaders/b.spv", b"neighbour")
            .with("dir/C", archive(&[("entry.bin", &b"inside"[..]), ("other.bin", &b"xy"[..])]))
            .with("dir/junk", b"not an archive")
    }

    // ── path mapping ──────────────────────────────────────────────────────

    #[test]
    fn raw_path_strips_prefix_and_one_separator() {
        let (sub, _) = subsystem(PackedAssets::new());

        assert_eq!(sub.make_raw_path(":asset/dir/a.txt"), Some("dir/a.txt"));
        assert_eq!(sub.make_raw_path(":asset"), Some(""));
        assert_eq!(sub.make_raw_path(":asset/"), Some(""));
        assert_eq!(sub.make_raw_path(":asset//x"), Some("/x"));
        assert_eq!(sub.make_raw_path(":assetx"), Some("x"));
        assert!(sub.owns(":asset/dir/a.txt"));
    }

    #[test]
    fn raw_path_requires_prefix_at_start() {
        let (sub, _) = subsystem(PackedAssets::new());

        assert_eq!(sub.make_raw_path("assets/x"), None);
        assert_eq!(sub.make_raw_path("/:asset/x"), None);
        assert_eq!(sub.make_raw_path(""), None);
        assert!(!sub.owns("assets/x"));
    }

    #[test]
    fn custom_prefix() {
        let bundles = shared(ZipBundleRepository::new());
        let config = AssetSubsysConfig {
            prefix: "apk:".to_owned(),
        };
        let sub = AssetSubsystem::with_config(PackedAssets::new(), bundles, config);

        assert_eq!(sub.prefix(), "apk:");
        assert_eq!(sub.make_raw_path("apk:/a/b"), Some("a/b"));
        assert_eq!(sub.make_raw_path(":asset/a/b"), None);
    }

    #[test]
    fn logical_path_round_trips() {
        let (sub, _) = subsystem(PackedAssets::new());

        assert_eq!(sub.make_logical_path("dir/a.txt"), ":asset/dir/a.txt");
        assert_eq!(sub.make_logical_path(""), ":asset");
        assert_eq!(
            sub.make_raw_path(&sub.make_logical_path("dir/a.txt")),
            Some("dir/a.txt")
        );
    }

    // ── ownership ─────────────────────────────────────────────────────────

    #[test]
    fn foreign_paths_touch_nothing() {
        let (sub, notifies) = subsystem(store());
        let mut out = vec![7u8];

        let err = sub.read_file("/home/user/dir/C/entry.bin", &mut out).unwrap_err();
        assert!(matches!(err, FsError::NotOwned { .. }));
        assert!(!sub.is_file("shaders/a.spv"));
        assert!(matches!(
            sub.read_file_into("res/x", &mut [0u8; 4]),
            Err(FsError::NotOwned { .. })
        ));

        assert_eq!(out, vec![7u8]);
        assert_eq!(opens(&sub), 0);
        assert_eq!(notifies.load(Ordering::SeqCst), 0);
    }

    // ── direct reads ──────────────────────────────────────────────────────

    #[test]
    fn direct_read_yields_declared_size() {
        let (sub, notifies) = subsystem(store());
        let mut out = Vec::new();

        sub.read_file(":asset/shaders/a.spv", &mut out).unwrap();

        assert_eq!(out, b"spirv");
        assert_eq!(notifies.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn read_into_clamps_to_file_and_capacity() {
        let (sub, _) = subsystem(store());

        let mut big = [0u8; 32];
        assert_eq!(sub.read_file_into(":asset/shaders/a.spv", &mut big).unwrap(), 5);
        assert_eq!(&big[..5], b"spirv");
        assert!(big[5..].iter().all(|b| *b == 0));

        let mut small = [0u8; 3];
        assert_eq!(sub.read_file_into(":asset/shaders/a.spv", &mut small).unwrap(), 3);
        assert_eq!(&small, b"spi");
    }

    #[test]
    fn read_into_zero_capacity_fails() {
        let (sub, _) = subsystem(store());
        assert!(matches!(
            sub.read_file_into(":asset/shaders/a.spv", &mut []),
            Err(FsError::ShortRead { .. })
        ));
    }

    #[test]
    fn is_file_only_sees_direct_assets() {
        let (sub, notifies) = subsystem(store());

        assert!(sub.is_file(":asset/shaders/a.spv"));
        assert!(sub.is_file(":asset/dir/C"));
        assert!(!sub.is_file(":asset/dir/C/entry.bin"));
        assert!(!sub.is_file(":asset/missing"));
        assert_eq!(notifies.load(Ordering::SeqCst), 0);
    }

    // ── bundle fallback ───────────────────────────────────────────────────

    #[test]
    fn miss_ingests_container_once_then_serves_from_index() {
        let (sub, notifies) = subsystem(store());
        let mut out = Vec::new();

        sub.read_file(":asset/dir/C/entry.bin", &mut out).unwrap();
        assert_eq!(out, b"inside");
        assert_eq!(notifies.load(Ordering::SeqCst), 1);

        sub.read_file(":asset/dir/C/other.bin", &mut out).unwrap();
        assert_eq!(out, b"xy");
        assert_eq!(notifies.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn absent_entry_fails_after_one_ingestion() {
        let (sub, notifies) = subsystem(store());
        let mut out = vec![1, 2, 3];

        let err = sub.read_file(":asset/dir/C/nope.bin", &mut out).unwrap_err();

        assert!(matches!(err, FsError::NotFound { .. }));
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(notifies.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn later_misses_in_indexed_container_skip_reload() {
        let (sub, notifies) = subsystem(store());
        let mut out = Vec::new();

        sub.read_file(":asset/dir/C/entry.bin", &mut out).unwrap();
        // Direct attempt plus the container itself.
        assert_eq!(opens(&sub), 2);

        let err = sub.read_file(":asset/dir/C/nope.bin", &mut out).unwrap_err();

        assert!(matches!(err, FsError::NotFound { .. }));
        // Only the direct attempt; the indexed container is not read again.
        assert_eq!(opens(&sub), 3);
        assert_eq!(notifies.load(Ordering::SeqCst), 1);
        assert_eq!(out, b"inside");
    }

    #[test]
    fn unparsable_container_is_ingest_failure() {
        let (sub, notifies) = subsystem(store());
        let mut out = Vec::new();

        let err = sub.read_file(":asset/dir/junk/entry.bin", &mut out).unwrap_err();

        assert!(matches!(err, FsError::Ingest { ref container, .. } if container == "dir/junk"));
        assert!(out.is_empty());
        assert_eq!(notifies.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_container_is_not_found() {
        let (sub, notifies) = subsystem(store());
        let mut out = Vec::new();

        let err = sub.read_file(":asset/nowhere/entry.bin", &mut out).unwrap_err();

        assert!(matches!(err, FsError::NotFound { .. }));
        assert_eq!(notifies.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn top_level_miss_has_no_container() {
        let (sub, notifies) = subsystem(store());
        let mut out = Vec::new();

        assert!(matches!(
            sub.read_file(":asset/missing.bin", &mut out),
            Err(FsError::NotFound { .. })
        ));
        // Only the direct attempt hits the store.
        assert_eq!(opens(&sub), 1);
        assert_eq!(notifies.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn preloaded_bundle_is_served_without_opening_container() {
        let bundles = shared(ZipBundleRepository::new());
        bundles
            .lock()
            .unwrap()
            .notify("packs/ui", &archive(&[("icon.png", &b"png"[..])]))
            .unwrap();
        let mgr = CountingAssets {
            inner: PackedAssets::new(),
            opens: AtomicUsize::new(0),
        };
        let sub = AssetSubsystem::new(mgr, bundles);

        let mut out = Vec::new();
        sub.read_file(":asset/packs/ui/icon.png", &mut out).unwrap();

        assert_eq!(out, b"png");
        assert_eq!(opens(&sub), 1);
    }

    #[test]
    fn read_into_from_bundle_clamps_to_capacity() {
        let (sub, _) = subsystem(store());

        let mut buf = [0u8; 4];
        assert_eq!(sub.read_file_into(":asset/dir/C/entry.bin", &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"insi");

        let mut buf = [0u8; 16];
        assert_eq!(sub.read_file_into(":asset/dir/C/other.bin", &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"xy");
    }

    #[test]
    fn racing_first_loads_ingest_once() {
        let (sub, notifies) = subsystem(store());

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let mut out = Vec::new();
                    sub.read_file(":asset/dir/C/entry.bin", &mut out).unwrap();
                    assert_eq!(out, b"inside");
                });
            }
        });

        assert_eq!(notifies.load(Ordering::SeqCst), 1);
    }
}
