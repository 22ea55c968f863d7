use mirin_bundle::{shared, SharedBundleRepository, ZipBundleRepository};

use super::asset::AssetManager;
use super::asset_subsys::{AssetSubsysConfig, AssetSubsystem};
use super::error::FsError;
use super::subsys::FileSubsystem;

/// Ordered set of file subsystems sharing one bundle repository.
///
/// Lookups go to each subsystem in registration order until one claims the
/// path. Failures collapse to `false` / `None` here; the reason is logged at
/// debug level.
pub struct Filesystem {
    subsystems: Vec<Box<dyn FileSubsystem>>,
    bundles: SharedBundleRepository,
}

impl Default for Filesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem {
    /// Creates an empty filesystem backed by a [`ZipBundleRepository`].
    pub fn new() -> Self {
        Self::with_bundle_repo(shared(ZipBundleRepository::new()))
    }

    pub fn with_bundle_repo(bundles: SharedBundleRepository) -> Self {
        Self {
            subsystems: Vec::new(),
            bundles,
        }
    }

    pub fn bundle_repo(&self) -> &SharedBundleRepository {
        &self.bundles
    }

    pub fn subsystem_count(&self) -> usize {
        self.subsystems.len()
    }

    pub fn add_subsystem(&mut self, subsystem: impl FileSubsystem + 'static) {
        self.subsystems.push(Box::new(subsystem));
    }

    /// Registers a packaged-asset subsystem wired to this filesystem's bundles.
    pub fn add_asset_subsystem<M>(&mut self, mgr: M, config: AssetSubsysConfig)
    where
        M: AssetManager + Send + Sync + 'static,
    {
        let subsystem = AssetSubsystem::with_config(mgr, self.bundles.clone(), config);
        self.add_subsystem(subsystem);
    }

    /// Asks the first subsystem that owns `path`.
    pub fn is_file(&self, path: &str) -> bool {
        self.subsystems
            .iter()
            .find(|s| s.owns(path))
            .is_some_and(|s| s.is_file(path))
    }

    pub fn read_file(&self, path: &str, out: &mut Vec<u8>) -> bool {
        self.dispatch(path, |s| s.read_file(path, out)).is_some()
    }

    /// Copies up to `buf.len()` bytes; `None` on any failure.
    pub fn read_file_into(&self, path: &str, buf: &mut [u8]) -> Option<usize> {
        self.dispatch(path, |s| s.read_file_into(path, buf))
    }

    pub fn read_file_to_vec(&self, path: &str) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.read_file(path, &mut out).then_some(out)
    }

    pub fn list_files(&self, path: &str) -> Vec<String> {
        self.subsystems.iter().flat_map(|s| s.list_files(path)).collect()
    }

    pub fn list_folders(&self, path: &str) -> Vec<String> {
        self.subsystems.iter().flat_map(|s| s.list_folders(path)).collect()
    }

    fn dispatch<T>(
        &self,
        path: &str,
        mut op: impl FnMut(&dyn FileSubsystem) -> Result<T, FsError>,
    ) -> Option<T> {
        for subsystem in &self.subsystems {
            match op(subsystem.as_ref()) {
                Ok(value) => return Some(value),
                Err(FsError::NotOwned { .. }) => continue,
                Err(err) => {
                    match std::error::Error::source(&err) {
                        Some(cause) => log::debug!("{err}: {cause}"),
                        None => log::debug!("{err}"),
                    }
                    return None;
                }
            }
        }

        log::debug!("no file subsystem owns `{path}`");
        None
    }
}
