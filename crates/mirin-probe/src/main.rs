use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use mirin_bundle::BundleRepository;
use mirin_platform::filesys::{
    AssetSubsysConfig, DirAssetManager, Filesystem, StdFileSubsystem, DEFAULT_ASSET_PREFIX,
};
use mirin_platform::logging::{init_logging, LoggingConfig};

const USAGE: &str = "usage: mirin-probe <asset-root> <logical-path>...";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut args = std::env::args().skip(1);
    let Some(root) = args.next() else {
        bail!(USAGE);
    };
    let paths: Vec<String> = args.collect();
    if paths.is_empty() {
        bail!(USAGE);
    }

    let root = PathBuf::from(root);
    let root = root
        .canonicalize()
        .with_context(|| format!("asset root {} is not accessible", root.display()))?;
    log::info!("serving packaged assets from {}", root.display());

    let mut filesys = Filesystem::new();
    filesys.add_asset_subsystem(DirAssetManager::new(&root), AssetSubsysConfig::default());
    filesys.add_subsystem(StdFileSubsystem::new(std::env::current_dir()?));

    let mut failures = 0;
    for path in &paths {
        match filesys.read_file_to_vec(path) {
            Some(bytes) => println!("  {path:<48} {:>10} bytes  {}", bytes.len(), preview(&bytes)),
            None => {
                println!("  {path:<48} {:>10}", "missing");
                failures += 1;
            }
        }
    }

    if let Ok(repo) = filesys.bundle_repo().lock() {
        log::debug!("bundles indexed: {}", loaded_bundles(&paths, &*repo));
    }

    if failures > 0 {
        bail!("{failures} of {} paths could not be read", paths.len());
    }
    Ok(())
}

/// First bytes as hex.
fn preview(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(8)
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct bundle containers among `paths` that ended up indexed.
fn loaded_bundles(paths: &[String], repo: &(dyn BundleRepository + Send)) -> usize {
    let mut containers: Vec<&str> = paths
        .iter()
        .filter_map(|p| p.strip_prefix(DEFAULT_ASSET_PREFIX))
        .filter_map(|p| p.rsplit_once('/').map(|(dir, _)| dir.trim_start_matches('/')))
        .filter(|dir| repo.has_container(dir))
        .collect();
    containers.sort_unstable();
    containers.dedup();
    containers.len()
}
