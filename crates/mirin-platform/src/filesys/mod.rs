//! File subsystems.
//!
//! Logical paths are resolved by an ordered [`Filesystem`] of
//! [`FileSubsystem`]s. The packaged-asset subsystem reads through an
//! [`AssetManager`] and falls back to bundle containers on a miss.

mod asset;
mod asset_subsys;
mod dir;
mod error;
mod packed;
mod reader;
mod registry;
mod std_subsys;
mod subsys;

pub use asset::{Asset, AssetManager};
pub use asset_subsys::{AssetSubsysConfig, AssetSubsystem, DEFAULT_ASSET_PREFIX};
pub use dir::DirAssetManager;
pub use error::FsError;
pub use packed::PackedAssets;
pub use reader::AssetFile;
pub use registry::Filesystem;
pub use std_subsys::StdFileSubsystem;
pub use subsys::FileSubsystem;
