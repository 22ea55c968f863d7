//! Bundle repository.
//!
//! A bundle is an archive file shipped as a single packaged asset. Once its
//! bytes are handed to a [`BundleRepository`], the entries inside it can be
//! served by name without re-opening the archive.
//!
//! ```no_run
//! use mirin_bundle::{BundleRepository, ZipBundleRepository};
//!
//! let mut repo = ZipBundleRepository::new();
//! let bytes = std::fs::read("textures.zip").unwrap();
//! repo.notify("ui/textures.zip", &bytes).unwrap();
//! let icon = repo.get_file_data("ui/textures.zip", "icon.png");
//! ```

pub mod error;
pub mod repository;
pub mod zip_repo;

pub use error::BundleError;
pub use repository::{shared, BundleRepository, SharedBundleRepository};
pub use zip_repo::ZipBundleRepository;
