use std::sync::{Arc, Mutex};

use crate::error::BundleError;

/// Index of loaded containers and the named entries inside them.
///
/// Containers are identified by the raw path they were loaded from
/// (e.g. `"sounds/sfx.zip"`), entries by their name inside the archive.
/// Once a container is ingested its entries never change.
pub trait BundleRepository {
    /// Returns the bytes of `entry` inside `container`, if both are indexed.
    fn get_file_data(&self, container: &str, entry: &str) -> Option<&[u8]>;

    /// Parses `bytes` as container `container` and indexes its entries.
    fn notify(&mut self, container: &str, bytes: &[u8]) -> Result<(), BundleError>;

    /// Whether `container` has already been ingested.
    fn has_container(&self, container: &str) -> bool;
}

/// Repository handle shared between the subsystems of one filesystem.
///
/// Lookups and lazy ingestion both go through the mutex; a caller that holds
/// the guard across miss, ingest and re-query sees a consistent index.
pub type SharedBundleRepository = Arc<Mutex<dyn BundleRepository + Send>>;

/// Wraps a concrete repository into a [`SharedBundleRepository`].
pub fn shared<R>(repo: R) -> SharedBundleRepository
where
    R: BundleRepository + Send + 'static,
{
    Arc::new(Mutex::new(repo))
}
