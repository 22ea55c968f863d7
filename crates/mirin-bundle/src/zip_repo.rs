use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::ops::Range;

use crate::error::BundleError;
use crate::repository::BundleRepository;

/// One ingested archive: every entry decompressed into a single buffer.
#[derive(Debug, Default)]
struct Container {
    data: Vec<u8>,
    entries: HashMap<String, Range<usize>>,
}

impl Container {
    fn entry(&self, name: &str) -> Option<&[u8]> {
        let range = self.entries.get(name)?;
        self.data.get(range.clone())
    }
}

/// [`BundleRepository`] whose containers are zip archives.
#[derive(Debug, Default)]
pub struct ZipBundleRepository {
    containers: HashMap<String, Container>,
}

impl ZipBundleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ingested containers.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Entry names of `container`, sorted. Empty when not loaded.
    pub fn entry_names(&self, container: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .containers
            .get(container)
            .map(|c| c.entries.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    fn parse(container: &str, bytes: &[u8]) -> Result<Container, BundleError> {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(bytes)).map_err(|source| BundleError::Archive {
                container: container.to_owned(),
                source,
            })?;

        let mut out = Container::default();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).map_err(|source| BundleError::Archive {
                container: container.to_owned(),
                source,
            })?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_owned();
            let start = out.data.len();
            file.read_to_end(&mut out.data)
                .map_err(|source| BundleError::Entry {
                    container: container.to_owned(),
                    entry: name.clone(),
                    source,
                })?;
            out.entries.insert(name, start..out.data.len());
        }

        Ok(out)
    }
}

impl BundleRepository for ZipBundleRepository {
    fn get_file_data(&self, container: &str, entry: &str) -> Option<&[u8]> {
        self.containers.get(container)?.entry(entry)
    }

    fn notify(&mut self, container: &str, bytes: &[u8]) -> Result<(), BundleError> {
        if self.containers.contains_key(container) {
            log::debug!("bundle `{container}` already indexed; keeping existing entries");
            return Ok(());
        }

        let parsed = Self::parse(container, bytes)?;
        log::debug!(
            "indexed bundle `{container}`: {} entries, {} bytes",
            parsed.entries.len(),
            parsed.data.len()
        );
        self.containers.insert(container.to_owned(), parsed);
        Ok(())
    }

    fn has_container(&self, container: &str) -> bool {
        self.containers.contains_key(container)
    }
}
