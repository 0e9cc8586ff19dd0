use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One indexed file: the lower-cased final path segment and the opaque
/// location it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name_lc: String,
    pub location: String,
}

/// Name to location table.
///
/// Traversal order is the order in which each name was first inserted. A later
/// location with the same name replaces the stored location in place.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    entries: Vec<FileEntry>,
    slots: HashMap<String, usize>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts `location` under `name_lc`, returning the location it replaced.
    pub fn insert(&mut self, name_lc: String, location: String) -> Option<String> {
        if let Some(&slot) = self.slots.get(&name_lc) {
            let previous = std::mem::replace(&mut self.entries[slot].location, location);
            return Some(previous);
        }

        self.slots.insert(name_lc.clone(), self.entries.len());
        self.entries.push(FileEntry { name_lc, location });
        None
    }

    pub fn get(&self, name_lc: &str) -> Option<&str> {
        self.slots
            .get(name_lc)
            .map(|&slot| self.entries[slot].location.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }
}

/// Result of a full rebuild. `processed` counts every input location,
/// including the ones that collapsed onto an existing name.
#[derive(Debug, Clone, Default)]
pub struct IndexBuild {
    pub index: NameIndex,
    pub processed: usize,
}

/// Key used for a location: its final `/` segment, lower-cased.
pub fn name_key(location: &str) -> String {
    let segment = location.rsplit('/').next().unwrap_or(location);
    segment.to_lowercase()
}

pub fn build<I, S>(locations: I) -> IndexBuild
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let locations = locations.into_iter();
    let mut index = NameIndex::with_capacity(locations.size_hint().0);
    let mut processed = 0usize;

    for location in locations {
        let location = location.into();
        let key = name_key(&location);
        if let Some(previous) = index.insert(key, location) {
            tracing::trace!(replaced = %previous, "name collision, keeping later location");
        }
        processed += 1;
    }

    tracing::debug!(processed, names = index.len(), "name index built");
    IndexBuild { index, processed }
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("workspace root not found: {}", .0.display())]
    RootMissing(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("enumeration aborted: {0}")]
    Aborted(String),
}

/// Supplies the locations a rebuild consumes.
pub trait IndexSource {
    fn enumerate(&self) -> impl Future<Output = Result<Vec<String>, IndexError>> + Send;
}
