use std::path::{Path, PathBuf};

use asearch_config::Settings;
use asearch_index::{IndexError, IndexSource};
use walkdir::{DirEntry, WalkDir};

/// Enumerates every file under the workspace root as a `file://` location.
#[derive(Debug, Clone)]
pub struct WalkDirSource {
    settings: Settings,
}

impl WalkDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_settings(&Settings {
            root: root.into(),
            ..Settings::default()
        })
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.settings.root
    }

    fn skip_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        if !self.settings.include_hidden && name.starts_with('.') {
            return true;
        }

        entry.file_type().is_dir() && self.settings.is_excluded_dir(&name)
    }

    fn walk(&self) -> Result<Vec<String>, IndexError> {
        let root = self.root();
        if !root.is_dir() {
            return Err(IndexError::RootMissing(root.to_path_buf()));
        }

        let root = std::path::absolute(root).map_err(|source| IndexError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let mut out = Vec::new();
        let mut skipped = 0usize;
        for entry in WalkDir::new(&root)
            .follow_links(self.settings.follow_links)
            .into_iter()
            .filter_entry(|entry| !self.skip_entry(entry))
        {
            let entry = entry.map_err(|err| {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                let message = err.to_string();
                match err.into_io_error() {
                    Some(source) => IndexError::Io { path, source },
                    None => IndexError::Aborted(message),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(location) = location_for_path(entry.path()) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 path");
                skipped += 1;
                continue;
            };

            out.push(location);
            if out.len().is_multiple_of(10_000) {
                tracing::debug!(scanned = out.len(), "enumeration progress");
            }
        }

        if skipped > 0 {
            tracing::info!(skipped, "paths left out of the index");
        }
        Ok(out)
    }
}

impl IndexSource for WalkDirSource {
    async fn enumerate(&self) -> Result<Vec<String>, IndexError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.walk())
            .await
            .map_err(|err| IndexError::Aborted(err.to_string()))?
    }
}

/// `file://` location for a path, e.g. `file:///home/me/a.txt` or
/// `file:///C:/dir/a.txt`. Only Windows separators are rewritten; on other
/// platforms `\` is an ordinary file name character.
///
/// Returns `None` for paths that are not valid UTF-8.
pub fn location_for_path(path: &Path) -> Option<String> {
    let raw = path.to_str()?;
    let raw = if cfg!(windows) {
        raw.replace('\\', "/")
    } else {
        raw.to_string()
    };

    if raw.starts_with('/') {
        Some(format!("file://{}", raw))
    } else {
        Some(format!("file:///{}", raw))
    }
}
