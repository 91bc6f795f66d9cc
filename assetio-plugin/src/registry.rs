//! Plugin Registry

use crate::{LoadedPlugin, NativePluginLoader, PluginLoadError, PluginLoader};
use assetio_core::{AssetIoError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Plugins discovered on a set of search paths, keyed by identifier
pub struct PluginSystem {
    loaders: Vec<Arc<dyn PluginLoader>>,
    plugins: BTreeMap<String, LoadedPlugin>,
}

impl PluginSystem {
    /// A registry with no loaders. Add some with [`Self::with_loader`].
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
            plugins: BTreeMap::new(),
        }
    }

    /// A registry that loads native plugin libraries.
    pub fn native() -> Self {
        Self::new().with_loader(NativePluginLoader::new())
    }

    pub fn with_loader<L: PluginLoader + 'static>(mut self, loader: L) -> Self {
        self.loaders.push(Arc::new(loader));
        self
    }

    pub fn with_loaders(mut self, loaders: impl IntoIterator<Item = Arc<dyn PluginLoader>>) -> Self {
        self.loaders.extend(loaders);
        self
    }

    /// Forget every registered plugin. Loaders are kept.
    pub fn reset(&mut self) {
        self.plugins.clear();
    }

    /// Scan `paths` in order, registering every plugin found.
    ///
    /// Entries of a directory are visited in file-name order. Files that fail
    /// to load are skipped with a warning. When two files report the same
    /// identifier, the one found first is kept.
    pub fn scan<P: AsRef<Path>>(&mut self, paths: &[P]) {
        for path in paths {
            self.scan_directory(path.as_ref());
        }
    }

    fn scan_directory(&mut self, dir: &Path) {
        if !dir.is_dir() {
            tracing::debug!("PluginSystem: Skipping '{}' as it is not a directory", dir.display());
            return;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries.map(|entry| entry.map(|entry| entry.path())),
            Err(e) => {
                tracing::warn!("PluginSystem: Unable to read '{}': {}", dir.display(), e);
                return;
            }
        };
        let entries = readable_entries(dir, entries);

        for path in entries {
            match self.load_candidate(&path) {
                Some(Ok(loaded)) => self.register(loaded),
                Some(Err(e)) => tracing::warn!("PluginSystem: Ignoring plug-in: {}", e),
                None => tracing::debug!("PluginSystem: Ignoring '{}' as no loader handles it", path.display()),
            }
        }
    }

    fn load_candidate(&self, path: &Path) -> Option<std::result::Result<LoadedPlugin, PluginLoadError>> {
        let loader = self.loaders.iter().find(|loader| loader.is_candidate(path))?;
        tracing::debug!("PluginSystem: Loading '{}' with the {} loader", path.display(), loader.name());
        Some(loader.load(path))
    }

    fn register(&mut self, loaded: LoadedPlugin) {
        if let Some(existing) = self.plugins.get(&loaded.identifier) {
            tracing::warn!(
                "PluginSystem: Skipping '{}' from '{}' as the identifier is already registered by '{}'",
                loaded.identifier,
                loaded.path.display(),
                existing.path.display()
            );
            return;
        }
        tracing::debug!(
            "PluginSystem: Registered plug-in '{}' from '{}'",
            loaded.identifier,
            loaded.path.display()
        );
        self.plugins.insert(loaded.identifier.clone(), loaded);
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    pub fn plugin(&self, identifier: &str) -> Result<&LoadedPlugin> {
        self.plugins.get(identifier).ok_or_else(|| {
            AssetIoError::input_validation(format!(
                "PluginSystem: No plug-in registered with the identifier '{}'",
                identifier
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// Sorted entry paths. Entries that cannot be read are logged and skipped.
fn readable_entries(dir: &Path, entries: impl Iterator<Item = io::Result<PathBuf>>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("PluginSystem: Unable to read an entry of '{}': {}", dir.display(), e);
                None
            }
        })
        .collect();
    paths.sort();
    paths
}

impl Default for PluginSystem {
    fn default() -> Self {
        Self::new()
    }
}
