//! Plugin loaders
//!
//! A [`PluginLoader`] decides which files in a search directory it
//! understands and turns one of them into a [`LoadedPlugin`]. The registry
//! asks each of its loaders in turn, so further plugin kinds can be added
//! without touching the scan itself.

use crate::declaration::{PluginDeclaration, ABI_VERSION, CORE_VERSION, ENTRY_POINT, ENTRY_POINT_SYMBOL};
use crate::Plugin;
use libloading::Library;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Reasons a candidate file could not become a plugin.
#[derive(Debug, Error)]
pub enum PluginLoadError {
    /// The library could not be opened by the platform loader.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("'{}' does not export the '{symbol}' entry point", path.display())]
    MissingEntryPoint { path: PathBuf, symbol: String },

    /// Built against a different plugin ABI or core version.
    #[error(
        "'{}' was built for ABI {found_abi} (core {found_core}) but this host provides ABI {expected_abi} (core {expected_core})",
        path.display()
    )]
    IncompatibleAbi {
        path: PathBuf,
        expected_abi: u32,
        expected_core: String,
        found_abi: u32,
        found_core: String,
    },

    #[error("'{}' is not a valid plugin: {reason}", path.display())]
    InvalidPlugin { path: PathBuf, reason: String },
}

/// A plugin together with where it came from
#[derive(Clone)]
pub struct LoadedPlugin {
    pub identifier: String,
    pub path: PathBuf,
    pub plugin: Arc<dyn Plugin>,
}

impl LoadedPlugin {
    /// Wrap a freshly created plugin, rejecting an empty identifier.
    pub fn new(path: impl Into<PathBuf>, plugin: Box<dyn Plugin>) -> Result<Self, PluginLoadError> {
        let path = path.into();
        let identifier = plugin.identifier();
        if identifier.is_empty() {
            return Err(PluginLoadError::InvalidPlugin {
                path,
                reason: "plugin identifier is empty".to_string(),
            });
        }
        Ok(Self {
            identifier,
            path,
            plugin: Arc::from(plugin),
        })
    }
}

impl fmt::Debug for LoadedPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedPlugin")
            .field("identifier", &self.identifier)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Strategy for loading one kind of plugin file
pub trait PluginLoader: Send + Sync {
    /// Short name used in log messages, e.g. `"native"`.
    fn name(&self) -> &str;

    /// Whether `path` looks like something this loader handles.
    fn is_candidate(&self, path: &Path) -> bool;

    fn load(&self, path: &Path) -> Result<LoadedPlugin, PluginLoadError>;
}

/// Loads plugins from native dynamic libraries.
///
/// Libraries with a compatible declaration are never unloaded. Plugin
/// objects and the interfaces they create run code from the library for as
/// long as the process lives.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePluginLoader;

impl NativePluginLoader {
    pub fn new() -> Self {
        Self
    }

    fn read_declaration(library: &Library, path: &Path) -> Result<PluginDeclaration, PluginLoadError> {
        // SAFETY: the symbol is a `PluginDeclaration` static emitted by
        // `export_plugin!`; compatibility is checked before `create` runs.
        let declaration = unsafe {
            library
                .get::<*const PluginDeclaration>(ENTRY_POINT_SYMBOL)
                .map(|symbol| **symbol)
        };
        declaration.map_err(|_| PluginLoadError::MissingEntryPoint {
            path: path.to_path_buf(),
            symbol: ENTRY_POINT.to_string(),
        })
    }
}

impl PluginLoader for NativePluginLoader {
    fn name(&self) -> &str {
        "native"
    }

    fn is_candidate(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == std::env::consts::DLL_EXTENSION)
    }

    fn load(&self, path: &Path) -> Result<LoadedPlugin, PluginLoadError> {
        // SAFETY: opening a library runs its initialisers. Search paths are
        // trusted configuration, as with any host loading native plugins.
        let library = unsafe { Library::new(path) }.map_err(|source| PluginLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let declaration = Self::read_declaration(&library, path)?;
        if declaration.abi_version != ABI_VERSION {
            return Err(PluginLoadError::IncompatibleAbi {
                path: path.to_path_buf(),
                expected_abi: ABI_VERSION,
                expected_core: CORE_VERSION.to_string(),
                found_abi: declaration.abi_version,
                found_core: "unknown".to_string(),
            });
        }
        if !declaration.is_compatible() {
            return Err(PluginLoadError::IncompatibleAbi {
                path: path.to_path_buf(),
                expected_abi: ABI_VERSION,
                expected_core: CORE_VERSION.to_string(),
                found_abi: declaration.abi_version,
                found_core: declaration.core_version.to_string(),
            });
        }

        let plugin = (declaration.create)();
        std::mem::forget(library);
        tracing::debug!(path = %path.display(), "loaded native plugin library");
        LoadedPlugin::new(path, plugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_native_candidates_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir
            .path()
            .join(format!("plugin.{}", std::env::consts::DLL_EXTENSION));
        let text = dir.path().join("readme.txt");
        fs::write(&library, b"").unwrap();
        fs::write(&text, b"").unwrap();

        let loader = NativePluginLoader::new();
        assert!(loader.is_candidate(&library));
        assert!(!loader.is_candidate(&text));
        assert!(!loader.is_candidate(dir.path()));
    }

    #[test]
    fn test_native_rejects_garbage_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join(format!("garbage.{}", std::env::consts::DLL_EXTENSION));
        fs::write(&path, b"definitely not a shared object").unwrap();

        let err = NativePluginLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, PluginLoadError::Open { .. }));
        assert!(err.to_string().contains("garbage"));
    }

    #[test]
    fn test_load_error_messages_name_path() {
        let err = PluginLoadError::MissingEntryPoint {
            path: PathBuf::from("/plugins/a.so"),
            symbol: ENTRY_POINT.to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'/plugins/a.so' does not export the 'ASSETIO_PLUGIN_DECLARATION' entry point"
        );

        let err = PluginLoadError::IncompatibleAbi {
            path: PathBuf::from("/plugins/b.so"),
            expected_abi: 1,
            expected_core: "0.1.0".into(),
            found_abi: 2,
            found_core: "0.2.0".into(),
        };
        assert!(err.to_string().contains("ABI 2 (core 0.2.0)"));
    }

    struct Nameless;

    impl Plugin for Nameless {
        fn identifier(&self) -> String {
            String::new()
        }
    }

    #[test]
    fn test_empty_identifier_is_invalid() {
        let err = LoadedPlugin::new("/plugins/nameless.so", Box::new(Nameless)).unwrap_err();
        assert!(matches!(err, PluginLoadError::InvalidPlugin { .. }));
    }
}
