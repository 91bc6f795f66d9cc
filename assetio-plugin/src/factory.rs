//! Implementation factories backed by the plugin system
//!
//! A [`PluginSystemFactory`] owns a [`PluginSystem`] that is populated the
//! first time anyone asks for identifiers or an instance. Which plugins it
//! offers is decided by its [`Capability`]: the manager factory only lists
//! plugins that provide a `ManagerPlugin`, the UI delegate factory only those
//! providing a `UIDelegatePlugin`.

use crate::{
    Capability, CapabilityMatch, ManagerCapability, NativePluginLoader, PluginLoader, PluginSystem,
    UIDelegateCapability,
};
use assetio_core::{AssetIoError, Result};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Environment variable holding plugin search paths, separated by the
/// platform path delimiter (`:` on Unix, `;` on Windows).
pub const PLUGIN_PATH_ENV_VAR: &str = "ASSETIO_PLUGIN_PATH";

/// Lists and instantiates implementations by identifier
pub trait ImplementationFactory: Send + Sync {
    type Interface;

    /// Identifiers of every implementation this factory can instantiate.
    fn identifiers(&self) -> Vec<String>;

    fn instantiate(&self, identifier: &str) -> Result<Self::Interface>;
}

/// Lifecycle of a lazily scanned factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Unscanned,
    Scanning,
    Scanned,
}

struct Catalogue {
    system: PluginSystem,
    /// Identifier to the reason it cannot be offered.
    incompatible: BTreeMap<String, String>,
}

/// Factory producing `C::Interface` from plugins found on search paths
pub struct PluginSystemFactory<C: Capability> {
    paths: Vec<PathBuf>,
    env_var: String,
    loaders: Vec<Arc<dyn PluginLoader>>,
    catalogue: OnceLock<Catalogue>,
    scanning: AtomicBool,
    _capability: PhantomData<fn() -> C>,
}

/// Manager implementations from plugins
pub type PluginSystemManagerImplementationFactory = PluginSystemFactory<ManagerCapability>;

/// UI delegate implementations from plugins
pub type PluginSystemUIDelegateImplementationFactory = PluginSystemFactory<UIDelegateCapability>;

impl<C: Capability> PluginSystemFactory<C> {
    /// A factory searching the paths in [`PLUGIN_PATH_ENV_VAR`] for native
    /// plugin libraries.
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            env_var: PLUGIN_PATH_ENV_VAR.to_string(),
            loaders: vec![Arc::new(NativePluginLoader::new())],
            catalogue: OnceLock::new(),
            scanning: AtomicBool::new(false),
            _capability: PhantomData,
        }
    }

    /// Search `paths` instead of the environment. An empty list still
    /// falls back to the environment variable.
    pub fn with_paths<P: Into<PathBuf>>(mut self, paths: impl IntoIterator<Item = P>) -> Self {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Read search paths from `name` rather than [`PLUGIN_PATH_ENV_VAR`].
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Replace the loaders used when scanning.
    pub fn with_loaders(mut self, loaders: impl IntoIterator<Item = Arc<dyn PluginLoader>>) -> Self {
        self.loaders = loaders.into_iter().collect();
        self
    }

    /// Explicitly configured search paths, empty when the environment is used.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn state(&self) -> ScanState {
        if self.catalogue.get().is_some() {
            ScanState::Scanned
        } else if self.scanning.load(Ordering::Acquire) {
            ScanState::Scanning
        } else {
            ScanState::Unscanned
        }
    }

    /// Discard the scan results. The next query scans again, re-reading
    /// the environment.
    pub fn reset(&mut self) {
        self.catalogue = OnceLock::new();
    }

    fn search_paths(&self) -> Vec<PathBuf> {
        let paths: Vec<PathBuf> = if self.paths.is_empty() {
            std::env::var_os(&self.env_var)
                .map(|value| std::env::split_paths(&value).collect())
                .unwrap_or_default()
        } else {
            self.paths.clone()
        };
        let paths: Vec<PathBuf> = paths
            .into_iter()
            .filter(|path| !path.as_os_str().is_empty())
            .collect();

        if paths.is_empty() {
            tracing::warn!(
                "No search paths specified, no plugins will load - check ${} is set",
                self.env_var
            );
        }
        paths
    }

    fn catalogue(&self) -> &Catalogue {
        self.catalogue.get_or_init(|| {
            self.scanning.store(true, Ordering::Release);
            let catalogue = self.scan();
            self.scanning.store(false, Ordering::Release);
            catalogue
        })
    }

    fn scan(&self) -> Catalogue {
        let mut system = PluginSystem::new().with_loaders(self.loaders.iter().cloned());
        system.scan(self.search_paths().as_slice());

        let mut incompatible = BTreeMap::new();
        for identifier in system.identifiers() {
            let Ok(loaded) = system.plugin(&identifier) else {
                continue;
            };
            if let CapabilityMatch::Unsupported { reason } = C::query(loaded.plugin.as_ref()) {
                let message = incompatible_message::<C>(&identifier, loaded.path.display(), &reason);
                tracing::warn!("{}", message);
                incompatible.insert(identifier, message);
            }
        }
        Catalogue { system, incompatible }
    }
}

fn incompatible_message<C: Capability>(identifier: &str, path: impl std::fmt::Display, reason: &str) -> String {
    format!(
        "Plugin '{}' from '{}' is not a {} plugin as {}",
        identifier,
        path,
        C::NAME,
        reason
    )
}

impl<C: Capability> Default for PluginSystemFactory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Capability> ImplementationFactory for PluginSystemFactory<C> {
    type Interface = C::Interface;

    fn identifiers(&self) -> Vec<String> {
        let catalogue = self.catalogue();
        catalogue
            .system
            .identifiers()
            .into_iter()
            .filter(|identifier| !catalogue.incompatible.contains_key(identifier))
            .collect()
    }

    fn instantiate(&self, identifier: &str) -> Result<C::Interface> {
        let loaded = self.catalogue().system.plugin(identifier)?;
        match C::query(loaded.plugin.as_ref()) {
            CapabilityMatch::Supported(plugin) => C::interface(plugin),
            CapabilityMatch::Unsupported { reason } => Err(AssetIoError::input_validation(
                incompatible_message::<C>(identifier, loaded.path.display(), &reason),
            )),
        }
    }
}
