//! Manager factory
//!
//! Lists the managers an implementation factory can provide and creates
//! [`Manager`]s from them, either by identifier or from the default manager
//! config.

use crate::config::{DefaultManagerConfig, DEFAULT_CONFIG_ENV_VAR};
use crate::Manager;
use assetio_core::{InfoDictionary, Result};
use assetio_plugin::{
    ImplementationFactory, ManagerInterface, PluginSystemManagerImplementationFactory, PLUGIN_PATH_ENV_VAR,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Any factory producing manager implementations
pub type ManagerImplementationFactory = dyn ImplementationFactory<Interface = Box<dyn ManagerInterface>>;

/// Summary of one available manager
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerDetail {
    pub identifier: String,
    pub display_name: String,
    pub info: InfoDictionary,
}

/// Details keyed by the identifier the factory lists them under
pub type ManagerDetails = BTreeMap<String, ManagerDetail>;

pub struct ManagerFactory {
    implementation_factory: Arc<ManagerImplementationFactory>,
}

impl ManagerFactory {
    pub fn new(implementation_factory: Arc<ManagerImplementationFactory>) -> Self {
        Self { implementation_factory }
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.implementation_factory.identifiers()
    }

    /// Instantiate every available manager to collect its details.
    pub fn available_managers(&self) -> Result<ManagerDetails> {
        let mut details = ManagerDetails::new();
        for identifier in self.identifiers() {
            let interface = self.implementation_factory.instantiate(&identifier)?;
            details.insert(
                identifier,
                ManagerDetail {
                    identifier: interface.identifier(),
                    display_name: interface.display_name(),
                    info: interface.info()?,
                },
            );
        }
        Ok(details)
    }

    /// An uninitialized manager for `identifier`.
    pub fn create_manager(&self, identifier: &str) -> Result<Manager> {
        Self::create_manager_for_interface(identifier, self.implementation_factory.as_ref())
    }

    pub fn create_manager_for_interface(identifier: &str, factory: &ManagerImplementationFactory) -> Result<Manager> {
        Ok(Manager::new(factory.instantiate(identifier)?))
    }

    /// The initialized default manager named by the file in
    /// `ASSETIO_DEFAULT_CONFIG`, or `None` if the variable is unset.
    pub fn default_manager_for_interface(factory: &ManagerImplementationFactory) -> Result<Option<Manager>> {
        default_manager_from_env(DEFAULT_CONFIG_ENV_VAR, factory)
    }

    /// The initialized manager described by the config file at `config_path`.
    pub fn default_manager_from_config(
        config_path: impl AsRef<Path>,
        factory: &ManagerImplementationFactory,
    ) -> Result<Manager> {
        let config = DefaultManagerConfig::load(config_path)?;
        initialized_manager(config, factory)
    }

    /// Like [`Self::default_manager_from_config`], discovering managers with
    /// the plugin system. The config's `plugin_paths` are searched unless
    /// `ASSETIO_PLUGIN_PATH` is set.
    pub fn default_plugin_manager(config_path: impl AsRef<Path>) -> Result<Manager> {
        plugin_manager_from_config(config_path.as_ref(), PLUGIN_PATH_ENV_VAR)
    }

    /// The default manager named by `ASSETIO_DEFAULT_CONFIG`, discovered with
    /// the plugin system over the config's `plugin_paths`. `None` if the
    /// variable is unset.
    pub fn default_plugin_manager_for_env() -> Result<Option<Manager>> {
        default_plugin_manager_from_env(DEFAULT_CONFIG_ENV_VAR, PLUGIN_PATH_ENV_VAR)
    }
}

pub(crate) fn default_manager_from_env(
    env_var: &str,
    factory: &ManagerImplementationFactory,
) -> Result<Option<Manager>> {
    let Some(config_path) = std::env::var_os(env_var) else {
        tracing::debug!("{} not set, unable to instantiate default manager.", env_var);
        return Ok(None);
    };
    tracing::debug!("Retrieved default manager config file path from '{}'", env_var);
    ManagerFactory::default_manager_from_config(config_path, factory).map(Some)
}

pub(crate) fn default_plugin_manager_from_env(config_env_var: &str, plugin_env_var: &str) -> Result<Option<Manager>> {
    let Some(config_path) = std::env::var_os(config_env_var) else {
        tracing::debug!("{} not set, unable to instantiate default manager.", config_env_var);
        return Ok(None);
    };
    tracing::debug!("Retrieved default manager config file path from '{}'", config_env_var);
    plugin_manager_from_config(Path::new(&config_path), plugin_env_var).map(Some)
}

fn plugin_manager_from_config(config_path: &Path, plugin_env_var: &str) -> Result<Manager> {
    let config = DefaultManagerConfig::load(config_path)?;
    let factory = plugin_factory_for_config(&config, plugin_env_var);
    initialized_manager(config, &factory)
}

pub(crate) fn plugin_factory_for_config(
    config: &DefaultManagerConfig,
    plugin_env_var: &str,
) -> PluginSystemManagerImplementationFactory {
    let factory = PluginSystemManagerImplementationFactory::new().with_env_var(plugin_env_var);
    let Some(paths) = &config.plugin_paths else {
        return factory;
    };
    if std::env::var_os(plugin_env_var).is_some() {
        tracing::warn!("{} environment variable overrides plugin paths in config file", plugin_env_var);
        return factory;
    }
    factory.with_paths(paths.iter().cloned())
}

fn initialized_manager(config: DefaultManagerConfig, factory: &ManagerImplementationFactory) -> Result<Manager> {
    let mut manager = ManagerFactory::create_manager_for_interface(&config.identifier, factory)?;
    manager.initialize(config.settings)?;
    Ok(manager)
}
