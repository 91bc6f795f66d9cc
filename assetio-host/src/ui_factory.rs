//! UI delegate factory
//!
//! The UI counterpart of [`ManagerFactory`](crate::ManagerFactory). The
//! default UI delegate shares the default manager config: it is the
//! delegate registered under the manager's identifier, initialized with
//! the `[uiDelegate.settings]` table.

use crate::config::{DefaultManagerConfig, DEFAULT_CONFIG_ENV_VAR};
use crate::UIDelegate;
use assetio_core::{InfoDictionary, Result};
use assetio_plugin::{ImplementationFactory, UIDelegateInterface};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Any factory producing UI delegate implementations
pub type UIDelegateImplementationFactory = dyn ImplementationFactory<Interface = Box<dyn UIDelegateInterface>>;

/// Summary of one available UI delegate
#[derive(Debug, Clone, PartialEq)]
pub struct UIDelegateDetail {
    pub identifier: String,
    pub display_name: String,
    pub info: InfoDictionary,
}

pub type UIDelegateDetails = BTreeMap<String, UIDelegateDetail>;

pub struct UIDelegateFactory {
    implementation_factory: Arc<UIDelegateImplementationFactory>,
}

impl UIDelegateFactory {
    pub fn new(implementation_factory: Arc<UIDelegateImplementationFactory>) -> Self {
        Self { implementation_factory }
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.implementation_factory.identifiers()
    }

    /// Instantiate every available UI delegate to collect its details.
    pub fn available_ui_delegates(&self) -> Result<UIDelegateDetails> {
        let mut details = UIDelegateDetails::new();
        for identifier in self.identifiers() {
            let interface = self.implementation_factory.instantiate(&identifier)?;
            details.insert(
                identifier,
                UIDelegateDetail {
                    identifier: interface.identifier(),
                    display_name: interface.display_name(),
                    info: interface.info()?,
                },
            );
        }
        Ok(details)
    }

    /// An uninitialized UI delegate for `identifier`.
    pub fn create_ui_delegate(&self, identifier: &str) -> Result<UIDelegate> {
        Self::create_ui_delegate_for_interface(identifier, self.implementation_factory.as_ref())
    }

    pub fn create_ui_delegate_for_interface(
        identifier: &str,
        factory: &UIDelegateImplementationFactory,
    ) -> Result<UIDelegate> {
        Ok(UIDelegate::new(factory.instantiate(identifier)?))
    }

    /// The initialized default UI delegate for the config in
    /// `ASSETIO_DEFAULT_CONFIG`, or `None` if the variable is unset.
    pub fn default_ui_delegate_for_interface(factory: &UIDelegateImplementationFactory) -> Result<Option<UIDelegate>> {
        default_ui_delegate_from_env(DEFAULT_CONFIG_ENV_VAR, factory)
    }

    pub fn default_ui_delegate_from_config(
        config_path: impl AsRef<Path>,
        factory: &UIDelegateImplementationFactory,
    ) -> Result<UIDelegate> {
        let config = DefaultManagerConfig::load_for_ui_delegate(config_path.as_ref())?;
        let mut delegate = Self::create_ui_delegate_for_interface(&config.identifier, factory)?;
        delegate.initialize(config.ui_delegate_settings)?;
        Ok(delegate)
    }
}

pub(crate) fn default_ui_delegate_from_env(
    env_var: &str,
    factory: &UIDelegateImplementationFactory,
) -> Result<Option<UIDelegate>> {
    let Some(config_path) = std::env::var_os(env_var) else {
        tracing::debug!("{} not set, unable to instantiate default UI delegate.", env_var);
        return Ok(None);
    };
    tracing::debug!("Retrieved default UI delegate config file path from '{}'", env_var);
    UIDelegateFactory::default_ui_delegate_from_config(config_path, factory).map(Some)
}
