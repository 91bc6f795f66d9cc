//! Plugin traits and capability queries
//!
//! Every loaded plugin is a [`Plugin`]. What it can produce is discovered
//! through explicit capability queries rather than downcasts: a manager
//! plugin answers `Some` from [`Plugin::as_manager_plugin`], a UI delegate
//! plugin from [`Plugin::as_ui_delegate_plugin`].

use crate::{ManagerInterface, UIDelegateInterface};
use assetio_core::Result;

/// A discoverable, identifier-addressed unit
pub trait Plugin: Send + Sync + 'static {
    /// Identifier the plugin is registered under.
    fn identifier(&self) -> String;

    fn as_manager_plugin(&self) -> Option<&(dyn ManagerPlugin + 'static)> {
        None
    }

    fn as_ui_delegate_plugin(&self) -> Option<&(dyn UIDelegatePlugin + 'static)> {
        None
    }
}

/// Plugin producing manager implementations
pub trait ManagerPlugin: Plugin {
    /// A new manager instance. Errors are returned to the caller unchanged.
    fn interface(&self) -> Result<Box<dyn ManagerInterface>>;
}

/// Plugin producing UI delegate implementations
pub trait UIDelegatePlugin: Plugin {
    fn interface(&self) -> Result<Box<dyn UIDelegateInterface>>;
}

/// Outcome of a capability query
pub enum CapabilityMatch<'a, P: ?Sized> {
    Supported(&'a P),
    Unsupported { reason: String },
}

/// A kind of implementation a factory can produce from plugins
pub trait Capability: 'static {
    type Plugin: ?Sized + 'static;
    type Interface;

    /// Short name used in messages, e.g. `"manager"`.
    const NAME: &'static str;

    fn query(plugin: &dyn Plugin) -> CapabilityMatch<'_, Self::Plugin>;

    fn interface(plugin: &Self::Plugin) -> Result<Self::Interface>;
}

/// Manager implementations from [`ManagerPlugin`]s
pub struct ManagerCapability;

impl Capability for ManagerCapability {
    type Plugin = dyn ManagerPlugin;
    type Interface = Box<dyn ManagerInterface>;

    const NAME: &'static str = "manager";

    fn query(plugin: &dyn Plugin) -> CapabilityMatch<'_, Self::Plugin> {
        match plugin.as_manager_plugin() {
            Some(manager) => CapabilityMatch::Supported(manager),
            None => CapabilityMatch::Unsupported {
                reason: "it does not provide a ManagerPlugin".to_string(),
            },
        }
    }

    fn interface(plugin: &Self::Plugin) -> Result<Self::Interface> {
        plugin.interface()
    }
}

/// UI delegate implementations from [`UIDelegatePlugin`]s
pub struct UIDelegateCapability;

impl Capability for UIDelegateCapability {
    type Plugin = dyn UIDelegatePlugin;
    type Interface = Box<dyn UIDelegateInterface>;

    const NAME: &'static str = "UI delegate";

    fn query(plugin: &dyn Plugin) -> CapabilityMatch<'_, Self::Plugin> {
        match plugin.as_ui_delegate_plugin() {
            Some(delegate) => CapabilityMatch::Supported(delegate),
            None => CapabilityMatch::Unsupported {
                reason: "it does not provide a UIDelegatePlugin".to_string(),
            },
        }
    }

    fn interface(plugin: &Self::Plugin) -> Result<Self::Interface> {
        plugin.interface()
    }
}
