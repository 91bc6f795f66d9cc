//! AssetIO Plugin System
//!
//! Provides everything needed to discover and instantiate manager and UI
//! delegate implementations:
//! - Interfaces (`ManagerInterface`, `UIDelegateInterface`)
//! - Plugins and capability queries (`Plugin`, `ManagerPlugin`, ...)
//! - Loaders and the registry they feed (`PluginLoader`, `PluginSystem`)
//! - Factories (`PluginSystemManagerImplementationFactory`, hybrids)

mod interface;
mod traits;
mod declaration;
mod loader;
mod registry;
mod factory;
mod hybrid;

#[cfg(test)]
mod test_support;

pub use interface::{ManagerInterface, UIDelegateInterface};
pub use traits::{
    Plugin, ManagerPlugin, UIDelegatePlugin,
    Capability, CapabilityMatch, ManagerCapability, UIDelegateCapability,
};
pub use declaration::{PluginDeclaration, ABI_VERSION, CORE_VERSION, ENTRY_POINT};
pub use loader::{LoadedPlugin, PluginLoader, PluginLoadError, NativePluginLoader};
pub use registry::PluginSystem;
pub use factory::{
    ImplementationFactory, PluginSystemFactory, ScanState, PLUGIN_PATH_ENV_VAR,
    PluginSystemManagerImplementationFactory, PluginSystemUIDelegateImplementationFactory,
};
pub use hybrid::{
    BoxedFactory, HybridPluginSystemFactory,
    HybridPluginSystemManagerImplementationFactory, HybridPluginSystemUIDelegateImplementationFactory,
};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        ManagerInterface, UIDelegateInterface,
        Plugin, ManagerPlugin, UIDelegatePlugin,
        ImplementationFactory, PluginSystemManagerImplementationFactory,
    };
    pub use assetio_core::prelude::*;
}
