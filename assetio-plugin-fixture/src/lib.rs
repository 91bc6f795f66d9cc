//! Native manager plugin used to exercise `NativePluginLoader`
//!
//! The default build exports a compatible declaration through
//! `export_plugin!`. The `foreign-abi` and `no-entry-point` features build
//! the libraries a host must refuse.

use assetio_core::{InfoDictionary, PropertyValue, Result};
use assetio_plugin::{ManagerInterface, ManagerPlugin, Plugin};

pub const IDENTIFIER: &str = "org.example.native";

struct FixturePlugin;

impl Plugin for FixturePlugin {
    fn identifier(&self) -> String {
        IDENTIFIER.to_string()
    }

    fn as_manager_plugin(&self) -> Option<&(dyn ManagerPlugin + 'static)> {
        Some(self)
    }
}

impl ManagerPlugin for FixturePlugin {
    fn interface(&self) -> Result<Box<dyn ManagerInterface>> {
        Ok(Box::new(FixtureManager))
    }
}

struct FixtureManager;

impl ManagerInterface for FixtureManager {
    fn identifier(&self) -> String {
        IDENTIFIER.to_string()
    }

    fn display_name(&self) -> String {
        "Native Fixture".to_string()
    }

    fn info(&self) -> Result<InfoDictionary> {
        let mut info = InfoDictionary::new();
        info.insert("entity_reference_prefix".into(), PropertyValue::from("native://"));
        Ok(info)
    }
}

#[allow(dead_code)]
fn create() -> Box<dyn Plugin> {
    Box::new(FixturePlugin)
}

#[cfg(not(any(feature = "foreign-abi", feature = "no-entry-point")))]
assetio_plugin::export_plugin!(create);

#[cfg(all(feature = "foreign-abi", not(feature = "no-entry-point")))]
#[no_mangle]
pub static ASSETIO_PLUGIN_DECLARATION: assetio_plugin::PluginDeclaration = assetio_plugin::PluginDeclaration {
    abi_version: assetio_plugin::ABI_VERSION + 1,
    core_version: assetio_plugin::CORE_VERSION,
    create,
};
