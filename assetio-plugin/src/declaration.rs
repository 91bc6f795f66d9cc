//! Native plugin entry point
//!
//! A plugin library exports a single [`PluginDeclaration`] under the symbol
//! named by [`ENTRY_POINT`]. Use [`export_plugin!`](crate::export_plugin)
//! rather than writing the static by hand:
//!
//! ```ignore
//! assetio_plugin::export_plugin!(|| Box::new(MyManagerPlugin));
//! ```

use crate::Plugin;

/// Version of `assetio-plugin` a library was built against.
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bumped whenever the layout of [`PluginDeclaration`] or the plugin
/// traits changes in a way that breaks already-built libraries.
pub const ABI_VERSION: u32 = 1;

/// Symbol name looked up in every candidate library.
pub const ENTRY_POINT: &str = "ASSETIO_PLUGIN_DECLARATION";

pub(crate) const ENTRY_POINT_SYMBOL: &[u8] = b"ASSETIO_PLUGIN_DECLARATION\0";

/// Static description exported by a plugin library
///
/// Field order is fixed so the version fields can be read from a library
/// built against a different release.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct PluginDeclaration {
    pub abi_version: u32,
    pub core_version: &'static str,
    /// Builds the plugin. Called once per load.
    pub create: fn() -> Box<dyn Plugin>,
}

impl PluginDeclaration {
    /// Whether a library built with this declaration can be used by the
    /// running host.
    pub fn is_compatible(&self) -> bool {
        self.abi_version == ABI_VERSION && self.core_version == CORE_VERSION
    }
}

/// Export a plugin constructor from a `cdylib`.
#[macro_export]
macro_rules! export_plugin {
    ($create:expr) => {
        #[doc(hidden)]
        #[no_mangle]
        pub static ASSETIO_PLUGIN_DECLARATION: $crate::PluginDeclaration = $crate::PluginDeclaration {
            abi_version: $crate::ABI_VERSION,
            core_version: $crate::CORE_VERSION,
            create: $create,
        };
    };
}
