//! AssetIO Host API
//!
//! What a host application uses to find and talk to asset managers:
//! - `ManagerFactory`: lists available managers and creates them
//! - `Manager`: the host-facing wrapper around a manager implementation
//! - `UIDelegateFactory` and `UIDelegate`: the same for manager UI delegates
//! - `DefaultManagerConfig`: the TOML file naming a default manager

mod manager;
mod factory;
mod config;
mod ui_delegate;
mod ui_factory;

pub use manager::Manager;
pub use factory::{ManagerDetail, ManagerDetails, ManagerFactory, ManagerImplementationFactory};
pub use ui_delegate::UIDelegate;
pub use ui_factory::{UIDelegateDetail, UIDelegateDetails, UIDelegateFactory, UIDelegateImplementationFactory};
pub use config::{DefaultManagerConfig, CONFIG_DIR_VAR, DEFAULT_CONFIG_ENV_VAR};

/// Re-export everything a host needs
pub mod prelude {
    pub use crate::{Manager, ManagerFactory, UIDelegate, UIDelegateFactory, DefaultManagerConfig};
    pub use assetio_plugin::prelude::*;
}
