//! Host-facing UI delegate

use assetio_core::{InfoDictionary, Result};
use assetio_plugin::UIDelegateInterface;
use std::fmt;

/// A UI delegate implementation as seen by a host
///
/// The delegate is closed when dropped. A failure to close at that point
/// is logged rather than returned.
pub struct UIDelegate {
    interface: Box<dyn UIDelegateInterface>,
}

impl UIDelegate {
    pub fn new(interface: Box<dyn UIDelegateInterface>) -> Self {
        Self { interface }
    }

    pub fn identifier(&self) -> String {
        self.interface.identifier()
    }

    pub fn display_name(&self) -> String {
        self.interface.display_name()
    }

    pub fn info(&self) -> Result<InfoDictionary> {
        self.interface.info()
    }

    pub fn settings(&self) -> Result<InfoDictionary> {
        self.interface.settings()
    }

    pub fn initialize(&mut self, settings: InfoDictionary) -> Result<()> {
        tracing::debug!(ui_delegate = %self.identifier(), "initializing with {} setting(s)", settings.len());
        self.interface.initialize(settings)
    }

    pub fn close(&mut self) -> Result<()> {
        self.interface.close()
    }
}

impl Drop for UIDelegate {
    fn drop(&mut self) {
        if let Err(e) = self.interface.close() {
            tracing::error!("Error closing UI delegate '{}': {}", self.interface.identifier(), e);
        }
    }
}

impl fmt::Debug for UIDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UIDelegate")
            .field("identifier", &self.identifier())
            .finish()
    }
}
