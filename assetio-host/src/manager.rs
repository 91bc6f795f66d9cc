//! Host-facing manager

use assetio_core::{
    AssetIoError, EntityReference, InfoDictionary, Result, TraitSet, TraitsData,
};
use assetio_plugin::ManagerInterface;
use std::fmt;

/// A manager implementation as seen by a host
pub struct Manager {
    interface: Box<dyn ManagerInterface>,
}

impl Manager {
    pub fn new(interface: Box<dyn ManagerInterface>) -> Self {
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
        tracing::debug!(manager = %self.identifier(), "initializing with {} setting(s)", settings.len());
        self.interface.initialize(settings)
    }

    pub fn flush_caches(&mut self) -> Result<()> {
        self.interface.flush_caches()
    }

    pub fn is_entity_reference_string(&self, candidate: &str) -> Result<bool> {
        self.interface.is_entity_reference_string(candidate)
    }

    /// Wrap `candidate` if the manager recognises it as one of its references.
    pub fn create_entity_reference(&self, candidate: &str) -> Result<EntityReference> {
        if !self.is_entity_reference_string(candidate)? {
            return Err(AssetIoError::input_validation(format!(
                "Invalid entity reference: {}",
                candidate
            )));
        }
        Ok(EntityReference::new(candidate))
    }

    /// Resolve `trait_set` for each reference.
    ///
    /// Results correlate with `entity_references` by position.
    pub fn resolve(&self, entity_references: &[EntityReference], trait_set: &TraitSet) -> Result<Vec<TraitsData>> {
        let results = self.interface.resolve(entity_references, trait_set)?;
        if results.len() != entity_references.len() {
            return Err(AssetIoError::input_validation(format!(
                "Manager '{}' resolved {} result(s) for {} entity reference(s)",
                self.identifier(),
                results.len(),
                entity_references.len()
            )));
        }
        Ok(results)
    }

    pub fn resolve_one(&self, entity_reference: &EntityReference, trait_set: &TraitSet) -> Result<TraitsData> {
        let mut results = self.resolve(std::slice::from_ref(entity_reference), trait_set)?;
        results
            .pop()
            .ok_or_else(|| AssetIoError::input_validation("Manager returned no result"))
    }
}

impl fmt::Debug for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("identifier", &self.identifier())
            .finish()
    }
}
