//! Implementation interfaces produced by plugins
//!
//! These are the manager-side contracts a host drives once a plugin has
//! been instantiated. Only `identifier` and `display_name` are required;
//! everything else has a default that either does nothing or reports the
//! method as not implemented.

use assetio_core::{AssetIoError, EntityReference, InfoDictionary, Result, TraitSet, TraitsData};

fn unimplemented(method: &str, capability: &str) -> AssetIoError {
    AssetIoError::not_implemented(format!(
        "The '{}' method has not been implemented by the manager. Check manager capability for {}.",
        method, capability
    ))
}

fn reject_settings(settings: &InfoDictionary, owner: &str) -> Result<()> {
    if settings.is_empty() {
        return Ok(());
    }
    Err(AssetIoError::input_validation(format!(
        "Settings provided but are not supported. The initialize method has not been implemented by the {}.",
        owner
    )))
}

/// Asset management system implementation
pub trait ManagerInterface: Send + Sync {
    /// Unique, stable identifier, e.g. `"org.example.manager"`.
    fn identifier(&self) -> String;

    fn display_name(&self) -> String;

    fn info(&self) -> Result<InfoDictionary> {
        Ok(InfoDictionary::new())
    }

    fn settings(&self) -> Result<InfoDictionary> {
        Ok(InfoDictionary::new())
    }

    /// Configure the manager. Managers that take no settings reject any.
    fn initialize(&mut self, settings: InfoDictionary) -> Result<()> {
        reject_settings(&settings, "manager")
    }

    fn flush_caches(&mut self) -> Result<()> {
        Ok(())
    }

    /// Resolve `trait_set` for each reference. The result holds one entry
    /// per reference, in the same order.
    fn resolve(&self, entity_references: &[EntityReference], trait_set: &TraitSet) -> Result<Vec<TraitsData>> {
        let _ = (entity_references, trait_set);
        Err(unimplemented("resolve", "resolution"))
    }

    fn is_entity_reference_string(&self, candidate: &str) -> Result<bool> {
        let _ = candidate;
        Err(unimplemented("is_entity_reference_string", "entity reference identification"))
    }
}

/// Manager-supplied UI component
pub trait UIDelegateInterface: Send + Sync {
    fn identifier(&self) -> String;

    fn display_name(&self) -> String;

    fn info(&self) -> Result<InfoDictionary> {
        Ok(InfoDictionary::new())
    }

    fn settings(&self) -> Result<InfoDictionary> {
        Ok(InfoDictionary::new())
    }

    fn initialize(&mut self, settings: InfoDictionary) -> Result<()> {
        reject_settings(&settings, "UI delegate")
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
