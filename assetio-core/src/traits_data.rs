//! Trait property storage
//!
//! [`TraitsData`] maps trait identifiers to [`TraitProperties`], which in
//! turn map property keys to [`PropertyValue`]s. It is the unit of data
//! passed between host and manager for a single entity. It holds no
//! reference to the entity it describes; callers correlate results with
//! their entity references by position.

use crate::{AssetIoError, PropertyValue, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Trait unique identifier, e.g. `"blob"`
pub type TraitId = String;

/// Property key within a trait
pub type PropertyKey = String;

/// Unordered set of trait identifiers
pub type TraitSet = BTreeSet<TraitId>;

/// Properties of a single trait
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitProperties {
    values: HashMap<PropertyKey, PropertyValue>,
}

impl TraitProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`, or `None` if the key was never set.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    /// Store `value` under `key`. An empty key is rejected and the
    /// properties are left untouched.
    pub fn set(&mut self, key: impl Into<PropertyKey>, value: impl Into<PropertyValue>) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(AssetIoError::empty_argument("property key"));
        }
        self.values.insert(key, value.into());
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> BTreeSet<PropertyKey> {
        self.values.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Trait data for one entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitsData {
    traits: HashMap<TraitId, TraitProperties>,
}

impl TraitsData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data imbued with every trait in `trait_ids`, with no properties set.
    pub fn from_trait_set<I, S>(trait_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<TraitId>,
    {
        let mut data = Self::new();
        data.add_traits(trait_ids)?;
        Ok(data)
    }

    /// Number of traits present (including traits with no properties).
    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    /// Identifiers of all traits present
    pub fn trait_ids(&self) -> TraitSet {
        self.traits.keys().cloned().collect()
    }

    /// True if the trait is present, even when it has no properties set.
    pub fn has_trait(&self, trait_id: &str) -> bool {
        self.traits.contains_key(trait_id)
    }

    pub fn has_trait_property(&self, trait_id: &str, key: &str) -> bool {
        self.traits
            .get(trait_id)
            .is_some_and(|props| props.contains(key))
    }

    /// Add a trait with no properties. Existing properties are kept.
    pub fn add_trait(&mut self, trait_id: impl Into<TraitId>) -> Result<()> {
        let trait_id = trait_id.into();
        if trait_id.is_empty() {
            return Err(AssetIoError::empty_argument("trait id"));
        }
        self.traits.entry(trait_id).or_default();
        Ok(())
    }

    /// Add several traits. Identifiers are validated before any is added.
    pub fn add_traits<I, S>(&mut self, trait_ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<TraitId>,
    {
        let trait_ids: Vec<TraitId> = trait_ids.into_iter().map(Into::into).collect();
        if trait_ids.iter().any(String::is_empty) {
            return Err(AssetIoError::empty_argument("trait id"));
        }
        for trait_id in trait_ids {
            self.traits.entry(trait_id).or_default();
        }
        Ok(())
    }

    /// Value of a property, or `None` if the trait or key is absent.
    pub fn get_trait_property(&self, trait_id: &str, key: &str) -> Option<&PropertyValue> {
        self.traits.get(trait_id).and_then(|props| props.get(key))
    }

    /// Set a property, adding the trait if needed. Empty identifiers or
    /// keys are rejected without modifying the data.
    pub fn set_trait_property(
        &mut self,
        trait_id: impl Into<TraitId>,
        key: impl Into<PropertyKey>,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        let trait_id = trait_id.into();
        let key = key.into();
        if trait_id.is_empty() {
            return Err(AssetIoError::empty_argument("trait id"));
        }
        if key.is_empty() {
            return Err(AssetIoError::empty_argument("property key"));
        }
        self.traits.entry(trait_id).or_default().set(key, value)
    }

    pub fn trait_properties(&self, trait_id: &str) -> Option<&TraitProperties> {
        self.traits.get(trait_id)
    }

    /// Keys set for a trait; empty if the trait is absent.
    pub fn trait_property_keys(&self, trait_id: &str) -> BTreeSet<PropertyKey> {
        self.traits
            .get(trait_id)
            .map(TraitProperties::keys)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TraitId, &TraitProperties)> {
        self.traits.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PropertyKind;

    #[test]
    fn test_round_trip_preserves_kind() {
        let mut data = TraitsData::new();
        data.set_trait_property("a trait id", "a string", "string").unwrap();
        data.set_trait_property("a trait id", "an int", 1).unwrap();
        data.set_trait_property("a trait id", "a float", 1.0).unwrap();
        data.set_trait_property("a trait id", "a bool", true).unwrap();

        let get = |key| data.get_trait_property("a trait id", key).unwrap();
        assert_eq!(get("a string"), &PropertyValue::Str("string".into()));
        assert_eq!(get("an int").kind(), PropertyKind::Int);
        assert_eq!(get("an int"), &PropertyValue::Int(1));
        assert_eq!(get("a float").kind(), PropertyKind::Float);
        assert_eq!(get("a bool"), &PropertyValue::Bool(true));
    }

    #[test]
    fn test_missing_key_is_none() {
        let mut data = TraitsData::new();
        assert!(data.get_trait_property("a trait id", "a string").is_none());

        data.set_trait_property("a trait id", "an int", 1).unwrap();
        assert!(data.get_trait_property("a trait id", "a string").is_none());
        assert!(data.get_trait_property("other", "an int").is_none());
    }

    #[test]
    fn test_empty_trait_is_present_but_has_no_properties() {
        let mut data = TraitsData::new();
        data.add_trait("blob").unwrap();

        assert!(data.has_trait("blob"));
        assert!(!data.has_trait_property("blob", "url"));
        assert!(data.get_trait_property("blob", "url").is_none());
        assert!(!data.has_trait("other"));
    }

    #[test]
    fn test_empty_identifiers_rejected_without_mutation() {
        let mut data = TraitsData::new();
        assert!(data.set_trait_property("", "key", 1).is_err());
        assert!(data.set_trait_property("t", "", 1).is_err());
        assert!(data.add_traits(["ok", ""]).is_err());
        assert!(data.is_empty());
    }

    #[test]
    fn test_trait_ids_are_unique() {
        let mut data = TraitsData::from_trait_set(["a", "b"]).unwrap();
        data.set_trait_property("a", "k", "v").unwrap();
        data.add_trait("b").unwrap();

        let ids: Vec<_> = data.trait_ids().into_iter().collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_overwrite_changes_kind() {
        let mut data = TraitsData::new();
        data.set_trait_property("t", "k", 1).unwrap();
        data.set_trait_property("t", "k", "one").unwrap();
        assert_eq!(data.get_trait_property("t", "k").unwrap().as_str(), Some("one"));
        assert_eq!(data.trait_property_keys("t").len(), 1);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = TraitsData::new();
        a.set_trait_property("t", "x", 1).unwrap();
        a.set_trait_property("t", "y", 2).unwrap();

        let mut b = TraitsData::new();
        b.set_trait_property("t", "y", 2).unwrap();
        b.set_trait_property("t", "x", 1).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_properties_reject_empty_key() {
        let mut props = TraitProperties::new();
        assert!(props.set("", "v").is_err());
        assert!(props.is_empty());
        props.set("k", "v").unwrap();
        assert!(props.contains("k"));
        assert_eq!(props.len(), 1);
    }
}
