//! Typed trait views
//!
//! A trait view wraps a [`TraitStore`] together with a fixed trait
//! identifier and exposes named accessors for that trait's properties.
//! Views never copy the properties: reads and writes go straight to the
//! wrapped [`TraitsData`].

mod blob;

pub use blob::{Blob, BlobTrait};

use crate::{AssetIoError, PropertyKind, PropertyValue, Result, Specification, TraitsData};
use serde::Serialize;
use std::marker::PhantomData;

/// Metadata about a trait property
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PropertyDef {
    pub key: &'static str,
    pub kind: PropertyKind,
    pub description: &'static str,
}

impl PropertyDef {
    pub const fn new(key: &'static str, kind: PropertyKind, description: &'static str) -> Self {
        Self { key, kind, description }
    }
}

/// Static description of a trait: its identifier and known properties
pub trait TraitSchema {
    const ID: &'static str;
    const PROPERTIES: &'static [PropertyDef];

    fn property(key: &str) -> Option<&'static PropertyDef> {
        Self::PROPERTIES.iter().find(|def| def.key == key)
    }
}

/// Status of a trait property within some data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitPropertyStatus {
    Found,
    Missing,
    /// Present, but not of the kind the trait declares.
    InvalidValue,
}

/// Something a trait view knows how to address.
///
/// Returning `None` means the store holds no data the view can read or
/// write, which is what [`TraitView::is_valid`] reports.
pub trait TraitStore {
    fn traits_data(&self) -> Option<&TraitsData>;
    fn traits_data_mut(&mut self) -> Option<&mut TraitsData>;
}

impl TraitStore for TraitsData {
    fn traits_data(&self) -> Option<&TraitsData> {
        Some(self)
    }

    fn traits_data_mut(&mut self) -> Option<&mut TraitsData> {
        Some(self)
    }
}

impl TraitStore for Specification {
    fn traits_data(&self) -> Option<&TraitsData> {
        Some(self.data())
    }

    fn traits_data_mut(&mut self) -> Option<&mut TraitsData> {
        Some(self.data_mut())
    }
}

impl<S: TraitStore> TraitStore for Option<S> {
    fn traits_data(&self) -> Option<&TraitsData> {
        self.as_ref().and_then(TraitStore::traits_data)
    }

    fn traits_data_mut(&mut self) -> Option<&mut TraitsData> {
        self.as_mut().and_then(TraitStore::traits_data_mut)
    }
}

impl<S: TraitStore + ?Sized> TraitStore for &S {
    fn traits_data(&self) -> Option<&TraitsData> {
        (**self).traits_data()
    }

    fn traits_data_mut(&mut self) -> Option<&mut TraitsData> {
        None
    }
}

impl<S: TraitStore + ?Sized> TraitStore for &mut S {
    fn traits_data(&self) -> Option<&TraitsData> {
        (**self).traits_data()
    }

    fn traits_data_mut(&mut self) -> Option<&mut TraitsData> {
        (**self).traits_data_mut()
    }
}

impl<S: TraitStore + ?Sized> TraitStore for Box<S> {
    fn traits_data(&self) -> Option<&TraitsData> {
        (**self).traits_data()
    }

    fn traits_data_mut(&mut self) -> Option<&mut TraitsData> {
        (**self).traits_data_mut()
    }
}

/// Typed view of one trait over a store
pub struct TraitView<T: TraitSchema, S: TraitStore> {
    store: S,
    _schema: PhantomData<fn() -> T>,
}

impl<T: TraitSchema, S: TraitStore> TraitView<T, S> {
    pub fn new(store: S) -> Self {
        Self { store, _schema: PhantomData }
    }

    pub fn trait_id() -> &'static str {
        T::ID
    }

    /// Whether the wrapped store holds data this view can address. This
    /// does not check that the trait itself is present.
    pub fn is_valid(&self) -> bool {
        self.store.traits_data().is_some()
    }

    /// Whether the trait is present in the wrapped data.
    pub fn is_imbued(&self) -> bool {
        self.data().is_some_and(|data| data.has_trait(T::ID))
    }

    /// Add the trait to the wrapped data without setting any property.
    pub fn imbue(&mut self) -> Result<()> {
        self.data_mut()?.add_trait(T::ID)
    }

    pub fn data(&self) -> Option<&TraitsData> {
        self.store.traits_data()
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn property_status(&self, key: &str) -> TraitPropertyStatus {
        match (self.raw(key), T::property(key)) {
            (None, _) => TraitPropertyStatus::Missing,
            (Some(value), Some(def)) if value.kind() != def.kind => TraitPropertyStatus::InvalidValue,
            (Some(_), _) => TraitPropertyStatus::Found,
        }
    }

    /// Read a declared property. Missing properties, and views over a store
    /// with no addressable data, read as `None`.
    pub fn get(&self, key: &str) -> Result<Option<&PropertyValue>> {
        Self::declared(key)?;
        Ok(self.raw(key))
    }

    /// Write a declared property after checking the value's kind. A
    /// rejected write leaves the data untouched.
    pub fn set(&mut self, key: &str, value: impl Into<PropertyValue>) -> Result<()> {
        let def = Self::declared(key)?;
        let value = value.into();
        if value.kind() != def.kind {
            return Err(AssetIoError::kind_mismatch(key, def.kind.name(), value.type_name()));
        }
        self.data_mut()?.set_trait_property(T::ID, key, value)
    }

    /// Read a string property, failing if a value of another kind is stored.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key)? {
            None => Ok(None),
            Some(PropertyValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(AssetIoError::kind_mismatch(key, PropertyKind::Str.name(), other.type_name())),
        }
    }

    fn raw(&self, key: &str) -> Option<&PropertyValue> {
        self.data().and_then(|data| data.get_trait_property(T::ID, key))
    }

    fn data_mut(&mut self) -> Result<&mut TraitsData> {
        self.store.traits_data_mut().ok_or_else(|| {
            AssetIoError::input_validation(format!(
                "trait view '{}' is not backed by writable traits data",
                T::ID
            ))
        })
    }

    fn declared(key: &str) -> Result<&'static PropertyDef> {
        T::property(key).ok_or_else(|| {
            AssetIoError::input_validation(format!("'{}' is not a property of trait '{}'", key, T::ID))
        })
    }
}
