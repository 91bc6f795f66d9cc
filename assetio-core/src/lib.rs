//! AssetIO Core - Fundamental types
//!
//! This crate provides the data model shared by hosts and managers:
//! - `PropertyValue`: string, integer, float or boolean property values
//! - `TraitsData`: per-entity trait properties keyed by trait identifier
//! - `TraitView`: typed accessors for a single trait (e.g. `BlobTrait`)
//! - `AssetIoError`: the error taxonomy surfaced at every public boundary

mod value;
mod traits_data;
mod specification;
mod entity;
mod error;

pub mod bridge;
pub mod traits;

pub use value::{PropertyValue, PropertyKind, InfoDictionary};
pub use traits_data::{TraitProperties, TraitsData, TraitId, PropertyKey, TraitSet};
pub use specification::{Specification, SpecificationType, BlobSpecification};
pub use entity::{EntityReference, EntityReferences};
pub use error::{AssetIoError, Result, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{PropertyValue, PropertyKind, InfoDictionary, TraitsData, TraitSet, AssetIoError};
    pub use crate::traits::{BlobTrait, TraitSchema, TraitStore, TraitView};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_blob_view_over_empty_data() {
        let mut data = TraitsData::new();
        assert_eq!(BlobTrait::new(&data).url().unwrap(), None);

        BlobTrait::new(&mut data).set_url("x://y").unwrap();

        assert_eq!(BlobTrait::new(&data).url().unwrap(), Some("x://y"));
        assert_eq!(
            data.get_trait_property("blob", "url"),
            Some(&PropertyValue::Str("x://y".to_string()))
        );
    }

    #[test]
    fn test_info_dictionary_is_ordered() {
        let mut info = InfoDictionary::new();
        info.insert("b".into(), PropertyValue::from(2));
        info.insert("a".into(), PropertyValue::from("one"));
        let keys: Vec<_> = info.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
