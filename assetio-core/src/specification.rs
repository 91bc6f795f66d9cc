//! Specifications: trait data pre-imbued with a fixed set of traits

use crate::traits::{Blob, TraitSchema};
use crate::{Result, TraitSet, TraitsData};

/// A fixed trait set together with the data imbued with it
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    trait_ids: TraitSet,
    data: TraitsData,
}

impl Specification {
    pub fn new<I, S>(trait_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data = TraitsData::from_trait_set(trait_ids)?;
        Ok(Self { trait_ids: data.trait_ids(), data })
    }

    /// The traits this specification was created with.
    pub fn trait_ids(&self) -> &TraitSet {
        &self.trait_ids
    }

    pub fn data(&self) -> &TraitsData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut TraitsData {
        &mut self.data
    }

    pub fn into_data(self) -> TraitsData {
        self.data
    }
}

/// A named kind of specification
pub trait SpecificationType {
    fn trait_ids() -> &'static [&'static str];

    fn create() -> Result<Specification> {
        Specification::new(Self::trait_ids().iter().copied())
    }
}

/// Specification of a blob of data
pub struct BlobSpecification;

impl SpecificationType for BlobSpecification {
    fn trait_ids() -> &'static [&'static str] {
        &[Blob::ID]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_specification_trait_ids() {
        let spec = BlobSpecification::create().unwrap();
        let ids: Vec<&str> = spec.trait_ids().iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["blob"]);
        assert!(spec.data().has_trait("blob"));
    }

    #[test]
    fn test_trait_ids_fixed_after_data_changes() {
        let mut spec = Specification::new(["a"]).unwrap();
        spec.data_mut().add_trait("b").unwrap();
        assert_eq!(spec.trait_ids().len(), 1);
        assert_eq!(spec.into_data().len(), 2);
    }

    #[test]
    fn test_empty_trait_id_rejected() {
        assert!(Specification::new([""]).is_err());
    }
}
