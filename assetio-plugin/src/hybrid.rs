//! Combining several implementation factories

use crate::{ImplementationFactory, ManagerInterface, UIDelegateInterface};
use assetio_core::{AssetIoError, Result};

/// Boxed child factory producing `I`
pub type BoxedFactory<I> = Box<dyn ImplementationFactory<Interface = I>>;

/// Presents several child factories as one.
///
/// Identifiers are the sorted union of the children's. An identifier
/// offered by more than one child is instantiated by the first child, in
/// the order given, that lists it.
pub struct HybridPluginSystemFactory<I: 'static> {
    factories: Vec<BoxedFactory<I>>,
}

pub type HybridPluginSystemManagerImplementationFactory = HybridPluginSystemFactory<Box<dyn ManagerInterface>>;

pub type HybridPluginSystemUIDelegateImplementationFactory = HybridPluginSystemFactory<Box<dyn UIDelegateInterface>>;

impl<I: 'static> HybridPluginSystemFactory<I> {
    pub fn new(factories: Vec<BoxedFactory<I>>) -> Result<Self> {
        if factories.is_empty() {
            return Err(AssetIoError::input_validation(
                "HybridPluginSystem: At least one child implementation factory must be provided",
            ));
        }
        Ok(Self { factories })
    }

    pub fn factories(&self) -> &[BoxedFactory<I>] {
        &self.factories
    }
}

impl<I: 'static> ImplementationFactory for HybridPluginSystemFactory<I> {
    type Interface = I;

    fn identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self
            .factories
            .iter()
            .flat_map(|factory| factory.identifiers())
            .collect();
        identifiers.sort();
        identifiers.dedup();
        identifiers
    }

    fn instantiate(&self, identifier: &str) -> Result<I> {
        let owner = self
            .factories
            .iter()
            .find(|factory| factory.identifiers().iter().any(|id| id == identifier));

        match owner {
            Some(factory) => factory.instantiate(identifier),
            None => Err(AssetIoError::input_validation(format!(
                "HybridPluginSystem: No plug-in registered with the identifier '{}'",
                identifier
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Child factory producing `(child name, identifier)` pairs
    struct Fixed {
        name: &'static str,
        identifiers: Vec<&'static str>,
        instantiated: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn boxed(name: &'static str, identifiers: Vec<&'static str>) -> (BoxedFactory<(String, String)>, Arc<AtomicUsize>) {
            let instantiated = Arc::new(AtomicUsize::new(0));
            let factory = Fixed {
                name,
                identifiers,
                instantiated: instantiated.clone(),
            };
            (Box::new(factory), instantiated)
        }
    }

    impl ImplementationFactory for Fixed {
        type Interface = (String, String);

        fn identifiers(&self) -> Vec<String> {
            self.identifiers.iter().map(|s| s.to_string()).collect()
        }

        fn instantiate(&self, identifier: &str) -> Result<Self::Interface> {
            self.instantiated.fetch_add(1, Ordering::SeqCst);
            Ok((self.name.to_string(), identifier.to_string()))
        }
    }

    #[test]
    fn test_requires_children() {
        let err = HybridPluginSystemFactory::<(String, String)>::new(Vec::new()).err().unwrap();
        assert!(matches!(err, AssetIoError::InputValidation(_)));
        assert_eq!(
            err.message(),
            "HybridPluginSystem: At least one child implementation factory must be provided"
        );
    }

    #[test]
    fn test_identifiers_are_sorted_union() {
        let (a, _) = Fixed::boxed("a", vec!["org.example.z", "org.example.shared"]);
        let (b, _) = Fixed::boxed("b", vec!["org.example.shared", "org.example.a"]);
        let hybrid = HybridPluginSystemFactory::new(vec![a, b]).unwrap();

        assert_eq!(
            hybrid.identifiers(),
            vec!["org.example.a", "org.example.shared", "org.example.z"]
        );
    }

    #[test]
    fn test_first_listing_child_instantiates() {
        let (a, a_count) = Fixed::boxed("a", vec!["org.example.only_a", "org.example.shared"]);
        let (b, b_count) = Fixed::boxed("b", vec!["org.example.shared", "org.example.only_b"]);
        let hybrid = HybridPluginSystemFactory::new(vec![a, b]).unwrap();

        assert_eq!(
            hybrid.instantiate("org.example.shared").unwrap(),
            ("a".to_string(), "org.example.shared".to_string())
        );
        assert_eq!(
            hybrid.instantiate("org.example.only_b").unwrap(),
            ("b".to_string(), "org.example.only_b".to_string())
        );
        assert_eq!(a_count.load(Ordering::SeqCst), 1);
        assert_eq!(b_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_identifier() {
        let (a, count) = Fixed::boxed("a", vec!["org.example.a"]);
        let hybrid = HybridPluginSystemFactory::new(vec![a]).unwrap();

        let err = hybrid.instantiate("does-not-exist").unwrap_err();
        assert_eq!(
            err.message(),
            "HybridPluginSystem: No plug-in registered with the identifier 'does-not-exist'"
        );
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
