//! The `blob` trait: a resolvable URL and its MIME type

use super::{PropertyDef, TraitSchema, TraitStore, TraitView};
use crate::{PropertyKind, Result};

/// Key for the URL property
pub const URL: &str = "url";
/// Key for the MIME type property
pub const MIME_TYPE: &str = "mimeType";

/// Schema of the `blob` trait
pub struct Blob;

impl TraitSchema for Blob {
    const ID: &'static str = "blob";
    const PROPERTIES: &'static [PropertyDef] = &[
        PropertyDef::new(URL, PropertyKind::Str, "URL of the blob's data"),
        PropertyDef::new(MIME_TYPE, PropertyKind::Str, "MIME type of the blob's data"),
    ];
}

/// View of the `blob` trait
pub type BlobTrait<S> = TraitView<Blob, S>;

impl<S: TraitStore> TraitView<Blob, S> {
    pub fn url(&self) -> Result<Option<&str>> {
        self.get_str(URL)
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> Result<()> {
        self.set(URL, url.into())
    }

    pub fn mime_type(&self) -> Result<Option<&str>> {
        self.get_str(MIME_TYPE)
    }

    pub fn set_mime_type(&mut self, mime_type: impl Into<String>) -> Result<()> {
        self.set(MIME_TYPE, mime_type.into())
    }
}
