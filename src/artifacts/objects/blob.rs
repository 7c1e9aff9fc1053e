//! Blob object
//!
//! Blobs store file content. They hold only the raw bytes, without any metadata
//! like filename or permissions, so the same content staged from two different
//! paths is a single blob.
//!
//! On disk the blob file holds the content verbatim (no header, no compression).

use crate::artifacts::objects::object::Object;
use bytes::Bytes;
use derive_new::new;

/// Immutable file content identified by its digest
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    #[new(into)]
    content: Bytes,
}

impl Blob {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Object for Blob {
    fn content(&self) -> &Bytes {
        &self.content
    }
}
