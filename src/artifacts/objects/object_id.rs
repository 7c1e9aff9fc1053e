//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings holding the SHA-1
//! digest of an object's exact bytes. Nothing else is mixed in: no header, no
//! path, no file metadata, so renaming a file never changes its digest.
//!
//! ## Storage
//!
//! Blobs are stored in `.vcs/objects/<first-2-chars>/<remaining-38-chars>`,
//! commit containers in `.vcs/objects/<all-40-chars>/`.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHARD_PREFIX_LENGTH};
use crate::errors::RepositoryError;
use sha1::{Digest, Sha1};
use std::path::PathBuf;

/// Content digest used as storage key and index reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Compute the digest of the given bytes
    pub fn digest(content: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content.as_ref());

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Parse and validate an object ID from a string
    ///
    /// Uppercase hex is accepted and normalized, since object paths are
    /// always written in lowercase.
    pub fn try_parse(id: impl Into<String>) -> Result<Self, RepositoryError> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RepositoryError::InvalidObjectId(id));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Convert to the sharded blob path
    ///
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(SHARD_PREFIX_LENGTH);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the digest
    pub fn to_short_oid(&self) -> &str {
        &self.0[..7]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
