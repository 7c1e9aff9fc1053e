//! Object types and identifiers
//!
//! Everything in the object database is addressed by the SHA-1 digest of its
//! exact bytes:
//!
//! - **Blob**: file content (raw bytes, stored verbatim)
//! - **Commit container**: a directory named by the digest of the index record,
//!   holding blob copies and the commit message (see `artifacts::commit`)

pub mod blob;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Number of leading hex characters used as the shard directory name
pub const SHARD_PREFIX_LENGTH: usize = 2;
