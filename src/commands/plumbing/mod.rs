//! Plumbing commands (low-level object access)
//!
//! ## Commands
//!
//! - `hash-object`: Compute a file's digest and optionally store it as a blob
//! - `cat-file`: Print a blob, or the message and index of a commit

pub mod cat_file;
pub mod hash_object;
