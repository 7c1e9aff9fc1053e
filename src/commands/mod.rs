//! Command implementations
//!
//! Every command is an `impl Repository` block, split in two categories:
//!
//! - `plumbing`: Direct object access (hash-object, cat-file)
//! - `porcelain`: User-facing workflows (init, add, commit, status)

pub mod plumbing;
pub mod porcelain;
