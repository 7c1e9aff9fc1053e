//! Working tree status reconciliation
//!
//! Compares the discoverable files against the index and recomputes the
//! untracked and unstaged categories.
//!
//! ## Components
//!
//! - `file_change`: Categories shown by `status` and their line markers
//! - `inspector`: Content comparison against recorded digests
//! - `status_info`: Reconciliation of the index with the working tree

pub mod file_change;
pub mod inspector;
pub mod status_info;
