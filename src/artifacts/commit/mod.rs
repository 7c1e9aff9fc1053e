//! Commit snapshots
//!
//! A commit is a directory `objects/<commit-id>/` where the identifier is the
//! digest of the index record exactly as persisted. It holds:
//!
//! - a copy of every blob the index references, named by its digest;
//! - `message`: the commit message;
//! - `index`: the index bytes the identifier was computed from.
//!
//! The container is assembled under a temporary name and renamed into place in
//! one step, so a failed commit never leaves a partial container behind.

pub mod snapshot;

pub const MESSAGE_FILE: &str = "message";
pub const INDEX_SNAPSHOT_FILE: &str = "index";
