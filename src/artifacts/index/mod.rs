//! Staging index record
//!
//! The index is a single human-readable text record:
//!
//! ```text
//! Head: main
//! Merge: None
//! Help: g?
//!
//! Untracked (1)
//! ? notes.txt
//!
//! Unstaged (1)
//! M 2aae6c35c94fcfb415dbe95f408b9ce91ee846ed src/lib.rs
//!
//! Staged (1)
//! A aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d a.txt
//! ```
//!
//! Sections always appear in this order, each header declares how many entry
//! lines follow, and sections are separated by one blank line. Staged and
//! unstaged entries carry the digest of the content that was last staged for
//! the path. Paths and header values escape `\`, newline and carriage return.

pub mod index_parser;
pub mod index_record;
pub mod index_update;

pub const HEAD_FIELD: &str = "Head";
pub const MERGE_FIELD: &str = "Merge";
pub const HELP_FIELD: &str = "Help";

pub const UNTRACKED_SECTION: &str = "Untracked";
pub const UNSTAGED_SECTION: &str = "Unstaged";
pub const STAGED_SECTION: &str = "Staged";

pub const UNTRACKED_MARKER: char = '?';
pub const UNSTAGED_MARKER: char = 'M';
pub const STAGED_MARKER: char = 'A';

/// Serialized value of an absent merge marker
pub const NO_MERGE: &str = "None";

pub const DEFAULT_HEAD: &str = "main";
pub const DEFAULT_HELP: &str = "g?";
