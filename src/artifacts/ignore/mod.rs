//! Ignore rules
//!
//! Patterns come from `.vcsignore` at the repository root, one per line. Blank
//! lines and lines starting with `#` are skipped. `*` matches any run of
//! characters and everything else is literal. A pattern matches when it occurs
//! anywhere in the `/`-separated path relative to the repository root.

pub mod ignore_patterns;

/// Name of the ignore file at the repository root
pub const IGNORE_FILE_NAME: &str = ".vcsignore";

pub const COMMENT_PREFIX: char = '#';
pub const WILDCARD: char = '*';
