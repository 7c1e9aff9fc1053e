//! Data structures and algorithms behind the repository areas
//!
//! - `commit`: Commit container assembly and publication
//! - `ignore`: `.vcsignore` pattern matching
//! - `index`: Index record, its parser and update rules
//! - `objects`: Object identifiers and blobs
//! - `staging`: Add targets and reports
//! - `status`: Working tree reconciliation

pub mod commit;
pub mod ignore;
pub mod index;
pub mod objects;
pub mod staging;
pub mod status;
