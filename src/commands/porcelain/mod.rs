//! Porcelain commands (user-facing workflows)
//!
//! ## Commands
//!
//! - `init`: Create the repository store
//! - `add`: Stage files for commit
//! - `commit`: Snapshot the staged state
//! - `status`: Reconcile the index with the working tree and print it

pub mod add;
pub mod commit;
pub mod init;
pub mod status;
