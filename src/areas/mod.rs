//! Core repository components
//!
//! - `database`: Object database for blobs and commit containers
//! - `index`: Staging record persistence
//! - `refs`: HEAD pointer
//! - `repository`: Repository context tying the areas together
//! - `workspace`: Working tree scanning and file access

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
