#![allow(dead_code)]

pub mod command;
pub mod file;

pub const STORE_DIR: &str = ".vcs";

/// Lowercase hex SHA-1 of `content`, computed the way the object store does
pub fn sha1_hex(content: &[u8]) -> String {
    use sha1::{Digest, Sha1};

    format!("{:x}", Sha1::digest(content))
}
