//! References (HEAD)
//!
//! HEAD is a single-line file holding either a branch ref path
//! (`refs/heads/main` right after init) or, once something was committed, the
//! identifier of the latest commit. `refs/` itself is created at init and left
//! for branch refs.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, Result};
use derive_new::new;
use fake::rand;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

pub const REFS_DIR: &str = "refs";
pub const HEADS_DIR: &str = "heads";

/// Where HEAD points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadPointer {
    /// Branch ref path such as `refs/heads/main`
    Branch(String),
    /// Latest commit identifier
    Commit(ObjectId),
}

impl HeadPointer {
    pub fn branch(name: &str) -> Self {
        HeadPointer::Branch(format!("{REFS_DIR}/{HEADS_DIR}/{name}"))
    }

    fn parse(content: &str) -> Option<Self> {
        let content = content.trim();

        if content.is_empty() {
            return None;
        }

        Some(match ObjectId::try_parse(content) {
            Ok(oid) => HeadPointer::Commit(oid),
            Err(_) => HeadPointer::Branch(content.to_string()),
        })
    }
}

impl std::fmt::Display for HeadPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadPointer::Branch(ref_path) => write!(f, "{ref_path}"),
            HeadPointer::Commit(oid) => write!(f, "{oid}"),
        }
    }
}

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the store directory (typically `.vcs`)
    path: Box<Path>,
}

impl Refs {
    pub fn refs_path(&self) -> PathBuf {
        self.path.join(REFS_DIR)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join(HEADS_DIR)
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn read_head(&self) -> Result<Option<HeadPointer>> {
        let head_path = self.head_path();

        match std::fs::read_to_string(&head_path) {
            Ok(content) => Ok(HeadPointer::parse(&content)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error).with_path(head_path),
        }
    }

    /// Latest commit, if HEAD points at one
    pub fn read_head_commit(&self) -> Result<Option<ObjectId>> {
        Ok(match self.read_head()? {
            Some(HeadPointer::Commit(oid)) => Some(oid),
            _ => None,
        })
    }

    pub fn set_head(&self, pointer: &HeadPointer) -> Result<()> {
        let head_path = self.head_path();
        let temp_path = self
            .path
            .join(format!("{HEAD_REF_NAME}.tmp-{}", rand::random::<u32>()));

        std::fs::write(&temp_path, pointer.to_string()).with_path(&temp_path)?;

        // rename the temp file over HEAD to make the switch atomic
        if let Err(error) = std::fs::rename(&temp_path, &head_path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(error).with_path(head_path);
        }

        Ok(())
    }

    pub fn update_head(&self, commit_id: ObjectId) -> Result<()> {
        self.set_head(&HeadPointer::Commit(commit_id))
    }
}
