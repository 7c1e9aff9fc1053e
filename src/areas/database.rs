//! Object database
//!
//! Content-addressed, sharded blob storage plus the commit containers that
//! snapshot them. Blob files live at `objects/<xx>/<remaining>`; commit
//! containers are directories at `objects/<commit-id>/`.
//!
//! Every write goes through a temporary name inside the destination directory
//! followed by a rename, so a crash never leaves a truncated object behind.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, RepositoryError, Result};
use bytes::Bytes;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Write `content` under `object_id` unless an object already exists there
    ///
    /// The digest is content-derived, so an existing entry is trusted to hold
    /// the same bytes and is left untouched.
    pub fn store(&self, object_id: &ObjectId, content: &[u8]) -> Result<()> {
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored");
            return Ok(());
        }

        let object_dir = object_path.parent().unwrap_or(&*self.path).to_path_buf();
        std::fs::create_dir_all(&object_dir).with_path(&object_dir)?;

        self.write_object(&object_dir, &object_path, content)?;
        tracing::debug!(oid = %object_id, bytes = content.len(), "stored object");

        Ok(())
    }

    /// Store any object under its own digest and hand the digest back
    pub fn store_object(&self, object: &impl Object) -> Result<ObjectId> {
        let object_id = object.object_id();
        self.store(&object_id, object.content())?;

        Ok(object_id)
    }

    pub fn store_blob(&self, content: impl Into<Bytes>) -> Result<ObjectId> {
        self.store_object(&Blob::new(content.into()))
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn read(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        match std::fs::read(&object_path) {
            Ok(content) => Ok(Bytes::from(content)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(RepositoryError::NotFound(object_id.clone()))
            }
            Err(error) => Err(error).with_path(object_path),
        }
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        Ok(Blob::new(self.read(object_id)?))
    }

    pub fn commit_path(&self, commit_id: &ObjectId) -> PathBuf {
        self.path.join(commit_id.as_ref())
    }

    pub fn commit_exists(&self, commit_id: &ObjectId) -> bool {
        self.commit_path(commit_id).exists()
    }

    /// Allocate a private directory to assemble a commit container in
    ///
    /// The name never collides with a shard or a commit directory since both
    /// are pure hex.
    pub fn staging_dir(&self) -> Result<PathBuf> {
        let staging_path = self.path.join(Self::generate_temp_name("tmp-commit"));
        std::fs::create_dir(&staging_path).with_path(&staging_path)?;

        Ok(staging_path)
    }

    /// Atomically move a fully assembled container to its final name
    pub fn publish_commit(&self, staging_path: &Path, commit_id: &ObjectId) -> Result<PathBuf> {
        let commit_path = self.commit_path(commit_id);

        if commit_path.exists() {
            return Err(RepositoryError::CommitAlreadyExists(commit_id.clone()));
        }

        std::fs::rename(staging_path, &commit_path).with_path(&commit_path)?;

        Ok(commit_path)
    }

    /// Withdraw a published container whose commit could not be completed
    ///
    /// The container is renamed back to a private name first, so it stops
    /// being visible under the commit identifier in one step.
    pub fn discard_commit(&self, commit_id: &ObjectId) -> Result<()> {
        let commit_path = self.commit_path(commit_id);
        let discarded_path = self.path.join(Self::generate_temp_name("tmp-discard"));

        std::fs::rename(&commit_path, &discarded_path).with_path(&commit_path)?;
        std::fs::remove_dir_all(&discarded_path).with_path(&discarded_path)?;

        tracing::debug!(commit = %commit_id, "discarded commit container");

        Ok(())
    }

    fn write_object(&self, object_dir: &Path, object_path: &Path, content: &[u8]) -> Result<()> {
        let temp_object_path = object_dir.join(Self::generate_temp_name("tmp-obj"));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .with_path(&temp_object_path)?;

        file.write_all(content).with_path(&temp_object_path)?;
        file.sync_all().with_path(&temp_object_path)?;

        // rename the temp file to the object file to make it atomic
        if let Err(error) = std::fs::rename(&temp_object_path, object_path) {
            let _ = std::fs::remove_file(&temp_object_path);
            return Err(error).with_path(object_path);
        }

        Ok(())
    }

    fn generate_temp_name(prefix: &str) -> String {
        format!("{prefix}-{}", rand::random::<u32>())
    }
}
