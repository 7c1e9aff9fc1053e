//! Index store (staging area persistence)
//!
//! Loads, merges and rewrites the staging record at `.vcs/index`. The record is
//! always rewritten in full through a temporary file and a rename, so readers
//! see either the old or the new record, never a mix.
//!
//! ## Locking
//!
//! Readers take a shared lock and `update` holds an exclusive lock on
//! `.vcs/index.lock` for its whole read-modify-write cycle, so at most one
//! writer touches the record at a time.

use crate::artifacts::index::index_record::Index;
use crate::artifacts::index::index_update::IndexUpdate;
use crate::errors::{IoResultExt, RepositoryError, Result};
use bytes::Bytes;
use fake::rand;
use file_guard::Lock;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct IndexStore {
    /// Path to the index file (typically `.vcs/index`)
    path: Box<Path>,
    /// Advisory lock file next to the index
    lock_path: Box<Path>,
}

impl IndexStore {
    pub fn new(path: Box<Path>) -> Self {
        let lock_path = path.with_extension("lock").into_boxed_path();

        IndexStore { path, lock_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the record, or the default one when nothing is persisted yet
    pub fn read(&self) -> Result<Index> {
        let mut lock_file = self.open_lock_file()?;
        let _lock = file_guard::lock(&mut lock_file, Lock::Shared, 0, 1).with_path(&self.lock_path)?;

        self.read_unlocked()
    }

    /// Exact persisted bytes, `None` when no record exists
    pub fn read_raw(&self) -> Result<Option<Bytes>> {
        let mut lock_file = self.open_lock_file()?;
        let _lock = file_guard::lock(&mut lock_file, Lock::Shared, 0, 1).with_path(&self.lock_path)?;

        self.read_raw_unlocked()
    }

    /// Replace the persisted record with `index`
    pub fn write(&self, index: &Index) -> Result<()> {
        let mut lock_file = self.open_lock_file()?;
        let _lock =
            file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1).with_path(&self.lock_path)?;

        self.write_unlocked(index)
    }

    /// Merge `update` into the persisted record and write it back
    pub fn update(&self, update: IndexUpdate) -> Result<Index> {
        let mut lock_file = self.open_lock_file()?;
        let _lock =
            file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1).with_path(&self.lock_path)?;

        let mut index = self.read_unlocked()?;
        index.apply(update);
        self.write_unlocked(&index)?;

        tracing::debug!(
            staged = index.staged.len(),
            unstaged = index.unstaged.len(),
            untracked = index.untracked.len(),
            "index updated"
        );

        Ok(index)
    }

    fn read_unlocked(&self) -> Result<Index> {
        match self.read_raw_unlocked()? {
            None => Ok(Index::default()),
            Some(content) => {
                let content = std::str::from_utf8(&content).map_err(|error| {
                    RepositoryError::corrupt_index(0, format!("index is not valid UTF-8: {error}"))
                })?;

                Index::parse(content)
            }
        }
    }

    fn read_raw_unlocked(&self) -> Result<Option<Bytes>> {
        match std::fs::read(&self.path) {
            Ok(content) => Ok(Some(Bytes::from(content))),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error).with_path(&self.path),
        }
    }

    fn write_unlocked(&self, index: &Index) -> Result<()> {
        let temp_path = self.temp_path();

        let mut file = File::create(&temp_path).with_path(&temp_path)?;
        file.write_all(index.serialize().as_bytes())
            .with_path(&temp_path)?;
        file.sync_all().with_path(&temp_path)?;

        if let Err(error) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(error).with_path(&self.path);
        }

        Ok(())
    }

    fn open_lock_file(&self) -> Result<File> {
        std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .with_path(&self.lock_path)
    }

    fn temp_path(&self) -> PathBuf {
        self.path
            .with_extension(format!("tmp-{}", rand::random::<u32>()))
    }
}
