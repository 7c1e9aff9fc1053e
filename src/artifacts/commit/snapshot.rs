use crate::areas::database::Database;
use crate::artifacts::commit::{INDEX_SNAPSHOT_FILE, MESSAGE_FILE};
use crate::artifacts::index::index_record::Index;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, RepositoryError, Result};
use bytes::Bytes;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Staged state that is ready to be snapshotted
#[derive(Debug)]
pub struct PendingCommit {
    commit_id: ObjectId,
    index: Index,
    index_bytes: Bytes,
}

impl PendingCommit {
    /// Check the persisted index holds something to commit
    pub fn prepare(index_bytes: Option<Bytes>) -> Result<Self> {
        let index_bytes = index_bytes.ok_or(RepositoryError::NothingToCommit)?;

        let content = std::str::from_utf8(&index_bytes).map_err(|error| {
            RepositoryError::corrupt_index(0, format!("index is not valid UTF-8: {error}"))
        })?;
        let index = Index::parse(content)?;

        if !index.has_content() {
            return Err(RepositoryError::NothingToCommit);
        }

        Ok(PendingCommit {
            commit_id: ObjectId::digest(&index_bytes),
            index,
            index_bytes,
        })
    }

    pub fn commit_id(&self) -> &ObjectId {
        &self.commit_id
    }

    /// Build the container under a private name
    ///
    /// Nothing is visible under the commit identifier until `publish`.
    pub fn assemble<'d>(
        self,
        database: &'d Database,
        message: &str,
    ) -> Result<AssembledSnapshot<'d>> {
        if database.commit_exists(&self.commit_id) {
            return Err(RepositoryError::CommitAlreadyExists(self.commit_id));
        }

        let snapshot = AssembledSnapshot {
            database,
            commit_id: self.commit_id,
            staging_path: database.staging_dir()?,
            published: false,
            blob_count: 0,
        };

        // on error the snapshot is dropped here, which discards the staging directory
        snapshot.fill(&self.index, &self.index_bytes, message)
    }
}

/// A fully written container that is not yet reachable
#[derive(Debug)]
pub struct AssembledSnapshot<'d> {
    database: &'d Database,
    commit_id: ObjectId,
    staging_path: PathBuf,
    published: bool,
    blob_count: usize,
}

impl<'d> AssembledSnapshot<'d> {
    /// Number of distinct blobs copied into the container
    pub fn blob_count(&self) -> usize {
        self.blob_count
    }

    fn fill(mut self, index: &Index, index_bytes: &[u8], message: &str) -> Result<Self> {
        let oids = index
            .content_entries()
            .map(|(_, oid)| oid)
            .collect::<BTreeSet<_>>();

        for oid in &oids {
            let content = self.database.read(oid)?;
            write_file(&self.staging_path.join(oid.as_ref()), &content)?;
        }
        self.blob_count = oids.len();

        write_file(&self.staging_path.join(MESSAGE_FILE), message.as_bytes())?;
        write_file(&self.staging_path.join(INDEX_SNAPSHOT_FILE), index_bytes)?;

        Ok(self)
    }

    /// Move the container to `objects/<commit-id>/`
    pub fn publish(mut self) -> Result<ObjectId> {
        self.database
            .publish_commit(&self.staging_path, &self.commit_id)?;
        self.published = true;

        Ok(self.commit_id.clone())
    }
}

impl Drop for AssembledSnapshot<'_> {
    fn drop(&mut self) {
        if self.published {
            return;
        }

        if let Err(error) = std::fs::remove_dir_all(&self.staging_path) {
            tracing::warn!(
                path = %self.staging_path.display(),
                %error,
                "failed to discard unpublished commit"
            );
        }
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    std::fs::write(path, content).with_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::index::index_update::IndexUpdate;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn objects_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    fn index_bytes(index: &Index) -> Option<Bytes> {
        Some(Bytes::from(index.serialize()))
    }

    fn dir_names(path: &Path) -> Vec<String> {
        let mut names = std::fs::read_dir(path)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[test]
    fn missing_index_is_nothing_to_commit() {
        assert!(matches!(
            PendingCommit::prepare(None),
            Err(RepositoryError::NothingToCommit)
        ));
    }

    #[test]
    fn index_without_content_is_nothing_to_commit() {
        let mut index = Index::default();
        index.untracked.insert("a.txt".to_string());

        assert!(matches!(
            PendingCommit::prepare(index_bytes(&index)),
            Err(RepositoryError::NothingToCommit)
        ));
    }

    #[rstest]
    fn published_container_holds_blobs_message_and_index(objects_dir: TempDir) {
        let database = Database::new(objects_dir.path().into());
        let hello = database.store_blob("hello").unwrap();
        let world = database.store_blob("world").unwrap();
        let mut index = Index::default();
        index.apply(IndexUpdate::stage([
            ("a.txt".to_string(), hello.clone()),
            ("b.txt".to_string(), world.clone()),
            ("copy.txt".to_string(), hello.clone()),
        ]));
        let serialized = index.serialize();

        let pending = PendingCommit::prepare(index_bytes(&index)).unwrap();
        assert_eq!(pending.commit_id(), &ObjectId::digest(&serialized));

        let snapshot = pending.assemble(&database, "first").unwrap();
        // a.txt and copy.txt share one blob
        assert_eq!(snapshot.blob_count(), 2);
        let commit_id = snapshot.publish().unwrap();

        let commit_path = database.commit_path(&commit_id);
        let mut expected = vec![
            hello.to_string(),
            world.to_string(),
            "index".to_string(),
            "message".to_string(),
        ];
        expected.sort();
        assert_eq!(dir_names(&commit_path), expected);
        assert_eq!(
            std::fs::read_to_string(commit_path.join("message")).unwrap(),
            "first"
        );
        assert_eq!(
            std::fs::read_to_string(commit_path.join("index")).unwrap(),
            serialized
        );
    }

    #[rstest]
    fn existing_commit_is_rejected(objects_dir: TempDir) {
        let database = Database::new(objects_dir.path().into());
        let oid = database.store_blob("hello").unwrap();
        let mut index = Index::default();
        index.staged.insert("a.txt".to_string(), oid);

        PendingCommit::prepare(index_bytes(&index))
            .unwrap()
            .assemble(&database, "first")
            .unwrap()
            .publish()
            .unwrap();

        let second = PendingCommit::prepare(index_bytes(&index))
            .unwrap()
            .assemble(&database, "first");

        assert!(matches!(second, Err(RepositoryError::CommitAlreadyExists(_))));
    }

    #[rstest]
    fn missing_blob_discards_the_partial_container(objects_dir: TempDir) {
        let database = Database::new(objects_dir.path().into());
        let stored = database.store_blob("stored").unwrap();
        let mut index = Index::default();
        index.staged.insert("a.txt".to_string(), stored);
        index
            .staged
            .insert("b.txt".to_string(), ObjectId::digest("never stored"));

        let result = PendingCommit::prepare(index_bytes(&index))
            .unwrap()
            .assemble(&database, "broken");

        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
        // only the shard directory of the stored blob remains
        assert_eq!(dir_names(objects_dir.path()).len(), 1);
    }

    #[rstest]
    fn dropping_an_assembled_snapshot_discards_it(objects_dir: TempDir) {
        let database = Database::new(objects_dir.path().into());
        let oid = database.store_blob("hello").unwrap();
        let mut index = Index::default();
        index.staged.insert("a.txt".to_string(), oid);

        let pending = PendingCommit::prepare(index_bytes(&index)).unwrap();
        let commit_id = pending.commit_id().clone();
        drop(pending.assemble(&database, "abandoned").unwrap());

        assert!(!database.commit_exists(&commit_id));
        assert_eq!(dir_names(objects_dir.path()).len(), 1);
    }
}
