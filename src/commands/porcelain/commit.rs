use crate::areas::repository::Repository;
use crate::artifacts::commit::snapshot::PendingCommit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};

impl Repository {
    /// Snapshot the staged state as an immutable commit container
    ///
    /// The commit identifier is the digest of the persisted index, so committing
    /// the same staged state twice fails with `CommitAlreadyExists`. HEAD only
    /// moves once the container is published.
    pub fn commit(&self, message: &str) -> Result<ObjectId> {
        self.ensure_initialized()?;

        let message = message.trim();
        if message.is_empty() {
            return Err(RepositoryError::EmptyCommitMessage);
        }

        let pending = PendingCommit::prepare(self.index().read_raw()?)?;
        tracing::debug!(commit = %pending.commit_id(), "assembling commit");
        let snapshot = pending.assemble(self.database(), message)?;
        let blob_count = snapshot.blob_count();
        let commit_id = snapshot.publish()?;

        if let Err(error) = self.refs().update_head(commit_id.clone()) {
            // HEAD could not move, so the container must not stay reachable
            if let Err(discard_error) = self.database().discard_commit(&commit_id) {
                tracing::warn!(
                    commit = %commit_id,
                    error = %discard_error,
                    "failed to roll back published commit"
                );
            }
            return Err(error);
        }

        tracing::info!(commit = %commit_id, blobs = blob_count, "created commit");
        self.report(format_args!(
            "[{}] {}",
            commit_id.to_short_oid(),
            message.lines().next().unwrap_or_default()
        ))?;

        Ok(commit_id)
    }
}
