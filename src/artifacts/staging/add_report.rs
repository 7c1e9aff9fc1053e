use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

/// Outcome of one `add` call
#[derive(Debug, Default)]
pub struct AddReport {
    staged: Vec<(String, ObjectId)>,
    failures: Vec<RepositoryError>,
}

impl AddReport {
    pub(crate) fn record_staged(&mut self, path: String, oid: ObjectId) {
        self.staged.push((path, oid));
    }

    pub(crate) fn record_failure(&mut self, error: RepositoryError) {
        self.failures.push(error);
    }

    /// Staged paths with the digest their content was stored under
    pub fn staged(&self) -> &[(String, ObjectId)] {
        &self.staged
    }

    /// Per-file errors that did not abort the batch
    pub fn failures(&self) -> &[RepositoryError] {
        &self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
