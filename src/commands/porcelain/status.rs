use crate::areas::repository::Repository;
use crate::artifacts::index::HEAD_FIELD;
use crate::artifacts::index::index_record::Index;
use crate::artifacts::status::status_info::{FileSet, Status, file_changes};
use crate::errors::Result;

impl Repository {
    /// Reconcile the index with the working tree and print it
    ///
    /// Returns the reconciled index. Without an index and without any
    /// discoverable file nothing is written.
    pub fn status(&self) -> Result<Index> {
        self.ensure_initialized()?;

        let ignore = self.ignore_patterns()?;
        let mut discovered = FileSet::new();
        for path in self.workspace().list_files(&ignore) {
            if let Some(name) = self.workspace().relative_name(&path?) {
                discovered.insert(name);
            }
        }

        if !self.index().exists() && discovered.is_empty() {
            self.report(format_args!("No changes staged or tracked."))?;
            return Ok(Index::default());
        }

        let current = self.index().read()?;
        let info = Status::new(self.workspace()).initialize(&current, &discovered)?;
        tracing::debug!(
            untracked = info.untracked_files().len(),
            unstaged = info.unstaged_changeset().len(),
            restaged = info.restaged_changeset().len(),
            "reconciled working tree"
        );
        let index = self.index().update(info.into_update())?;

        self.report(format_args!("{HEAD_FIELD}: {}", index.head))?;
        for (section, changes) in file_changes(&index) {
            self.report(format_args!("{section}:"))?;
            for change in changes {
                self.report(format_args!("{change}"))?;
            }
        }

        Ok(index)
    }
}
