use crate::areas::workspace::Workspace;
use crate::artifacts::index::index_record::{Index, PathCategory};
use crate::artifacts::index::index_update::IndexUpdate;
use crate::artifacts::index::{STAGED_SECTION, UNSTAGED_SECTION, UNTRACKED_SECTION};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::FileChange;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type FileSet = BTreeSet<String>;
pub type ChangeSet = BTreeMap<String, ObjectId>;

/// Recomputed categories for the discoverable files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) untracked_files: FileSet,
    pub(crate) unstaged_changeset: ChangeSet,
    /// Unstaged entries whose content matches their digest again
    pub(crate) restaged_changeset: ChangeSet,
}

impl StatusInfo {
    pub fn untracked_files(&self) -> &FileSet {
        &self.untracked_files
    }

    pub fn unstaged_changeset(&self) -> &ChangeSet {
        &self.unstaged_changeset
    }

    pub fn restaged_changeset(&self) -> &ChangeSet {
        &self.restaged_changeset
    }

    pub fn into_update(self) -> IndexUpdate {
        IndexUpdate::stage(self.restaged_changeset)
            .with_unstaged(self.unstaged_changeset)
            .with_untracked(self.untracked_files)
    }
}

#[derive(new)]
pub struct Status<'w> {
    workspace: &'w Workspace,
}

impl<'w> Status<'w> {
    /// Reconcile the index with the set of discoverable files
    ///
    /// Files that disappeared keep their entries. Only paths that are still
    /// discoverable are read back from the working tree.
    pub fn initialize(
        &self,
        index: &Index,
        discovered: &FileSet,
    ) -> crate::errors::Result<StatusInfo> {
        let inspector = Inspector::new(self.workspace);
        let mut info = StatusInfo::default();

        for (name, oid) in &index.staged {
            if discovered.contains(name) && inspector.is_content_changed(name, oid)? {
                info.unstaged_changeset.insert(name.clone(), oid.clone());
            }
        }

        for (name, oid) in &index.unstaged {
            if discovered.contains(name) && !inspector.is_content_changed(name, oid)? {
                info.restaged_changeset.insert(name.clone(), oid.clone());
            } else {
                info.unstaged_changeset.insert(name.clone(), oid.clone());
            }
        }

        info.untracked_files = discovered
            .iter()
            .filter(|name| !index.staged.contains_key(*name) && !index.unstaged.contains_key(*name))
            .cloned()
            .collect();

        Ok(info)
    }
}

/// Status lines of an index, grouped by category in display order
pub fn file_changes(index: &Index) -> [(&'static str, Vec<FileChange<'_>>); 3] {
    let untracked = index
        .untracked
        .iter()
        .map(|path| FileChange::new(PathCategory::Untracked, path))
        .collect();
    let staged = index
        .staged
        .keys()
        .map(|path| FileChange::new(PathCategory::Staged, path))
        .collect();
    let unstaged = index
        .unstaged
        .keys()
        .map(|path| FileChange::new(PathCategory::Unstaged, path))
        .collect();

    [
        (UNTRACKED_SECTION, untracked),
        (STAGED_SECTION, staged),
        (UNSTAGED_SECTION, unstaged),
    ]
}
