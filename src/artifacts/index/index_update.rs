use crate::artifacts::index::index_record::Index;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

/// A partial set of field updates merged into the persisted index
///
/// - `staged` is unioned into the staged entries (one entry per path, the
///   newest digest wins) and its paths leave the other two categories;
/// - `unstaged` replaces the unstaged entries wholesale;
/// - `untracked` replaces the untracked set wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexUpdate {
    pub staged: Option<BTreeMap<String, ObjectId>>,
    pub unstaged: Option<BTreeMap<String, ObjectId>>,
    pub untracked: Option<BTreeSet<String>>,
}

impl IndexUpdate {
    pub fn stage(entries: impl IntoIterator<Item = (String, ObjectId)>) -> Self {
        IndexUpdate {
            staged: Some(entries.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn with_unstaged(mut self, entries: BTreeMap<String, ObjectId>) -> Self {
        self.unstaged = Some(entries);
        self
    }

    pub fn with_untracked(mut self, paths: BTreeSet<String>) -> Self {
        self.untracked = Some(paths);
        self
    }
}

impl Index {
    /// Merge an update, keeping the three categories disjoint
    pub fn apply(&mut self, update: IndexUpdate) {
        if let Some(unstaged) = update.unstaged {
            for path in unstaged.keys() {
                self.staged.remove(path);
            }
            self.unstaged = unstaged;
        }

        if let Some(staged) = update.staged {
            for (path, oid) in staged {
                self.unstaged.remove(&path);
                self.staged.insert(path, oid);
            }
        }

        if let Some(untracked) = update.untracked {
            self.untracked = untracked;
        }

        let Index {
            untracked,
            staged,
            unstaged,
            ..
        } = self;
        untracked.retain(|path| !staged.contains_key(path) && !unstaged.contains_key(path));
    }
}
