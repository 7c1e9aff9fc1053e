use crate::artifacts::index::index_record::PathCategory;
use crate::artifacts::index::{STAGED_MARKER, UNSTAGED_MARKER, UNTRACKED_MARKER};
use colored::Colorize;

/// One line of `status` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange<'i> {
    pub(crate) category: PathCategory,
    pub(crate) path: &'i str,
}

impl<'i> FileChange<'i> {
    pub fn new(category: PathCategory, path: &'i str) -> Self {
        FileChange { category, path }
    }

    pub fn marker(&self) -> char {
        match self.category {
            PathCategory::Untracked => UNTRACKED_MARKER,
            PathCategory::Staged => STAGED_MARKER,
            PathCategory::Unstaged => UNSTAGED_MARKER,
        }
    }
}

impl std::fmt::Display for FileChange<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = self.marker().to_string();
        let marker = match self.category {
            PathCategory::Staged => marker.green(),
            PathCategory::Unstaged | PathCategory::Untracked => marker.red(),
        };

        write!(f, "{} {}", marker, self.path)
    }
}
