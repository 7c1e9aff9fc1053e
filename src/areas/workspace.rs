//! Working tree access
//!
//! Enumerates the files a repository can track and reads their content. The
//! scan is a lazy walk in file-name order: hidden directories (including the
//! `.vcs` store) are never entered, and ignore patterns are checked on every
//! entry before descending, so an ignored directory is skipped wholesale.

use crate::artifacts::ignore::ignore_patterns::IgnorePatterns;
use crate::errors::{IoResultExt, Result};
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const HIDDEN_PREFIX: char = '.';

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute paths of every discoverable file
    pub fn list_files<'w>(
        &'w self,
        ignore: &'w IgnorePatterns,
    ) -> impl Iterator<Item = Result<PathBuf>> + 'w {
        WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| self.is_candidate(entry, ignore))
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(error) => Some(Err(error.into())),
            })
    }

    /// `/`-separated path relative to the workspace root
    ///
    /// `None` for paths outside the root or that are not valid UTF-8.
    pub fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.path).ok()?;

        relative
            .components()
            .map(|component| match component {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|names| names.join("/"))
    }

    /// Absolute path of a `/`-separated relative name
    pub fn absolute_path(&self, relative_name: &str) -> PathBuf {
        relative_name
            .split('/')
            .fold(self.path.to_path_buf(), |path, name| path.join(name))
    }

    /// Resolve a user supplied path specifier against the workspace root
    ///
    /// `.` and `..` are folded lexically; the result is not required to exist.
    pub fn resolve(&self, specifier: &str) -> PathBuf {
        let joined = self.path.join(specifier);
        let mut resolved = PathBuf::new();

        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                component => resolved.push(component),
            }
        }

        resolved
    }

    pub fn read_file(&self, path: &Path) -> Result<Bytes> {
        let path = self.path.join(path);

        std::fs::read(&path).map(Bytes::from).with_path(path)
    }

    fn is_candidate(&self, entry: &DirEntry, ignore: &IgnorePatterns) -> bool {
        // the root itself is always walked, whatever its name
        if entry.depth() == 0 {
            return true;
        }

        let is_hidden = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(HIDDEN_PREFIX));

        if entry.file_type().is_dir() && is_hidden {
            return false;
        }

        match self.relative_name(entry.path()) {
            Some(name) => !ignore.is_ignored(&name),
            None => {
                tracing::warn!(path = %entry.path().display(), "skipping path that is not valid UTF-8");
                false
            }
        }
    }
}
