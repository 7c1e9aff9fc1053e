use crate::areas::database::Database;
use crate::areas::index::IndexStore;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::ignore::ignore_patterns::IgnorePatterns;
use crate::errors::{IoResultExt, RepositoryError, Result};
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the store directory at the repository root
pub const STORE_DIR: &str = ".vcs";
pub const OBJECTS_DIR: &str = "objects";
pub const INDEX_FILE: &str = "index";

/// Explicit repository context handed to every operation
///
/// Holds no cached state: HEAD and the index are re-read from disk by each
/// operation. User-facing output goes to `writer`.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: IndexStore,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            std::fs::create_dir_all(path).with_path(path)?;
        }
        let path = path.canonicalize().with_path(path)?;
        let store_path = path.join(STORE_DIR);

        Ok(Repository {
            index: IndexStore::new(store_path.join(INDEX_FILE).into_boxed_path()),
            database: Database::new(store_path.join(OBJECTS_DIR).into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(store_path.into_boxed_path()),
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store_path(&self) -> PathBuf {
        self.path.join(STORE_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> &IndexStore {
        &self.index
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.database.objects_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepositoryError::RepositoryNotInitialized(
                self.path.to_path_buf(),
            ))
        }
    }

    pub fn ignore_patterns(&self) -> Result<IgnorePatterns> {
        IgnorePatterns::load(&self.path)
    }

    /// Write one line of user-facing output
    pub(crate) fn report(&self, line: std::fmt::Arguments<'_>) -> Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "{line}")
            .and_then(|_| writer.flush())
            .map_err(RepositoryError::Output)
    }
}
