use crate::areas::refs::HeadPointer;
use crate::areas::repository::Repository;
use crate::artifacts::index::DEFAULT_HEAD;
use crate::errors::{IoResultExt, Result};
use std::fs;

impl Repository {
    /// Create the store layout and point HEAD at the default branch
    ///
    /// An existing store is left untouched.
    pub fn init(&self) -> Result<()> {
        let store_path = self.store_path();

        if store_path.exists() {
            return self.report(format_args!(
                "Repository already initialized at {}",
                store_path.display()
            ));
        }

        let objects_path = self.database().objects_path();
        fs::create_dir_all(objects_path).with_path(objects_path)?;

        let heads_path = self.refs().heads_path();
        fs::create_dir_all(&heads_path).with_path(&heads_path)?;

        self.refs().set_head(&HeadPointer::branch(DEFAULT_HEAD))?;

        tracing::info!(path = %store_path.display(), "initialized repository");
        self.report(format_args!(
            "Initialized empty repository in {}",
            store_path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::refs::HeadPointer;
    use crate::areas::repository::Repository;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    #[test]
    fn init_creates_the_store_layout() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::new(dir.path(), Box::new(std::io::sink())).unwrap();

        repository.init().unwrap();

        let store = repository.store_path();
        assert!(store.join("objects").is_dir());
        assert!(store.join("refs").join("heads").is_dir());
        assert_eq!(
            std::fs::read_to_string(store.join("HEAD")).unwrap(),
            "refs/heads/main"
        );
        assert!(repository.is_initialized());
        assert!(!repository.index().exists());
    }

    #[test]
    fn init_twice_keeps_existing_state() {
        let dir = TempDir::new().unwrap();
        let repository = Repository::new(dir.path(), Box::new(std::io::sink())).unwrap();
        repository.init().unwrap();
        let commit_id = crate::artifacts::objects::object_id::ObjectId::digest("index");
        repository.refs().update_head(commit_id.clone()).unwrap();

        repository.init().unwrap();

        assert_eq!(
            repository.refs().read_head().unwrap(),
            Some(HeadPointer::Commit(commit_id))
        );
    }
}
