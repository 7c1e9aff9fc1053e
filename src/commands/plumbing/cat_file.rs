use crate::areas::repository::Repository;
use crate::artifacts::commit::{INDEX_SNAPSHOT_FILE, MESSAGE_FILE};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, RepositoryError, Result};
use bytes::Bytes;
use std::io::Write;

impl Repository {
    /// Print the content of a blob, or the message and index of a commit
    pub fn cat_file(&self, object_id: &str) -> Result<Bytes> {
        self.ensure_initialized()?;
        let object_id = ObjectId::try_parse(object_id)?;

        let content = if self.database().exists(&object_id) {
            self.database().load_blob(&object_id)?.into_content()
        } else if self.database().commit_exists(&object_id) {
            self.read_commit(&object_id)?
        } else {
            return Err(RepositoryError::NotFound(object_id));
        };

        let mut writer = self.writer();
        writer
            .write_all(&content)
            .and_then(|_| writer.flush())
            .map_err(RepositoryError::Output)?;

        Ok(content)
    }

    fn read_commit(&self, commit_id: &ObjectId) -> Result<Bytes> {
        let commit_path = self.database().commit_path(commit_id);
        let message_path = commit_path.join(MESSAGE_FILE);
        let index_path = commit_path.join(INDEX_SNAPSHOT_FILE);

        let message = std::fs::read_to_string(&message_path).with_path(&message_path)?;
        let index = std::fs::read_to_string(&index_path).with_path(&index_path)?;

        Ok(Bytes::from(format!("{message}\n\n{index}\n")))
    }
}
