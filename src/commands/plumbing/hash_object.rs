use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Print the digest of a file, storing it as a blob when `write` is set
    pub fn hash_object(&self, object_path: &str, write: bool) -> Result<ObjectId> {
        let content = self.workspace().read_file(object_path.as_ref())?;
        let blob = Blob::new(content);

        let object_id = if write {
            self.ensure_initialized()?;
            self.database().store_object(&blob)?
        } else {
            blob.object_id()
        };

        self.report(format_args!("{object_id}"))?;

        Ok(object_id)
    }
}
