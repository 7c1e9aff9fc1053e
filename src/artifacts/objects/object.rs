use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::path::PathBuf;

/// Anything that can be written to the object database
pub trait Object {
    /// Exact bytes that get hashed and stored
    fn content(&self) -> &Bytes;

    fn object_id(&self) -> ObjectId {
        ObjectId::digest(self.content())
    }

    fn object_path(&self) -> PathBuf {
        self.object_id().to_path()
    }
}
