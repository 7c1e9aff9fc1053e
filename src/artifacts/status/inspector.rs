use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use derive_new::new;

/// Compares working tree content against recorded digests
#[derive(new)]
pub struct Inspector<'w> {
    workspace: &'w Workspace,
}

impl<'w> Inspector<'w> {
    pub fn is_content_changed(&self, name: &str, oid: &ObjectId) -> Result<bool> {
        let content = self
            .workspace
            .read_file(&self.workspace.absolute_path(name))?;

        Ok(ObjectId::digest(&content) != *oid)
    }
}
