use snorkel_core::{Vault, VaultPath, Workspace, error::WorkspaceError};
use std::cell::RefCell;
use std::path::PathBuf;

/// Workspace backed by the user's editor.
///
/// A terminal editor takes over the terminal until it exits, so `open` only
/// queues the note; [`EditorWorkspace::take_opened`] hands it back once the
/// provisioning operation is over.
pub struct EditorWorkspace<'a> {
    vault: &'a dyn Vault,
    opened: RefCell<Option<PathBuf>>,
}

impl<'a> EditorWorkspace<'a> {
    pub fn new(vault: &'a dyn Vault) -> Self {
        Self {
            vault,
            opened: RefCell::new(None),
        }
    }

    pub fn take_opened(&self) -> Option<PathBuf> {
        self.opened.borrow_mut().take()
    }
}

impl Workspace for EditorWorkspace<'_> {
    fn open(&self, note: &VaultPath) -> Result<(), WorkspaceError> {
        let path = self.vault.absolute(note).ok_or_else(|| WorkspaceError::Open {
            path: note.clone(),
            reason: "note has no location on disk".to_string(),
        })?;
        if !path.is_file() {
            return Err(WorkspaceError::Open {
                path: note.clone(),
                reason: format!("{} is not a file", path.display()),
            });
        }
        tracing::debug!(path = %path.display(), "queued note for the editor");
        *self.opened.borrow_mut() = Some(path);
        Ok(())
    }
}
