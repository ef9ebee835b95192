use crate::error::WorkspaceError;
use crate::paths::VaultPath;
use std::cell::RefCell;

/// Where notes are shown to the user once provisioned.
pub trait Workspace {
    fn open(&self, note: &VaultPath) -> Result<(), WorkspaceError>;
}

/// Remembers what was opened, in order. Useful for tests and for hosts that
/// defer the actual display until the command has finished.
#[derive(Debug, Default)]
pub struct RecordingWorkspace {
    opened: RefCell<Vec<VaultPath>>,
    refuse: bool,
}

impl RecordingWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// A workspace whose `open` always fails.
    pub fn refusing() -> Self {
        Self {
            opened: RefCell::new(Vec::new()),
            refuse: true,
        }
    }

    pub fn opened(&self) -> Vec<VaultPath> {
        self.opened.borrow().clone()
    }

    pub fn last_opened(&self) -> Option<VaultPath> {
        self.opened.borrow().last().cloned()
    }
}

impl Workspace for RecordingWorkspace {
    fn open(&self, note: &VaultPath) -> Result<(), WorkspaceError> {
        if self.refuse {
            return Err(WorkspaceError::Open {
                path: note.clone(),
                reason: "workspace refused to open the note".to_string(),
            });
        }
        self.opened.borrow_mut().push(note.clone());
        Ok(())
    }
}
