use super::{NodeKind, Result, Vault};
use crate::error::VaultError;
use crate::paths::VaultPath;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone)]
enum MemNode {
    Folder,
    File(String),
}

/// A create, read or modify call made against a [`MemVault`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultCall {
    CreateFolder(VaultPath),
    CreateFile(VaultPath, String),
    Read(VaultPath),
    Modify(VaultPath, String),
}

/// In-memory vault for tests and embedders without a filesystem.
///
/// Uses `RefCell`/`Cell` since provisioning is single-threaded.
#[derive(Debug, Default)]
pub struct MemVault {
    nodes: RefCell<BTreeMap<VaultPath, MemNode>>,
    calls: RefCell<Vec<VaultCall>>,
    simulate_write_error: Cell<bool>,
}

impl MemVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file (and its folders) without recording any calls.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        let path = VaultPath::new(path);
        if let Some(parent) = path.parent() {
            self.insert_folders(&parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path, MemNode::File(content.to_string()));
        self
    }

    /// Seeds a folder (and its ancestors) without recording any calls.
    pub fn with_folder(self, path: &str) -> Self {
        self.insert_folders(&VaultPath::new(path));
        self
    }

    /// Makes every subsequent create/modify fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn calls(&self) -> Vec<VaultCall> {
        self.calls.borrow().clone()
    }

    pub fn content(&self, path: &str) -> Option<String> {
        match self.nodes.borrow().get(&VaultPath::new(path)) {
            Some(MemNode::File(text)) => Some(text.clone()),
            _ => None,
        }
    }

    pub fn file_count(&self) -> usize {
        self.nodes
            .borrow()
            .values()
            .filter(|n| matches!(n, MemNode::File(_)))
            .count()
    }

    fn insert_folders(&self, path: &VaultPath) {
        let mut nodes = self.nodes.borrow_mut();
        let mut current = VaultPath::default();
        for segment in path.segments() {
            current = current.join(segment);
            nodes.entry(current.clone()).or_insert(MemNode::Folder);
        }
    }

    fn check_writable(&self, path: &VaultPath) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(VaultError::Io {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "simulated write error"),
            });
        }
        Ok(())
    }

    fn record(&self, call: VaultCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Vault for MemVault {
    fn node_at(&self, path: &VaultPath) -> Result<Option<NodeKind>> {
        if path.is_root() {
            return Ok(Some(NodeKind::Folder));
        }
        Ok(self.nodes.borrow().get(path).map(|n| match n {
            MemNode::Folder => NodeKind::Folder,
            MemNode::File(_) => NodeKind::File,
        }))
    }

    fn create_folder(&self, path: &VaultPath) -> Result<()> {
        self.record(VaultCall::CreateFolder(path.clone()));
        self.check_writable(path)?;
        if self.node_at(path)?.is_some() {
            return Err(VaultError::AlreadyExists(path.clone()));
        }
        let mut current = VaultPath::default();
        for segment in path.segments() {
            current = current.join(segment);
            if self.node_at(&current)? == Some(NodeKind::File) {
                return Err(VaultError::AlreadyExists(current));
            }
        }
        self.insert_folders(path);
        Ok(())
    }

    fn create_file(&self, path: &VaultPath, initial: &str) -> Result<()> {
        self.record(VaultCall::CreateFile(path.clone(), initial.to_string()));
        self.check_writable(path)?;
        if self.node_at(path)?.is_some() {
            return Err(VaultError::AlreadyExists(path.clone()));
        }
        let parent = path.parent().unwrap_or_default();
        if self.node_at(&parent)? != Some(NodeKind::Folder) {
            return Err(VaultError::ParentMissing(path.clone()));
        }
        self.nodes
            .borrow_mut()
            .insert(path.clone(), MemNode::File(initial.to_string()));
        Ok(())
    }

    fn read(&self, path: &VaultPath) -> Result<String> {
        self.record(VaultCall::Read(path.clone()));
        match self.nodes.borrow().get(path) {
            Some(MemNode::File(text)) => Ok(text.clone()),
            _ => Err(VaultError::NotFound(path.clone())),
        }
    }

    fn modify(&self, path: &VaultPath, content: &str) -> Result<()> {
        self.record(VaultCall::Modify(path.clone(), content.to_string()));
        self.check_writable(path)?;
        match self.nodes.borrow_mut().get_mut(path) {
            Some(MemNode::File(text)) => {
                *text = content.to_string();
                Ok(())
            }
            _ => Err(VaultError::NotFound(path.clone())),
        }
    }

    fn absolute(&self, _path: &VaultPath) -> Option<PathBuf> {
        None
    }
}
