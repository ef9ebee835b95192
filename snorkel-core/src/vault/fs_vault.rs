use super::{NodeKind, Result, Vault};
use crate::error::VaultError;
use crate::paths::VaultPath;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A vault backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps `path` under the root. `..` segments are refused so nothing
    /// outside the vault is ever touched.
    fn full_path(&self, path: &VaultPath) -> Result<PathBuf> {
        if path.segments().any(|segment| segment == "..") {
            return Err(VaultError::OutsideVault(path.clone()));
        }
        Ok(path
            .segments()
            .fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }
}

impl Vault for FsVault {
    fn node_at(&self, path: &VaultPath) -> Result<Option<NodeKind>> {
        match fs::metadata(self.full_path(path)?) {
            Ok(meta) if meta.is_file() => Ok(Some(NodeKind::File)),
            Ok(_) => Ok(Some(NodeKind::Folder)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::io(path, e)),
        }
    }

    fn create_folder(&self, path: &VaultPath) -> Result<()> {
        if self.node_at(path)?.is_some() {
            return Err(VaultError::AlreadyExists(path.clone()));
        }
        fs::create_dir_all(self.full_path(path)?).map_err(|e| VaultError::io(path, e))
    }

    fn create_file(&self, path: &VaultPath, initial: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.is_root() && self.node_at(&parent)? != Some(NodeKind::Folder) {
                return Err(VaultError::ParentMissing(path.clone()));
            }
        }
        let mut f = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.full_path(path)?)
            .map_err(|e| VaultError::io(path, e))?;
        f.write_all(initial.as_bytes())
            .map_err(|e| VaultError::io(path, e))
    }

    fn read(&self, path: &VaultPath) -> Result<String> {
        fs::read_to_string(self.full_path(path)?).map_err(|e| VaultError::io(path, e))
    }

    fn modify(&self, path: &VaultPath, content: &str) -> Result<()> {
        if self.node_at(path)? != Some(NodeKind::File) {
            return Err(VaultError::NotFound(path.clone()));
        }
        fs::write(self.full_path(path)?, content).map_err(|e| VaultError::io(path, e))
    }

    fn absolute(&self, path: &VaultPath) -> Option<PathBuf> {
        self.full_path(path).ok()
    }
}
