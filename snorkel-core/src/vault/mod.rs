mod fs_vault;
mod mem_vault;

pub use fs_vault::FsVault;
pub use mem_vault::{MemVault, VaultCall};

use crate::error::VaultError;
use crate::paths::VaultPath;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, VaultError>;

/// What occupies a path in the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

/// Raw storage I/O for notes.
///
/// The vault owns every node; callers only address them by [`VaultPath`].
/// Implementations use `&self` throughout, interior mutability is up to them.
pub trait Vault {
    /// Returns `Ok(None)` when nothing is at `path`.
    fn node_at(&self, path: &VaultPath) -> Result<Option<NodeKind>>;

    /// Creates `path` and any missing ancestors.
    /// Fails with [`VaultError::AlreadyExists`] if anything is already there.
    fn create_folder(&self, path: &VaultPath) -> Result<()>;

    /// Creates a new file with `initial` as its content.
    /// Never overwrites: an occupied path is [`VaultError::AlreadyExists`],
    /// a missing parent folder is [`VaultError::ParentMissing`].
    fn create_file(&self, path: &VaultPath, initial: &str) -> Result<()>;

    fn read(&self, path: &VaultPath) -> Result<String>;

    /// Replaces the content of an existing file.
    fn modify(&self, path: &VaultPath, content: &str) -> Result<()>;

    /// Location on disk, when the vault has one.
    fn absolute(&self, path: &VaultPath) -> Option<PathBuf>;
}
