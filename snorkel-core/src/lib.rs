pub mod config;
pub mod error;
pub mod paths;
pub mod provision;
pub mod template;
pub mod vault;
pub mod workspace;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigKey, NoteSettings};
pub use error::{ErrorKind, ProvisionError};
pub use paths::{DateKey, NotePath, VaultPath, resolve};
pub use provision::{Notice, Outcome, Provisioner};
pub use template::{CommandEngine, TemplateEngine};
pub use vault::{FsVault, MemVault, NodeKind, Vault};
pub use workspace::{RecordingWorkspace, Workspace};
