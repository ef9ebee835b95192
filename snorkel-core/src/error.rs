//! Error types shared by the vault, workspace, template engine and provisioner.

use std::io;
use thiserror::Error;

use crate::paths::VaultPath;

/// Failures raised by a [`Vault`](crate::vault::Vault) implementation.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("{0} already exists")]
    AlreadyExists(VaultPath),

    #[error("parent folder of {0} does not exist")]
    ParentMissing(VaultPath),

    #[error("{0} not found")]
    NotFound(VaultPath),

    #[error("{0} points outside the vault")]
    OutsideVault(VaultPath),

    #[error("{path}: {source}")]
    Io {
        path: VaultPath,
        #[source]
        source: io::Error,
    },
}

impl VaultError {
    pub(crate) fn io(path: &VaultPath, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::AlreadyExists => VaultError::AlreadyExists(path.clone()),
            io::ErrorKind::NotFound => VaultError::NotFound(path.clone()),
            _ => VaultError::Io {
                path: path.clone(),
                source,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("could not open {path}: {reason}")]
    Open { path: VaultPath, reason: String },
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template engine '{engine}' failed on {path}: {reason}")]
    Engine {
        engine: String,
        path: VaultPath,
        reason: String,
    },

    #[error("{0} has no location on disk")]
    NotOnDisk(VaultPath),

    #[error("could not run template engine '{engine}': {source}")]
    Spawn {
        engine: String,
        #[source]
        source: io::Error,
    },
}

/// Broad classification of a [`ProvisionError`], used to pick how it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Misconfiguration,
    MissingCollaborator,
    MissingResource,
    BackendInconsistency,
    Unclassified,
}

/// Everything that can stop a daily note provisioning operation.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(
        "Template path must use forward slashes (/), not backslashes (\\). Example: Path/To/Template.md"
    )]
    TemplatePathSeparator,

    #[error("Template engine not found")]
    TemplateEngineMissing,

    #[error("Template file not found: {0}")]
    TemplateNotFound(String),

    #[error("{0} exists but is not a file")]
    NotAFile(VaultPath),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl ProvisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProvisionError::TemplatePathSeparator => ErrorKind::Misconfiguration,
            ProvisionError::TemplateEngineMissing => ErrorKind::MissingCollaborator,
            ProvisionError::TemplateNotFound(_) => ErrorKind::MissingResource,
            ProvisionError::NotAFile(_) => ErrorKind::BackendInconsistency,
            ProvisionError::Vault(_)
            | ProvisionError::Workspace(_)
            | ProvisionError::Template(_) => ErrorKind::Unclassified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_onto_vault_variants() {
        let p = VaultPath::new("a/b.md");
        let exists = VaultError::io(&p, io::Error::from(io::ErrorKind::AlreadyExists));
        assert!(matches!(exists, VaultError::AlreadyExists(ref x) if x == &p));

        let missing = VaultError::io(&p, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(missing, VaultError::NotFound(_)));

        let denied = VaultError::io(&p, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, VaultError::Io { .. }));
    }

    #[test]
    fn kinds_follow_the_taxonomy() {
        assert_eq!(
            ProvisionError::TemplatePathSeparator.kind(),
            ErrorKind::Misconfiguration
        );
        assert_eq!(
            ProvisionError::TemplateEngineMissing.kind(),
            ErrorKind::MissingCollaborator
        );
        assert_eq!(
            ProvisionError::TemplateNotFound("T.md".into()).kind(),
            ErrorKind::MissingResource
        );
        assert_eq!(
            ProvisionError::NotAFile(VaultPath::new("x")).kind(),
            ErrorKind::BackendInconsistency
        );
        let vault: ProvisionError = VaultError::NotFound(VaultPath::new("x")).into();
        assert_eq!(vault.kind(), ErrorKind::Unclassified);
    }

    #[test]
    fn separator_message_shows_an_example() {
        let msg = ProvisionError::TemplatePathSeparator.to_string();
        assert!(msg.contains("forward slashes (/)"));
        assert!(msg.contains("backslashes (\\)"));
        assert!(msg.ends_with("Example: Path/To/Template.md"));
    }
}
