//! Create-or-open protocol for the daily note.
//!
//! One call to [`Provisioner::provision_and_open`] walks:
//!
//! ```text
//! check existence ─┬─ file ──────────────> open existing
//!                  ├─ folder ────────────> error (not a file)
//!                  └─ absent ─> ensure folder ─> create empty file ─> open
//!                                 └─ template configured? ─> validate path
//!                                    ─> engine present? ─> settle ─> read template
//!                                    ─> overwrite note ─> expand
//! ```
//!
//! Nothing is rolled back on failure. The note is opened before templating so
//! the user has it even when templating fails.
//!
//! Two invocations racing on the same day are not guarded against: the second
//! writer gets [`VaultError::AlreadyExists`](crate::error::VaultError) from the
//! vault and reports it.

use crate::config::NoteSettings;
use crate::error::{ErrorKind, ProvisionError};
use crate::paths::{DateKey, NotePath, VaultPath, resolve};
use crate::template::TemplateEngine;
use crate::vault::{NodeKind, Vault};
use crate::workspace::Workspace;
use std::fmt;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Pause between opening a new note and rewriting its content.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// How a successful provisioning operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    OpenedExisting(VaultPath),
    Created(VaultPath),
    Templated(VaultPath),
}

impl Outcome {
    pub fn path(&self) -> &VaultPath {
        match self {
            Outcome::OpenedExisting(p) | Outcome::Created(p) | Outcome::Templated(p) => p,
        }
    }
}

/// The one message shown to the user when provisioning fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ProvisionError> for Notice {
    fn from(err: &ProvisionError) -> Self {
        let kind = err.kind();
        let message = match kind {
            ErrorKind::Unclassified | ErrorKind::BackendInconsistency => {
                format!("Error creating daily note: {err}")
            }
            _ => err.to_string(),
        };
        Notice { kind, message }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub struct Provisioner<'a> {
    vault: &'a dyn Vault,
    workspace: &'a dyn Workspace,
    engine: Option<&'a dyn TemplateEngine>,
    settle_delay: Duration,
}

impl<'a> Provisioner<'a> {
    pub fn new(vault: &'a dyn Vault, workspace: &'a dyn Workspace) -> Self {
        Self {
            vault,
            workspace,
            engine: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Sets the template engine, if one is installed.
    pub fn with_engine(mut self, engine: Option<&'a dyn TemplateEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Resolves the note for `date` and provisions it.
    pub fn open_daily_note(
        &self,
        date: DateKey,
        settings: &NoteSettings,
    ) -> Result<Outcome, ProvisionError> {
        let note = resolve(date, &settings.base_folder);
        self.provision_and_open(&note, settings)
    }

    /// Opens the note at `note.file`, creating it (and its folder) first when
    /// it does not exist, then applies the configured template to new notes.
    pub fn provision_and_open(
        &self,
        note: &NotePath,
        settings: &NoteSettings,
    ) -> Result<Outcome, ProvisionError> {
        debug!(path = %note.file, "checking existence");
        match self.vault.node_at(&note.file)? {
            Some(NodeKind::File) => {
                debug!(path = %note.file, "opening existing note");
                self.workspace.open(&note.file)?;
                return Ok(Outcome::OpenedExisting(note.file.clone()));
            }
            Some(NodeKind::Folder) => return Err(ProvisionError::NotAFile(note.file.clone())),
            None => {}
        }

        if self.vault.node_at(&note.dir)?.is_none() {
            debug!(dir = %note.dir, "creating folder");
            self.vault.create_folder(&note.dir)?;
        }

        debug!(path = %note.file, "creating note");
        self.vault.create_file(&note.file, "")?;
        self.workspace.open(&note.file)?;

        let template = settings.template_path.as_str();
        if template.is_empty() {
            return Ok(Outcome::Created(note.file.clone()));
        }

        self.apply_template(&note.file, template)?;
        Ok(Outcome::Templated(note.file.clone()))
    }

    fn apply_template(&self, note: &VaultPath, template: &str) -> Result<(), ProvisionError> {
        debug!(template, "validating template path");
        if template.contains('\\') {
            return Err(ProvisionError::TemplatePathSeparator);
        }

        let engine = self.engine.ok_or(ProvisionError::TemplateEngineMissing)?;
        debug!(engine = engine.name(), "template engine resolved");

        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }

        let template_path = VaultPath::new(template);
        if self.vault.node_at(&template_path)? != Some(NodeKind::File) {
            return Err(ProvisionError::TemplateNotFound(template.to_string()));
        }

        debug!(template, "reading template");
        let content = self.vault.read(&template_path)?;
        debug!(path = %note, bytes = content.len(), "writing template into note");
        self.vault.modify(note, &content)?;

        debug!(path = %note, "expanding template");
        engine.expand(self.vault, note)?;
        Ok(())
    }
}
