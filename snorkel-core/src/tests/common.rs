use crate::config::{Config, NoteSettings};
use crate::error::TemplateError;
use crate::paths::VaultPath;
use crate::template::TemplateEngine;
use crate::vault::Vault;
use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;

/// Test helper to create a `Config` rooted at `vault_dir`.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(vault_dir: PathBuf) -> Config {
    Config {
        vault_dir,
        base_folder: String::new(),
        template_path: String::new(),
        template_engine: None,
        editor: None,
        settle_delay: Duration::ZERO,
    }
}

pub fn settings(base_folder: &str, template_path: &str) -> NoteSettings {
    NoteSettings {
        base_folder: base_folder.to_string(),
        template_path: template_path.to_string(),
    }
}

/// Template engine that records each note it is asked to expand, together
/// with the note's content at that moment.
#[derive(Debug, Default)]
pub struct FakeEngine {
    expanded: RefCell<Vec<VaultPath>>,
    seen: RefCell<Vec<String>>,
    fail: bool,
}

impl FakeEngine {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn expanded(&self) -> Vec<VaultPath> {
        self.expanded.borrow().clone()
    }

    pub fn seen_content(&self) -> Vec<String> {
        self.seen.borrow().clone()
    }
}

impl TemplateEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    fn expand(&self, vault: &dyn Vault, note: &VaultPath) -> Result<(), TemplateError> {
        if self.fail {
            return Err(TemplateError::Engine {
                engine: self.name().to_string(),
                path: note.clone(),
                reason: "unknown directive".to_string(),
            });
        }
        let content = vault.read(note).map_err(|e| TemplateError::Engine {
            engine: self.name().to_string(),
            path: note.clone(),
            reason: e.to_string(),
        })?;
        self.seen.borrow_mut().push(content);
        self.expanded.borrow_mut().push(note.clone());
        Ok(())
    }
}
