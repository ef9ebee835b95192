//! Template engine integration.
//!
//! Snorkel never interprets template directives itself. It copies the raw
//! template text into the new note and hands the note to an engine that
//! expands whatever the template contains.

use crate::error::TemplateError;
use crate::paths::VaultPath;
use crate::vault::Vault;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait TemplateEngine {
    fn name(&self) -> &str;

    /// Expands the directives in `note`, rewriting it in place.
    fn expand(&self, vault: &dyn Vault, note: &VaultPath) -> Result<(), TemplateError>;
}

/// An external program invoked as `<program> [args..] <absolute note path>`.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEngine {
    /// Resolves `command_line` (a program followed by optional arguments)
    /// to an installed program. `None` means no engine is available.
    pub fn locate(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let name = parts.next()?;
        let program = find_program(name)?;
        Some(Self {
            name: name.to_string(),
            program,
            args: parts.map(str::to_string).collect(),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl TemplateEngine for CommandEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn expand(&self, vault: &dyn Vault, note: &VaultPath) -> Result<(), TemplateError> {
        let path = vault
            .absolute(note)
            .ok_or_else(|| TemplateError::NotOnDisk(note.clone()))?;
        tracing::debug!(engine = %self.name, note = %note, "running template engine");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .output()
            .map_err(|source| TemplateError::Spawn {
                engine: self.name.clone(),
                source,
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(TemplateError::Engine {
                engine: self.name.clone(),
                path: note.clone(),
                reason,
            });
        }
        Ok(())
    }
}

fn find_program(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let full = dir.join(name);
        if full.is_file() {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{name}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::{FsVault, MemVault};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn locate_rejects_unknown_programs() {
        assert!(CommandEngine::locate("").is_none());
        assert!(CommandEngine::locate("snorkel-no-such-engine-xyz").is_none());
        assert!(CommandEngine::locate("/definitely/not/here/engine").is_none());
    }

    #[test]
    fn expand_needs_a_location_on_disk() {
        let tmp = tempdir().unwrap();
        let script = tmp.path().join("engine");
        fs::write(&script, "").unwrap();
        let engine = CommandEngine::locate(script.to_str().unwrap()).unwrap();

        let vault = MemVault::new().with_file("a.md", "");
        let err = engine.expand(&vault, &VaultPath::new("a.md")).unwrap_err();
        assert!(matches!(err, TemplateError::NotOnDisk(_)));
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn command_engine_rewrites_the_note() {
        let tmp = tempdir().unwrap();
        let script = write_script(tmp.path(), "expand", r#"printf 'expanded %s' "$1" > "$2""#);
        let engine = CommandEngine::locate(&format!("{} daily", script.display())).unwrap();

        let vault = FsVault::new(tmp.path().join("vault"));
        fs::create_dir_all(vault.root()).unwrap();
        let note = VaultPath::new("note.md");
        vault.create_file(&note, "<% tp.date.now() %>").unwrap();

        engine.expand(&vault, &note).unwrap();
        assert_eq!(vault.read(&note).unwrap(), "expanded daily");
    }

    #[cfg(unix)]
    #[test]
    fn command_engine_failure_carries_stderr() {
        let tmp = tempdir().unwrap();
        let script = write_script(tmp.path(), "broken", "echo 'bad directive' >&2; exit 3");
        let engine = CommandEngine::locate(script.to_str().unwrap()).unwrap();

        let vault = FsVault::new(tmp.path().join("vault"));
        fs::create_dir_all(vault.root()).unwrap();
        let note = VaultPath::new("note.md");
        vault.create_file(&note, "").unwrap();

        let err = engine.expand(&vault, &note).unwrap_err();
        match err {
            TemplateError::Engine { reason, .. } => assert_eq!(reason, "bad directive"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
