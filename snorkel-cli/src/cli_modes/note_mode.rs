use super::{
    CliModeResult,
    editor_utils::{open_file_in_editor, resolve_editor},
};
use crate::{Cli, editor_workspace::EditorWorkspace, render::Renderer};
use anyhow::{Context, Result};
use snorkel_core::{
    CommandEngine, Config, DateKey, FsVault, Notice, Provisioner, TemplateEngine, Vault, resolve,
};
use std::fs;

/// Creates or opens today's note.
pub fn note_mode(cli: &Cli, renderer: &Renderer, config: &Config) -> Result<CliModeResult> {
    let settings = config.settings();
    let today = DateKey::today();
    let vault = FsVault::new(&config.vault_dir);

    if cli.path {
        let note = resolve(today, &settings.base_folder);
        if let Some(path) = vault.absolute(&note.file) {
            renderer.print_path(&path);
        }
        return Ok(CliModeResult::Finish);
    }

    fs::create_dir_all(&config.vault_dir)
        .with_context(|| format!("creating vault dir {}", config.vault_dir.display()))?;

    let engine = config.template_engine.as_deref().and_then(|cmd| {
        let found = CommandEngine::locate(cmd);
        if found.is_none() {
            tracing::warn!(command = cmd, "template engine is configured but not installed");
        }
        found
    });
    let workspace = EditorWorkspace::new(&vault);
    let provisioner = Provisioner::new(&vault, &workspace)
        .with_engine(engine.as_ref().map(|e| e as &dyn TemplateEngine))
        .with_settle_delay(config.settle_delay);

    let result = provisioner.open_daily_note(today, &settings);
    match &result {
        Ok(outcome) => renderer.print_outcome(outcome),
        Err(err) => {
            tracing::debug!(error = ?err, "provisioning failed");
            renderer.print_error(&Notice::from(err).to_string());
        }
    }

    // The note is shown even when templating failed after it was created.
    if let Some(path) = workspace.take_opened() {
        if cli.no_open {
            renderer.print_path(&path);
        } else {
            let editor = resolve_editor(config.editor.as_deref());
            open_file_in_editor(&editor, &path)?;
        }
    }

    Ok(match result {
        Ok(_) => CliModeResult::Finish,
        Err(_) => CliModeResult::Failed,
    })
}
