use super::CliModeResult;
use crate::{ConfigAction, render::Renderer};
use anyhow::{Result, anyhow};
use snorkel_core::{Config, ConfigKey};
use std::path::Path;
use strum::IntoEnumIterator;

/// Reads or updates settings. `config_path` is where changes are saved.
pub fn config_mode(
    action: Option<&ConfigAction>,
    renderer: &Renderer,
    mut config: Config,
    config_path: Option<&Path>,
) -> Result<CliModeResult> {
    match action.unwrap_or(&ConfigAction::Show) {
        ConfigAction::Show => {
            let rows: Vec<(String, String)> = ConfigKey::iter()
                .map(|k| (k.to_string(), config.get(k)))
                .collect();
            renderer.print_settings(&rows);
        }
        ConfigAction::Path => {
            let path = config_path.ok_or_else(no_location)?;
            renderer.print_path(path);
        }
        ConfigAction::Get { key } => {
            println!("{}", config.get(*key));
        }
        ConfigAction::Set { key, value } => {
            let path = config_path.ok_or_else(no_location)?;
            config.set(*key, value)?;
            config.save_to(path)?;
            tracing::debug!(key = %key, path = %path.display(), "saved setting");
            renderer.print_info(&format!("{key} = {}", config.get(*key)));
        }
    }
    Ok(CliModeResult::Finish)
}

fn no_location() -> anyhow::Error {
    anyhow!("could not determine where the config file lives; pass --config")
}
