mod cli;
mod cli_modes;
mod editor_workspace;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, ConfigAction};
use cli_modes::{CliModeResult, config_mode, note_mode};
use render::{RenderOptions, Renderer};
use snorkel_core::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(CliModeResult::Finish) => ExitCode::SUCCESS,
        Ok(CliModeResult::Failed) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("snorkel: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<CliModeResult> {
    let cli = Cli::parse();
    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("snorkel: could not initialise logging: {e}");
    }

    let config_path = cli.config.clone().or_else(Config::default_file_path);
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(
        config = ?config_path,
        vault = %config.vault_dir.display(),
        "configuration loaded"
    );

    let renderer = Renderer::new(RenderOptions {
        use_color: cli.color.use_color(),
    });

    match &cli.command {
        Some(Command::Config { action }) => {
            config_mode(action.as_ref(), &renderer, config, config_path.as_deref())
        }
        None => note_mode(&cli, &renderer, &config),
    }
}
