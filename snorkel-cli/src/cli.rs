use crate::render::ColorMode;
use clap::{Parser, Subcommand};
use snorkel_core::ConfigKey;
use std::path::PathBuf;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Opens today's note, creating it when needed.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Config file to use instead of the standard locations.
    #[arg(long, global = true, env = "SNORKEL_CONFIG")]
    pub config: Option<PathBuf>,
    /// Prints where today's note lives, without creating it.
    #[arg(long, short, conflicts_with = "no_open")]
    pub path: bool,
    /// Provisions the note but prints its location instead of launching an editor.
    #[arg(long)]
    pub no_open: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Logs every provisioning step to stderr. `SNORKEL_LOG` takes precedence.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Prints every setting.
    Show,
    /// Prints the config file location.
    Path,
    /// Prints one setting.
    Get {
        #[arg(value_parser = parse_key)]
        key: ConfigKey,
    },
    /// Changes one setting and saves it. An empty value clears optional settings.
    Set {
        #[arg(value_parser = parse_key)]
        key: ConfigKey,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

fn parse_key(s: &str) -> Result<ConfigKey, String> {
    ConfigKey::from_str(s).map_err(|_| {
        let known: Vec<String> = ConfigKey::iter().map(|k| k.to_string()).collect();
        format!("unknown key '{s}', expected one of: {}", known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn about_comes_from_the_doc_comment() {
        let cmd = Cli::command();
        let about = cmd.get_about().map(|a| a.to_string()).unwrap_or_default();
        assert!(about.starts_with("Opens today's note, creating it when needed"));
        assert!(about.is_ascii());
    }

    #[test]
    fn parses_config_set() {
        let cli = Cli::try_parse_from(["snorkel", "config", "set", "base-folder", "Notes"]).unwrap();
        match cli.command {
            Some(Command::Config {
                action: Some(ConfigAction::Set { key, value }),
            }) => {
                assert_eq!(key, ConfigKey::BaseFolder);
                assert_eq!(value, "Notes");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_key() {
        let err = Cli::try_parse_from(["snorkel", "config", "get", "colour"]).unwrap_err();
        assert!(err.to_string().contains("template-path"));
    }

    #[test]
    fn path_and_no_open_conflict() {
        assert!(Cli::try_parse_from(["snorkel", "--path", "--no-open"]).is_err());
    }
}
