use crate::provision::DEFAULT_SETTLE_DELAY;
use anyhow::{Context, Result, bail};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute directory of the vault that holds the notes.
    pub vault_dir: PathBuf,
    /// Vault-relative folder daily notes are filed under. Empty means the vault root.
    pub base_folder: String,
    /// Vault-relative, forward-slash path of the template for new notes. Empty disables templating.
    pub template_path: String,
    /// Command that expands template directives in a note, e.g. `tpl-expand --strict`.
    pub template_engine: Option<String>,
    /// Preferred editor name/binary. The CLI falls back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Pause between opening a new note and writing the template into it.
    pub settle_delay: Duration,
}

/// The part of the configuration a single provisioning operation reads.
/// Taken once per operation so later edits never leak into a running one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSettings {
    pub base_folder: String,
    pub template_path: String,
}

/// Keys accepted by [`Config::get`] and [`Config::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    VaultDir,
    BaseFolder,
    TemplatePath,
    TemplateEngine,
    Editor,
    SettleDelayMs,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    vault_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    editor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settle_delay_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

impl Config {
    /// Loads the first config file found in the standard locations, or the
    /// defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::config_file_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads `path`, merging its values over the defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file_config =
            Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_file_config(file_config))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config dir {}", parent.display()))?;
        }
        let s = toml::to_string(&self.to_file_config()).context("serializing config")?;
        fs::write(path, s).with_context(|| format!("writing {}", path.display()))
    }

    /// The file `load` would read, or where `save_to` should write when no
    /// file exists yet.
    pub fn default_file_path() -> Option<PathBuf> {
        let candidates = Self::config_file_paths();
        candidates
            .iter()
            .find(|p| p.exists())
            .or_else(|| candidates.first())
            .cloned()
    }

    pub fn settings(&self) -> NoteSettings {
        NoteSettings {
            base_folder: self.base_folder.clone(),
            template_path: self.template_path.clone(),
        }
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::VaultDir => self.vault_dir.display().to_string(),
            ConfigKey::BaseFolder => self.base_folder.clone(),
            ConfigKey::TemplatePath => self.template_path.clone(),
            ConfigKey::TemplateEngine => self.template_engine.clone().unwrap_or_default(),
            ConfigKey::Editor => self.editor.clone().unwrap_or_default(),
            ConfigKey::SettleDelayMs => self.settle_delay.as_millis().to_string(),
        }
    }

    /// Updates one setting. Empty values clear optional settings.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            ConfigKey::VaultDir => {
                if value.is_empty() {
                    bail!("vault-dir cannot be empty");
                }
                self.vault_dir = PathBuf::from(value);
            }
            ConfigKey::BaseFolder => self.base_folder = value.to_string(),
            ConfigKey::TemplatePath => self.template_path = value.to_string(),
            ConfigKey::TemplateEngine => self.template_engine = non_empty(value),
            ConfigKey::Editor => self.editor = non_empty(value),
            ConfigKey::SettleDelayMs => {
                let ms: u64 = value
                    .parse()
                    .with_context(|| format!("settle-delay-ms must be a number, got '{value}'"))?;
                self.settle_delay = Duration::from_millis(ms);
            }
        }
        Ok(())
    }

    fn from_file_config(fc: FileConfig) -> Self {
        Self {
            vault_dir: fc.vault_dir.unwrap_or_else(Self::default_vault_dir),
            base_folder: fc.base_folder.unwrap_or_default(),
            template_path: fc.template_path.unwrap_or_default(),
            template_engine: fc.template_engine.filter(|s| !s.trim().is_empty()),
            editor: fc.editor.filter(|s| !s.trim().is_empty()),
            settle_delay: fc
                .settle_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_SETTLE_DELAY),
        }
    }

    fn to_file_config(&self) -> FileConfig {
        FileConfig {
            vault_dir: Some(self.vault_dir.clone()),
            base_folder: Some(self.base_folder.clone()),
            template_path: Some(self.template_path.clone()),
            template_engine: self.template_engine.clone(),
            editor: self.editor.clone(),
            settle_delay_ms: Some(self.settle_delay.as_millis() as u64),
        }
    }

    /// Default vault root: `{data_dir}/snorkel`
    /// - macOS:   `~/Library/Application Support/snorkel`
    /// - Linux:   `$XDG_DATA_HOME/snorkel` or `~/.local/share/snorkel`
    /// - Windows: `%APPDATA%\snorkel`
    fn default_vault_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("snorkel")
        } else {
            PathBuf::from("./snorkel")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("snorkel")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("snorkel").join("config.toml");
            if !v.contains(&native) {
                v.push(native);
            }
        }
        v
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    use tempfile::tempdir;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("snorkel")
                .join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
        }
    }

    #[test]
    fn parse_file_merges_over_defaults() {
        let toml = r#"
            vault_dir = "/tmp/vault"
            base_folder = "Notes"
        "#;
        let cfg = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert_eq!(cfg.vault_dir, PathBuf::from("/tmp/vault"));
        assert_eq!(cfg.base_folder, "Notes");
        assert_eq!(cfg.template_path, "");
        assert_eq!(cfg.template_engine, None);
        assert_eq!(cfg.settle_delay, DEFAULT_SETTLE_DELAY);
    }

    #[test]
    fn blank_optional_values_are_unset() {
        let toml = r#"
            editor = "  "
            template_engine = ""
        "#;
        let cfg = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert_eq!(cfg.editor, None);
        assert_eq!(cfg.template_engine, None);
    }

    #[test]
    fn parse_file_rejects_bad_types() {
        assert!(Config::parse_file("settle_delay_ms = \"soon\"").is_err());
    }

    #[test]
    fn load_from_missing_file_gives_defaults() {
        let tmp = tempdir().unwrap();
        let cfg = Config::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("cfg").join("config.toml");
        let mut cfg = Config::default();
        cfg.set(ConfigKey::VaultDir, "/srv/vault").unwrap();
        cfg.set(ConfigKey::BaseFolder, "Daily").unwrap();
        cfg.set(ConfigKey::TemplatePath, "Templates/Daily.md").unwrap();
        cfg.set(ConfigKey::TemplateEngine, "tpl-expand").unwrap();
        cfg.set(ConfigKey::SettleDelayMs, "250").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.settle_delay, Duration::from_millis(250));
    }

    #[test]
    fn settings_snapshot_is_detached() {
        let mut cfg = Config::default();
        cfg.set(ConfigKey::BaseFolder, "Notes").unwrap();
        let snapshot = cfg.settings();
        cfg.set(ConfigKey::BaseFolder, "Other").unwrap();
        assert_eq!(snapshot.base_folder, "Notes");
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = Config::default();
        assert!(cfg.set(ConfigKey::SettleDelayMs, "fast").is_err());
        assert!(cfg.set(ConfigKey::VaultDir, " ").is_err());
        cfg.set(ConfigKey::Editor, "hx").unwrap();
        assert_eq!(cfg.get(ConfigKey::Editor), "hx");
        cfg.set(ConfigKey::Editor, "").unwrap();
        assert_eq!(cfg.editor, None);
    }

    #[test]
    fn keys_are_kebab_case() {
        assert_eq!(ConfigKey::from_str("base-folder").unwrap(), ConfigKey::BaseFolder);
        assert_eq!(ConfigKey::SettleDelayMs.to_string(), "settle-delay-ms");
        assert!(ConfigKey::from_str("base_folder").is_err());
        assert_eq!(ConfigKey::iter().count(), 6);
    }
}
