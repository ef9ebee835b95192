//! Date-keyed path derivation for daily notes.
//!
//! A note for 2024-03-07 under base folder `Notes` lives at
//! `Notes/2024/03/2024-03-07.md`. Nothing here touches the vault.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

const SEPARATOR: char = '/';

/// A vault-relative, forward-slash separated path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VaultPath(String);

impl VaultPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends `segment`, which may itself hold several `/`-separated parts.
    /// Empty parts are skipped, so the result never has a leading, trailing
    /// or doubled separator.
    pub fn join(&self, segment: &str) -> VaultPath {
        let mut joined = self.0.clone();
        for part in segment.split(SEPARATOR).filter(|p| !p.is_empty()) {
            if !joined.is_empty() {
                joined.push(SEPARATOR);
            }
            joined.push_str(part);
        }
        VaultPath(joined)
    }

    pub fn parent(&self) -> Option<VaultPath> {
        if self.0.is_empty() {
            return None;
        }
        match self.0.rfind(SEPARATOR) {
            Some(idx) => Some(VaultPath(self.0[..idx].to_string())),
            None => Some(VaultPath::default()),
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.0.rsplit(SEPARATOR).next().filter(|s| !s.is_empty())
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }
}

impl fmt::Display for VaultPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VaultPath {
    fn from(s: &str) -> Self {
        VaultPath::new(s)
    }
}

/// The year/month/day triple a daily note is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    pub fn today() -> Self {
        Local::now().date_naive().into()
    }

    pub fn year_folder_name(&self) -> String {
        format!("{}", self.year)
    }

    pub fn month_folder_name(&self) -> String {
        format!("{:02}", self.month)
    }

    pub fn day_file_name(&self) -> String {
        format!("{}-{:02}-{:02}.md", self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Where the note for a given day lives: its folder and the file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePath {
    pub dir: VaultPath,
    pub file: VaultPath,
}

impl NotePath {
    pub fn leaf_name(&self) -> &str {
        self.file.file_name().unwrap_or_default()
    }
}

/// Builds `base_folder/YYYY/MM/YYYY-MM-DD.md`, leaving out the base folder
/// when it is empty.
pub fn resolve(date: DateKey, base_folder: &str) -> NotePath {
    let dir = VaultPath::default()
        .join(base_folder)
        .join(&date.year_folder_name())
        .join(&date.month_folder_name());
    let file = dir.join(&date.day_file_name());
    NotePath { dir, file }
}
