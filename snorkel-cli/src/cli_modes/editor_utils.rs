use anyhow::{Context, Result};
use std::{path::Path, process::Command};

pub fn resolve_editor(editor: Option<&str>) -> String {
    editor
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vim".into())
}

/// Runs `editor_cmd` (program plus optional arguments, e.g. `code -w`) on `path`
/// and waits for it to exit.
pub fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let mut parts = editor_cmd.split_whitespace();
    let program = parts.next().unwrap_or("vim");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("launching editor '{program}'"))?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_editor_wins() {
        assert_eq!(resolve_editor(Some("hx")), "hx");
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_is_an_error() {
        let err = open_file_in_editor("false", Path::new("note.md")).unwrap_err();
        assert!(err.to_string().contains("Editor exited"));
        open_file_in_editor("true", Path::new("note.md")).unwrap();
    }
}
