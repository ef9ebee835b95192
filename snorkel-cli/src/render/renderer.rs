use super::theme::OneDark;
use snorkel_core::Outcome;
use std::path::Path;
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: OneDark::skin(),
            opts,
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            println!("{}", message.with(OneDark::FG));
        } else {
            println!("{message}");
        }
    }

    /// Notices go to stderr so stdout stays usable in scripts.
    pub fn print_error(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.with(OneDark::RED));
        } else {
            eprintln!("{message}");
        }
    }

    /// Plain path on stdout, never styled.
    pub fn print_path(&self, path: &Path) {
        println!("{}", path.display());
    }

    pub fn print_outcome(&self, outcome: &Outcome) {
        let (verb, path) = match outcome {
            Outcome::OpenedExisting(p) => ("Opened", p),
            Outcome::Created(p) => ("Created", p),
            Outcome::Templated(p) => ("Created from template", p),
        };
        if self.opts.use_color {
            println!("{} {}", verb.with(OneDark::GREEN), path.as_str().with(OneDark::YELLOW));
        } else {
            println!("{verb} {path}");
        }
    }

    pub fn print_settings(&self, rows: &[(String, String)]) {
        if self.opts.use_color {
            let mut md = String::from("|:-|:-|\n|**key**|**value**|\n|-|-|\n");
            for (key, value) in rows {
                md.push_str(&format!("|{key}|{}|\n", escape_cell(value)));
            }
            md.push_str("|-|-|\n");
            self.skin.print_text(&md);
        } else {
            for (key, value) in rows {
                println!("{key} = {value}");
            }
        }
    }
}

fn escape_cell(value: &str) -> String {
    if value.is_empty() {
        "*(unset)*".to_string()
    } else {
        format!("`{}`", value.replace('|', "\\|"))
    }
}
