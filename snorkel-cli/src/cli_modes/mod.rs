mod cli_mode;
mod config_mode;
mod editor_utils;
mod note_mode;

pub use cli_mode::CliModeResult;
pub use config_mode::config_mode;
pub use note_mode::note_mode;
