pub enum CliModeResult {
    Finish,
    /// A notice was already shown to the user; only the exit code is left.
    Failed,
}
