use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sends `tracing` events to stderr. `SNORKEL_LOG` overrides the level,
/// e.g. `SNORKEL_LOG=snorkel_core=trace`.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default = if verbose {
        "snorkel=debug,snorkel_core=debug"
    } else {
        "snorkel=warn,snorkel_core=warn"
    };
    let filter = EnvFilter::try_from_env("SNORKEL_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}
