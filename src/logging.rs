//! Diagnostic logging to stderr. Stdout stays reserved for user output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LEVEL: &str = "warn";

/// `RUST_LOG` wins; otherwise `debug` with `--verbose`, else `warn`.
pub fn filter_directive(verbose: bool) -> String {
    match std::env::var("RUST_LOG") {
        Ok(directive) if !directive.trim().is_empty() => directive,
        _ if verbose => "debug".to_string(),
        _ => DEFAULT_LEVEL.to_string(),
    }
}

pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::new(filter_directive(verbose));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("branch-sweep: logging disabled: {}", e);
    }
}
