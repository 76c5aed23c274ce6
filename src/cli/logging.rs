//! Diagnostic logging for the CLI.
//!
//! Logs go to stderr so stdout stays reserved for the build report.
//! `RUST_LOG` wins when set; otherwise `-v` raises the crate's level to
//! `debug` and everything else stays at `warn`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    format!("warn,i18n_inline={}", level)
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}
