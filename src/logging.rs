//! Diagnostic logging setup.
//!
//! All diagnostics go to stderr through `tracing`. The default filter only
//! shows warnings; the debug flag raises kite's own spans to `debug`.
//! `RUST_LOG`, when set, wins over both.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. Call once, before any other work.
pub fn init(debug: bool) {
    let default_filter = if debug { "kite=debug,warn" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
