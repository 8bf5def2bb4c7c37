//! Diagnostic tracing for the command-line adapter.
//!
//! Events go to stderr so stdout carries only simulation responses and CSV
//! exports. Verbosity follows `RUST_LOG` and defaults to `warn`:
//!
//! ```bash
//! RUST_LOG=cleaning_robot_system_execution=debug cleaning-robot clean --map map.txt --request run.json
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. Call once, before any other work.
pub(crate) fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
