//! Diagnostics for developers, kept apart from what `trn` prints for users.
//!
//! Prompts, summaries and the run log go through `io::console` and
//! `io::run_log` on stdout or to disk regardless of `RUST_LOG`. Tracing events
//! go to stderr and are silent below `warn` unless `RUST_LOG` asks for more,
//! e.g. `RUST_LOG=treerun=debug trn -i tree.yaml`.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber: compact lines on stderr, no targets.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}
