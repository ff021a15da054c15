//! Tracing configuration.
//!
//! Logging is off unless requested:
//!
//! ```bash
//! VUE2REACT_LOG=debug vue2react src out
//! VUE2REACT_LOG="vue_transformer=trace" vue2react Counter.vue out/Counter
//! vue2react --verbose Counter.vue out/Counter
//! ```
//!
//! `VUE2REACT_LOG` takes precedence over `RUST_LOG`. All output goes to
//! stderr so it never mixes with JSON on stdout.

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "VUE2REACT_LOG";

/// Build an `EnvFilter` from `VUE2REACT_LOG`, falling back to `RUST_LOG`,
/// then to `debug` when `verbose` is set.
fn build_filter(verbose: bool) -> Option<EnvFilter> {
    if let Ok(val) = std::env::var(LOG_ENV) {
        Some(EnvFilter::builder().parse_lossy(val))
    } else if std::env::var("RUST_LOG").is_ok() {
        Some(EnvFilter::from_default_env())
    } else if verbose {
        Some(EnvFilter::new("debug"))
    } else {
        None
    }
}

/// Initialise the global tracing subscriber.
pub fn init_tracing(verbose: bool) {
    let Some(filter) = build_filter(verbose) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
