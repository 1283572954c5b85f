//! Tracing setup for the plugin binary.
//!
//! stdout carries the protoc protocol, so logs always go to stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Log level or filter directive, e.g. `debug` or `xstate_gen_core=trace`.
const LOG_ENV: &str = "XSTATE_LOG";

/// Switch honored by protoc plugins for verbose output.
const DEBUG_ENV: &str = "DEBUG";

const LOGGED_CRATES: [&str; 2] = ["protoc_gen_xstate", "xstate_gen_core"];

/// Install the global subscriber.
pub fn init_tracing() {
    let log = std::env::var(LOG_ENV).ok();
    let debug = std::env::var(DEBUG_ENV).ok();
    let filter = filter_directives(log.as_deref(), debug.as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

/// Build the filter from the `XSTATE_LOG` and `DEBUG` values.
///
/// A plain level applies to this plugin's crates only; anything else is used
/// as a full filter spec. Without `XSTATE_LOG` the level is `warn`, or
/// `debug` when `DEBUG` is truthy.
fn filter_directives(log: Option<&str>, debug: Option<&str>) -> String {
    match log {
        Some(level) if is_plain_level(level) => crate_directives(&level.to_ascii_lowercase()),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ if debug.is_some_and(is_truthy) => crate_directives("debug"),
        _ => crate_directives("warn"),
    }
}

fn crate_directives(level: &str) -> String {
    LOGGED_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

fn is_truthy(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "t" | "true")
}
