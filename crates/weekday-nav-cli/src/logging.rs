//! Tracing setup for `wdnav`.

use tracing_subscriber::EnvFilter;

/// Targets that log: this binary and the navigator library.
const TARGETS: [&str; 2] = [env!("CARGO_CRATE_NAME"), "weekday_nav"];

/// `-v` count to level: none is warn, then info, debug and trace.
fn level_name(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directives enabling the `-v` level for [`TARGETS`] only, so
/// dependencies stay quiet.
fn directives(verbosity: u8) -> String {
    let level = level_name(verbosity);
    TARGETS.map(|target| format!("{target}={level}")).join(",")
}

/// Install a stderr subscriber so stdout carries only the result.
/// `RUST_LOG`, when set, replaces the `-v` filter.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .init();
}
