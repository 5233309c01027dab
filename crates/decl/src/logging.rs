//! Log filter resolution: `DECL_LOG`, then `RUST_LOG`, then a per-command default.

use std::env;

use tracing_subscriber::EnvFilter;

pub(crate) fn init(default: &str) {
    // A subscriber installed by an embedding host wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .with_writer(std::io::stderr)
        .try_init();
}

fn filter(default: &str) -> EnvFilter {
    let directives = env::var("DECL_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| default.to_owned());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(default))
}
