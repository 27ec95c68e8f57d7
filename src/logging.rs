//! Diagnostic logging on standard error.
//!
//! Quiet by default (`warn`); `--verbose` lowers the level to `debug`.
//! Standard output is reserved for results so pipelines stay clean.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_level(true)
        .with_filter(filter);

    // Keep an already installed subscriber.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
