//! Logger setup
//!
//! `RUST_LOG` is honored; without it the filter defaults to `warn`. Verbose mode
//! raises the global directive to `debug` on the logger itself.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Logger builder for the given verbosity
pub fn logger_builder(verbose: bool) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    builder
}

/// Install the global logger
pub fn init_logging(verbose: bool) {
    if let Err(e) = logger_builder(verbose).try_init() {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
