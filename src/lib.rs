//! Dressing Room
//!
//! Persistence, configuration and the headless session driver around
//! `dressing-core`. Shared by the CLI and the desktop shell.

pub mod cli;
pub mod config;
pub mod error;
pub mod replay;
pub mod store;

pub use config::Config;
pub use error::{DressingError, Result};
pub use store::JsonStore;

/// Install the tracing subscriber; `RUST_LOG` wins over `verbose`
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
