//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (for example
/// `"info"` or `"aurora_engine=debug"`) is used. Calling this twice is
/// harmless; the second call is ignored.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}
