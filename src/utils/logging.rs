//! Logger setup plus per-module switchable logging macros.
//!
//! Modules that log on hot paths (every frame, every tick) define
//! `const ENABLE_LOGS: bool` and go through these macros so the chatter can
//! be silenced at compile time without touching each call site:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_debug, log_warn};
//!
//! log_warn!("legs crossed");
//! ```

use std::sync::Once;

static INIT: Once = Once::new();

/// Install `env_logger`, honouring `RUST_LOG`. Safe to call more than once;
/// only the first call has an effect.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .try_init();
    });
}

/// `FITFIRST_DEBUG=1` (or `true`) turns on per-tick heartbeat logging.
pub fn debug_mode() -> bool {
    std::env::var("FITFIRST_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
