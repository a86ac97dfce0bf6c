//! Verbosity gated tracing for per-frame evaluation.
//! Messages at a level above the current verbosity are dropped; verbosity 0
//! silences all of them. Messages that pass go to `debug!`, so the log filter
//! must allow debug output as well.
use std::sync::atomic::{AtomicUsize, Ordering};

pub static LOG_LEVEL: AtomicUsize = AtomicUsize::new(0);

/// Trace at verbosity `$level`.
#[macro_export]
macro_rules! vlog {
    ($level: expr, $($arg:tt)*) => {
        if $level <= $crate::core::vlog::get_log_level() {
            debug!($($arg)*);
        }
    };
}

pub fn set_log_level(level: usize) {
    LOG_LEVEL.store(level, Ordering::Relaxed);
}

pub fn get_log_level() -> usize {
    LOG_LEVEL.load(Ordering::Relaxed)
}
