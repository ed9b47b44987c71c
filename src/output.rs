//! Output Control Module
//!
//! Global output mode flags set once at startup from config and CLI:
//! - `compact_mode`: minimal output, no decorative chrome
//! - `verbose_mode`: extra detail (timings next to status lines)

use std::sync::atomic::{AtomicBool, Ordering};

static COMPACT_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

/// Initialize output modes from config
pub(crate) fn init(compact: bool, verbose: bool) {
    COMPACT_MODE.store(compact, Ordering::SeqCst);
    VERBOSE_MODE.store(verbose, Ordering::SeqCst);
}

/// Check if compact mode is enabled
#[inline]
pub(crate) fn is_compact() -> bool {
    COMPACT_MODE.load(Ordering::SeqCst)
}

/// Check if verbose mode is enabled
#[inline]
pub(crate) fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::SeqCst)
}
