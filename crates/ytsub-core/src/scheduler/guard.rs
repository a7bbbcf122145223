//! RAII guard for the single in-flight pass flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Marks a pass as running; clears the flag when dropped, so the flag is
/// released on every exit path including pass failure.
pub struct PassGuard {
    flag: Arc<AtomicBool>,
}

impl PassGuard {
    /// Takes the flag, or returns None if a pass is already running. A failed
    /// acquisition leaves the flag untouched.
    pub fn try_acquire(flag: &Arc<AtomicBool>) -> Option<PassGuard> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| PassGuard {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for PassGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
