//! Synchronization primitives for search cancellation.
//!
//! One [`StopFlag`] is shared by the launcher of a search, the thread running
//! iterative deepening and every worker exploring a root move.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A thread-safe stop flag for cooperative search termination.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a stop flag that is already set.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Set the flag from a timer thread once `delay` has elapsed.
    pub fn stop_after(&self, delay: Duration) -> JoinHandle<()> {
        let flag = self.clone();
        thread::spawn(move || {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            flag.stop();
        })
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_clone_shares_state() {
        let flag1 = StopFlag::new();
        let flag2 = flag1.clone();
        assert!(!flag2.is_stopped());

        flag1.stop();
        assert!(flag2.is_stopped());
    }

    #[test]
    fn test_stop_flag_stopped() {
        assert!(StopFlag::stopped().is_stopped());
    }

    #[test]
    fn test_stop_after_fires() {
        let flag = StopFlag::new();
        let timer = flag.stop_after(Duration::from_millis(20));
        timer.join().unwrap();
        assert!(flag.is_stopped());
    }
}
