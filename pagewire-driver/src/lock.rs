//! Display lock
//!
//! A one-slot busy flag. It is held while the application draws and while a
//! refresh or a single-shot command is on the bus; the interrupt-side
//! completion releases it. It lives outside the critical section so the
//! foreground can spin on it while bus interrupts keep running.

use portable_atomic::{AtomicBool, Ordering};

use crate::retry::{retry_until, RetryPolicy};

/// Cooperative busy flag
#[derive(Debug, Default)]
pub struct DisplayLock {
    held: AtomicBool,
}

impl DisplayLock {
    /// Create a released lock
    pub const fn new() -> Self {
        Self {
            held: AtomicBool::new(false),
        }
    }

    /// Take the lock if it is free
    pub fn try_acquire(&self) -> bool {
        self.held
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Take the lock, retrying through `policy` while it is held
    ///
    /// Returns `false` if the policy gave up. Never call this from
    /// interrupt context.
    pub fn acquire<P: RetryPolicy + ?Sized>(&self, policy: &P) -> bool {
        retry_until(policy, || self.try_acquire().then_some(())).is_some()
    }

    /// Release the lock unconditionally
    pub fn release(&self) {
        self.held.store(false, Ordering::Release);
    }

    /// Whether the lock is currently held
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::Bounded;

    #[test]
    fn test_acquire_release() {
        let lock = DisplayLock::new();
        assert!(!lock.is_held());
        assert!(lock.try_acquire());
        assert!(lock.is_held());
        assert!(!lock.try_acquire());

        lock.release();
        assert!(!lock.is_held());
        assert!(lock.acquire(&Bounded::new(0)));
    }

    #[test]
    fn test_acquire_gives_up() {
        let lock = DisplayLock::new();
        assert!(lock.try_acquire());
        assert!(!lock.acquire(&Bounded::new(10)));
        assert!(lock.is_held());
    }

    #[test]
    fn test_release_from_policy() {
        // Simulates the interrupt releasing the lock while we wait
        let lock = DisplayLock::new();
        assert!(lock.try_acquire());
        let policy = |attempt: u32| {
            if attempt == 2 {
                lock.release();
            }
            true
        };
        assert!(lock.acquire(&policy));
        assert!(lock.is_held());
    }
}
