//! Retry policies
//!
//! The driver never queues work. Wherever it must get something through
//! (a transaction onto the bus, the display lock) it asks a [`RetryPolicy`]
//! whether to try again. Swap in your own to sleep, yield to an executor or
//! feed a watchdog instead of spinning.

/// Decides whether to retry after a rejected attempt
pub trait RetryPolicy {
    /// Called after failed attempt number `attempt` (starting at 0)
    ///
    /// Return `true` to try again, `false` to give up.
    fn retry(&self, attempt: u32) -> bool;
}

/// Spin forever
#[derive(Debug, Clone, Copy, Default)]
pub struct Spin;

impl RetryPolicy for Spin {
    fn retry(&self, _attempt: u32) -> bool {
        core::hint::spin_loop();
        true
    }
}

/// Spin for at most `limit` retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounded {
    /// Retries before giving up
    pub limit: u32,
}

impl Bounded {
    /// Give up after `limit` retries
    pub const fn new(limit: u32) -> Self {
        Self { limit }
    }
}

impl RetryPolicy for Bounded {
    fn retry(&self, attempt: u32) -> bool {
        if attempt >= self.limit {
            return false;
        }
        core::hint::spin_loop();
        true
    }
}

impl<F: Fn(u32) -> bool> RetryPolicy for F {
    fn retry(&self, attempt: u32) -> bool {
        self(attempt)
    }
}

/// Run `attempt` until it succeeds or `policy` gives up
pub(crate) fn retry_until<P, T>(policy: &P, mut attempt: impl FnMut() -> Option<T>) -> Option<T>
where
    P: RetryPolicy + ?Sized,
{
    let mut n = 0;
    loop {
        if let Some(value) = attempt() {
            return Some(value);
        }
        if !policy.retry(n) {
            return None;
        }
        n = n.saturating_add(1);
    }
}
