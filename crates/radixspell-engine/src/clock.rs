// Deadline clock

use std::sync::OnceLock;
use std::time::Instant;

/// Monotonic time source in floating-point milliseconds.
///
/// Deadlines passed to the suggestion search are values on this scale.
pub trait Clock {
    fn now_ms(&self) -> f64;

    /// Deadline `budget_ms` from now.
    fn deadline_in(&self, budget_ms: f64) -> f64 {
        self.now_ms() + budget_ms
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}

/// Milliseconds since the first use of any `MonotonicClock` in the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

fn epoch() -> Instant {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    *EPOCH.get_or_init(Instant::now)
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        epoch().elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_never_goes_back() {
        let clock = MonotonicClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a >= 0.0);
        assert!(b >= a);
        assert!(clock.deadline_in(50.0) >= b + 50.0);
    }
}
