use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// External stop condition, checked by every heuristic between iterations.
/// Raised once the shared flag is set or the deadline has passed.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    flag: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl Interrupt {
    pub fn never() -> Interrupt {
        Interrupt::default()
    }

    pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Interrupt {
        self.flag = Some(flag);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Interrupt {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Interrupt {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn is_raised(&self) -> bool {
        self.flag.as_ref().map_or(false, |flag| flag.load(Ordering::Relaxed))
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}
