/// Delay gate on the logical clock handed to [`TreeExecutor::update`](super::executor::TreeExecutor::update).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timer {
    start: u64,
    delay: u64,
}

impl Timer {
    pub fn armed(now: u64, delay: u64) -> Self {
        Self { start: now, delay }
    }

    pub fn has_passed(&self, now: u64) -> bool {
        match self.start.checked_add(self.delay) {
            Some(deadline) => now >= deadline,
            None => false, // Deadline beyond the clock range is never reached
        }
    }

    pub fn set(&mut self, now: u64, delay: u64) {
        self.start = now;
        self.delay = delay;
    }

    /// Arms a deadline that can never be reached.
    pub fn disable(&mut self) {
        self.start = u64::MAX;
        self.delay = u64::MAX;
    }

    /// Arms a deadline that has already passed.
    pub fn clear(&mut self) {
        self.start = 0;
        self.delay = 0;
    }
}
