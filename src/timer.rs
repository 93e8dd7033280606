use std::time::{Duration, Instant};

/// A cancelable delayed action, polled from the event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending deadline.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Returns true once, the first time it is polled at or after the due time.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let start = Instant::now();
        let mut deadline = Deadline::new();
        deadline.schedule(start, Duration::from_secs(3));

        assert!(!deadline.fire(start + Duration::from_secs(2)));
        assert!(deadline.is_pending());
        assert!(deadline.fire(start + Duration::from_secs(3)));
        assert!(!deadline.is_pending());
        assert!(!deadline.fire(start + Duration::from_secs(4)));
    }

    #[test]
    fn rescheduling_pushes_the_deadline_out() {
        let start = Instant::now();
        let mut deadline = Deadline::new();
        deadline.schedule(start, Duration::from_secs(3));
        deadline.schedule(start + Duration::from_secs(2), Duration::from_secs(3));

        assert!(!deadline.fire(start + Duration::from_secs(4)));
        assert!(deadline.fire(start + Duration::from_secs(5)));
    }

    #[test]
    fn canceled_deadline_never_fires() {
        let start = Instant::now();
        let mut deadline = Deadline::new();
        deadline.schedule(start, Duration::from_secs(1));
        deadline.cancel();

        assert!(!deadline.is_pending());
        assert!(!deadline.fire(start + Duration::from_secs(10)));
    }
}
