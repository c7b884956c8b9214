/// A cancellable one-shot timer expressed as an absolute deadline.
///
/// The classifier never sleeps; the host advances time through `tick` and every
/// inbound event, and the owner polls `take_expired` to fire the timer exactly once.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Deadline {
    at_ms: Option<u64>,
}

impl Deadline {
    pub const fn new() -> Self {
        Self { at_ms: None }
    }

    /// Arms the timer `delay_ms` after `now_ms`, replacing any earlier arming.
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.at_ms = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.at_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at_ms.is_some()
    }

    pub fn at_ms(&self) -> Option<u64> {
        self.at_ms
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.at_ms.is_some_and(|at| now_ms >= at)
    }

    /// Disarms and returns the deadline if it has passed.
    pub fn take_expired(&mut self, now_ms: u64) -> Option<u64> {
        if self.is_expired(now_ms) {
            self.at_ms.take()
        } else {
            None
        }
    }
}
