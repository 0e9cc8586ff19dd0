use std::time::{Duration, Instant};

/// Holds back typed queries until the surface has been quiet for `delay`.
/// Only the latest query survives.
#[derive(Debug)]
pub struct QueryDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Records a query. With a zero delay the query is returned immediately.
    pub fn push(&mut self, text: String, now: Instant) -> Option<String> {
        if self.delay.is_zero() {
            return Some(text);
        }

        self.pending = Some((text, now + self.delay));
        None
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }
}
