// crates/chartform-core/src/debounce.rs

/// Default quiet period before a typed query is searched.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Coalesces rapid keystrokes into a single search.
///
/// Time is supplied by the caller (`performance.now()` in the browser, a
/// monotonic clock in native code, plain numbers in tests), so the debouncer
/// never sleeps or spawns timers. Each [`push`](Debouncer::push) restarts the
/// quiet period; [`poll`](Debouncer::poll) hands out the latest query once it
/// has elapsed.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u64,
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    due_at: u64,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Record a keystroke. Replaces any earlier pending query.
    pub fn push(&mut self, query: impl Into<String>, now_ms: u64) {
        self.pending = Some(Pending {
            query: query.into(),
            due_at: now_ms.saturating_add(self.delay_ms),
        });
    }

    /// Returns the pending query if its quiet period is over, consuming it.
    pub fn poll(&mut self, now_ms: u64) -> Option<String> {
        match &self.pending {
            Some(p) if now_ms >= p.due_at => self.pending.take().map(|p| p.query),
            _ => None,
        }
    }

    /// Deadline of the pending query, if any. Lets the host schedule exactly
    /// one timer instead of polling.
    pub fn due_at(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_at)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_keystrokes_coalesce_into_latest_query() {
        let mut d = Debouncer::new(200);
        d.push("Lo", 0);
        d.push("Lon", 50);
        d.push("Lond", 120);

        assert_eq!(d.poll(200), None, "quiet period restarted at 120");
        assert_eq!(d.due_at(), Some(320));
        assert_eq!(d.poll(320).as_deref(), Some("Lond"));
        assert_eq!(d.poll(1_000), None, "fires once");
    }

    #[test]
    fn cancel_drops_pending_query() {
        let mut d = Debouncer::default();
        d.push("Par", 10);
        assert!(d.is_pending());
        d.cancel();
        assert_eq!(d.poll(10_000), None);
    }
}
