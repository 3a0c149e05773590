/// Latest-value slot flushed at most once per display tick.
///
/// Pointer handlers call [`schedule`](Self::schedule) as often as events
/// arrive; only the newest value survives until the next tick calls
/// [`take`](Self::take). This keeps a fast pointer from flooding the
/// registry with per-pixel updates.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    scheduled: u64,
    superseded: u64,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            scheduled: 0,
            superseded: 0,
        }
    }

    /// Store `value` for the next tick.
    ///
    /// Returns `true` when this call armed a new flush, `false` when it only
    /// replaced a value that was already waiting.
    pub fn schedule(&mut self, value: T) -> bool {
        self.scheduled = self.scheduled.saturating_add(1);
        if self.pending.replace(value).is_some() {
            self.superseded = self.superseded.saturating_add(1);
            false
        } else {
            true
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hand out the pending value, if any, for commit on this tick.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending value without committing it. Returns whether a value
    /// was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Values handed to [`schedule`](Self::schedule) since the last reset.
    pub fn scheduled(&self) -> u64 {
        self.scheduled
    }

    /// Values overwritten before their tick arrived.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    pub fn reset_counters(&mut self) {
        self.scheduled = 0;
        self.superseded = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_value_survives_a_tick() {
        let mut slot = FrameCoalescer::new();
        assert!(slot.schedule(1));
        assert!(!slot.schedule(2));
        assert!(!slot.schedule(3));
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.take(), None);
        assert_eq!(slot.scheduled(), 3);
        assert_eq!(slot.superseded(), 2);
    }

    #[test]
    fn schedule_after_flush_arms_again() {
        let mut slot = FrameCoalescer::new();
        assert!(slot.schedule('a'));
        let _ = slot.take();
        assert!(slot.schedule('b'));
    }

    #[test]
    fn cancel_drops_pending() {
        let mut slot = FrameCoalescer::new();
        assert!(!slot.cancel());
        slot.schedule(5u8);
        assert!(slot.cancel());
        assert!(!slot.is_pending());
        assert_eq!(slot.take(), None);
    }
}
