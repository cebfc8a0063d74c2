//! Reset-on-call debouncing
//!
//! Every notification replaces the pending one and pushes the deadline back.
//! Nothing queues: a burst of notifications produces exactly one result once
//! the burst has been quiet for the configured period.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet window at `now`
    pub fn notify(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.quiet, value));
    }

    /// When the pending value becomes due, if there is one
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its quiet window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((deadline, value)) if now >= deadline => Some(value),
            still_waiting => {
                self.pending = still_waiting;
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(250);

    #[test]
    fn test_fires_once_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.notify(1, start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(249)), None);
        assert_eq!(debouncer.poll(start + QUIET), Some(1));
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_notify_resets_instead_of_stacking() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        debouncer.notify("first", start);
        debouncer.notify("second", start + Duration::from_millis(200));

        // The first deadline has passed but the window was reset by the second call
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(450))
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(450)), Some("second"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.notify((), start);
        debouncer.cancel();

        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(start + QUIET), None);
    }
}
