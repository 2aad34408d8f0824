use std::time::{Duration, Instant};

/// Whether a tick is due, and when to wake up next.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PacerPoll {
    pub due: bool,
    pub next_deadline: Instant,
}

/// Fixed-rate tick source.
///
/// Deadlines advance by whole intervals. If the loop falls behind by more than
/// one interval the missed ticks are dropped and the schedule restarts from
/// `now`, so a stall never produces a burst of catch-up frames.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next: Option<Instant>,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self { interval, next: None }
    }

    /// `hz` of zero is treated as 1.
    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Checks the schedule at `now`. The first poll is always due.
    pub fn poll(&mut self, now: Instant) -> PacerPoll {
        let Some(deadline) = self.next else {
            let next_deadline = now + self.interval;
            self.next = Some(next_deadline);
            return PacerPoll { due: true, next_deadline };
        };

        if now < deadline {
            return PacerPoll {
                due: false,
                next_deadline: deadline,
            };
        }

        let mut next_deadline = deadline + self.interval;
        if next_deadline <= now {
            next_deadline = now + self.interval;
        }
        self.next = Some(next_deadline);
        PacerPoll { due: true, next_deadline }
    }

    /// Deadline of the next tick, if the pacer has started.
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Restarts the schedule; the next poll is due immediately.
    pub fn reset(&mut self) {
        self.next = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    // ── schedule ──────────────────────────────────────────────────────────

    #[test]
    fn sixty_hz_interval() {
        let p = FramePacer::from_hz(60);
        assert_eq!(p.interval(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn first_poll_is_due() {
        let t0 = Instant::now();
        let mut p = FramePacer::new(10 * MS);
        let poll = p.poll(t0);
        assert!(poll.due);
        assert_eq!(poll.next_deadline, t0 + 10 * MS);
    }

    #[test]
    fn not_due_before_deadline() {
        let t0 = Instant::now();
        let mut p = FramePacer::new(10 * MS);
        p.poll(t0);
        let poll = p.poll(t0 + 5 * MS);
        assert!(!poll.due);
        assert_eq!(poll.next_deadline, t0 + 10 * MS);
    }

    #[test]
    fn on_time_ticks_keep_phase() {
        let t0 = Instant::now();
        let mut p = FramePacer::new(10 * MS);
        p.poll(t0);
        // Slightly late: the next deadline stays on the original grid.
        let poll = p.poll(t0 + 11 * MS);
        assert!(poll.due);
        assert_eq!(poll.next_deadline, t0 + 20 * MS);
    }

    // ── stalls ────────────────────────────────────────────────────────────

    #[test]
    fn stall_does_not_burst() {
        let t0 = Instant::now();
        let mut p = FramePacer::new(10 * MS);
        p.poll(t0);

        let late = t0 + 95 * MS;
        let poll = p.poll(late);
        assert!(poll.due);
        assert_eq!(poll.next_deadline, late + 10 * MS);

        // Missed ticks are not replayed.
        assert!(!p.poll(late + MS).due);
    }

    #[test]
    fn reset_makes_next_poll_due() {
        let t0 = Instant::now();
        let mut p = FramePacer::new(10 * MS);
        p.poll(t0);
        p.reset();
        assert_eq!(p.next_deadline(), None);
        assert!(p.poll(t0 + MS).due);
    }

    #[test]
    fn zero_hz_clamped() {
        assert_eq!(FramePacer::from_hz(0).interval(), Duration::from_secs(1));
    }
}
