use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RoundClock {
    started_at: i64,
    interval: u64,
}

impl RoundClock {
    pub fn new(started_at: i64, interval: u64) -> Self {
        Self {
            started_at,
            interval,
        }
    }

    /// Seconds from `started_at` to `now`. A clock that reads earlier than
    /// the round start counts as no time elapsed.
    pub fn elapsed_since(started_at: i64, now: i64) -> u64 {
        u64::try_from(now.saturating_sub(started_at)).unwrap_or(0)
    }

    /// The round is due when its interval has elapsed, it has entrants and
    /// funds, and it is still open. Every caller deciding whether a round may
    /// advance goes through here.
    pub fn is_due(&self, now: i64, has_entrants: bool, has_funds: bool, is_open: bool) -> bool {
        let time_passed = Self::elapsed_since(self.started_at, now) >= self.interval;
        time_passed && has_entrants && has_funds && is_open
    }

    pub(crate) fn restart(&mut self, now: i64) {
        self.started_at = now;
    }

    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_saturates_at_zero() {
        assert_eq!(RoundClock::elapsed_since(100, 130), 30);
        assert_eq!(RoundClock::elapsed_since(100, 100), 0);
        assert_eq!(RoundClock::elapsed_since(100, 90), 0);
        assert_eq!(RoundClock::elapsed_since(i64::MIN, i64::MAX), i64::MAX as u64);
    }

    #[test]
    fn due_only_when_all_conditions_hold() {
        let clock = RoundClock::new(1_000, 30);

        assert!(clock.is_due(1_030, true, true, true));
        assert!(clock.is_due(5_000, true, true, true));

        assert!(!clock.is_due(1_029, true, true, true));
        assert!(!clock.is_due(1_030, false, true, true));
        assert!(!clock.is_due(1_030, true, false, true));
        assert!(!clock.is_due(1_030, true, true, false));
    }

    #[test]
    fn restart_moves_the_window() {
        let mut clock = RoundClock::new(0, 30);
        assert!(clock.is_due(30, true, true, true));

        clock.restart(30);
        assert_eq!(clock.started_at(), 30);
        assert!(!clock.is_due(59, true, true, true));
        assert!(clock.is_due(60, true, true, true));
    }
}
