//! Per-turn time budget with a self-adjusting safety margin.
//!
//! The search stops at `start + allowed - margin`. After each turn the
//! margin decays towards zero unless the turn overran, in which case it
//! grows to cover the overrun scaled by how few playouts there were. A new
//! day doubles it, since the first turn of a day builds fresh nodes.

use std::time::{Duration, Instant};

/// Margin before the first turn.
pub const INITIAL_MARGIN: Duration = Duration::from_millis(1);

/// Factor applied to the margin after every turn.
pub const MARGIN_DECAY: f64 = 0.7;

/// Turn time limits and the current safety margin.
#[derive(Clone, Debug)]
pub struct TimeBudget {
    first_turn: Duration,
    later_turns: Duration,
    margin: Duration,
    first: bool,
    last_day: u32,
}

impl TimeBudget {
    /// Budget allowing `first_turn` on the first turn and `later_turns`
    /// afterwards.
    pub fn new(first_turn: Duration, later_turns: Duration) -> Self {
        Self {
            first_turn,
            later_turns,
            margin: INITIAL_MARGIN,
            first: true,
            last_day: 0,
        }
    }

    /// True until the first `record`.
    pub fn is_first_turn(&self) -> bool {
        self.first
    }

    /// Time allowed for the coming turn.
    pub fn allowed(&self) -> Duration {
        if self.first {
            self.first_turn
        } else {
            self.later_turns
        }
    }

    /// Current safety margin
    pub fn margin(&self) -> Duration {
        self.margin
    }

    /// When the search must stop for a turn starting at `start`.
    pub fn deadline(&self, start: Instant) -> Instant {
        start + self.allowed().saturating_sub(self.margin)
    }

    /// Update the margin after a turn on `day` that took `elapsed` and ran
    /// `playouts` playouts.
    pub fn record(&mut self, elapsed: Duration, playouts: u32, day: u32) {
        let overrun = elapsed.as_secs_f64() - self.allowed().as_secs_f64();
        let n = playouts.max(1) as f64;
        let scaled = overrun * (n + 2.0) / n;
        let decayed = self.margin.as_secs_f64() * MARGIN_DECAY;
        self.margin = Duration::from_secs_f64(decayed.max(scaled).max(0.0));

        self.first = false;
        if day > self.last_day {
            self.last_day = day;
            self.margin *= 2;
        }
    }
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn close(a: Duration, b: Duration) -> bool {
        (a.as_secs_f64() - b.as_secs_f64()).abs() < 1e-6
    }

    #[test]
    fn test_first_turn_allowance() {
        let mut budget = TimeBudget::default();
        assert!(budget.is_first_turn());
        assert_eq!(budget.allowed(), ms(1000));

        budget.record(ms(900), 100, 0);
        assert!(!budget.is_first_turn());
        assert_eq!(budget.allowed(), ms(100));
    }

    #[test]
    fn test_margin_decays_when_on_time() {
        let mut budget = TimeBudget::default();
        budget.record(ms(500), 100, 0);
        assert!(close(budget.margin(), Duration::from_secs_f64(0.0007)));
    }

    #[test]
    fn test_overrun_scales_with_playouts() {
        let mut budget = TimeBudget::default();
        budget.record(ms(500), 10, 0);
        // 10 ms over with 2 playouts: 10 * (2 + 2) / 2 = 20 ms.
        budget.record(ms(110), 2, 0);
        assert!(close(budget.margin(), ms(20)));
    }

    #[test]
    fn test_zero_playouts_counts_as_one() {
        let mut budget = TimeBudget::default();
        budget.record(ms(1004), 0, 0);
        assert!(close(budget.margin(), ms(12)));
    }

    #[test]
    fn test_new_day_doubles_margin() {
        let mut budget = TimeBudget::default();
        budget.record(ms(1010), 1, 0);
        assert!(close(budget.margin(), ms(30)));
        budget.record(ms(50), 100, 1);
        // 30 * 0.7 = 21, doubled for the new day.
        assert!(close(budget.margin(), ms(42)));
        // Same day again: no doubling.
        budget.record(ms(50), 100, 1);
        assert!(close(budget.margin(), Duration::from_secs_f64(0.0294)));
    }

    #[test]
    fn test_deadline_subtracts_margin() {
        let budget = TimeBudget::new(ms(100), ms(50));
        let start = Instant::now();
        assert_eq!(budget.deadline(start), start + ms(99));
    }
}
