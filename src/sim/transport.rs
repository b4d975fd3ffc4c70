//! Intake-to-storage transport delay.

use super::clock::{DayClock, Minutes};

/// Append-only record of intake decisions, one per simulation step.
///
/// Water pumped at the intake reaches storage a fixed delay later, so the
/// supply arriving now is an intake decided in the past. Lookups that point
/// before the first recorded step fall back to the earliest intake, or to
/// the caller's current demand while the history is still empty.
#[derive(Debug, Clone)]
pub struct IntakeHistory {
    clock: DayClock,
    step: Minutes,
    delay: Minutes,
    intakes: Vec<f64>,
}

impl IntakeHistory {
    /// Creates an empty history for a run stepping by `step` minutes with a
    /// transport delay of `delay` minutes.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn new(step: Minutes, delay: Minutes) -> Self {
        let clock = DayClock::new(step);
        let capacity = clock.total_steps();
        Self {
            clock,
            step,
            delay,
            intakes: Vec::with_capacity(capacity),
        }
    }

    /// Appends the intake decided for the next step.
    pub fn record(&mut self, intake: f64) {
        self.intakes.push(intake);
    }

    /// Supply reaching storage at minute `t`: the intake decided exactly one
    /// transport delay earlier.
    ///
    /// # Arguments
    ///
    /// * `t` - Arrival time
    /// * `bootstrap` - Value used while no intake has been recorded yet
    pub fn supply_arriving_at(&self, t: Minutes, bootstrap: f64) -> f64 {
        let index = t
            .checked_sub(self.delay)
            .and_then(|decided_at| self.clock.step_index(decided_at));
        match index {
            Some(i) if i < self.intakes.len() => self.intakes[i],
            // Decided before the run started.
            None => self.intakes.first().copied().unwrap_or(bootstrap),
            // Not decided yet; only reachable when asking about the future.
            Some(_) => self.intakes.last().copied().unwrap_or(bootstrap),
        }
    }

    /// Volume already committed to the pipe that arrives after the current
    /// step and before an intake decided at `t` reaches storage.
    pub fn in_transit_volume(&self, t: Minutes, bootstrap: f64) -> f64 {
        let pending_steps = self.delay / self.step;
        let hours_per_step = f64::from(self.step) / 60.0;
        (1..pending_steps)
            .map(|k| self.supply_arriving_at(t + k * self.step, bootstrap) * hours_per_step)
            .sum()
    }

    /// Recorded intakes, first step first.
    pub fn intakes(&self) -> &[f64] {
        &self.intakes
    }

    pub fn len(&self) -> usize {
        self.intakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intakes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::IntakeHistory;

    #[test]
    fn empty_history_supplies_bootstrap_demand() {
        let history = IntakeHistory::new(10, 60);
        assert_eq!(history.supply_arriving_at(10, 0.262), 0.262);
    }

    #[test]
    fn lookup_before_start_uses_earliest_intake() {
        let mut history = IntakeHistory::new(10, 60);
        history.record(0.5);
        history.record(0.7);
        assert_eq!(history.supply_arriving_at(30, 0.262), 0.5);
        assert_eq!(history.supply_arriving_at(60, 0.262), 0.5);
    }

    #[test]
    fn lookup_returns_intake_decided_one_delay_earlier() {
        let mut history = IntakeHistory::new(10, 60);
        for i in 0..10 {
            // intake decided at t = 10 * (i + 1)
            history.record(f64::from(i));
        }
        // decided at 10 → index 0
        assert_eq!(history.supply_arriving_at(70, 9.9), 0.0);
        // decided at 40 → index 3
        assert_eq!(history.supply_arriving_at(100, 9.9), 3.0);
    }

    #[test]
    fn in_transit_sums_pending_arrivals() {
        let mut history = IntakeHistory::new(10, 30);
        history.record(1.2);
        history.record(0.6);
        history.record(1.8);
        // At t=30 the pipe still holds the intakes decided at 10 and 20,
        // arriving at 40 and 50.
        assert_abs_diff_eq!(
            history.in_transit_volume(30, 0.0),
            (1.2 + 0.6) * 10.0 / 60.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn delay_of_one_step_has_nothing_in_transit() {
        let mut history = IntakeHistory::new(10, 10);
        history.record(2.0);
        assert_eq!(history.in_transit_volume(20, 1.0), 0.0);
    }
}
