/// Minutes since local midnight.
pub type Minutes = u32;

/// Minutes in one simulated day.
pub const MINUTES_PER_DAY: Minutes = 1440;

/// Hour of day (`0..24`) containing minute `t`.
///
/// `t` may point past midnight when projecting into the next day; it is
/// wrapped modulo one day first. This is the single normalization shared by
/// the demand forecaster and the price oracle.
pub fn hour_of_day(t: Minutes) -> usize {
    ((t % MINUTES_PER_DAY) / 60) as usize
}

/// A simulation clock that walks one day in fixed steps.
///
/// The first tick is one step after midnight and the last tick is the final
/// step before the next midnight, so a 10 minute step yields
/// `10, 20, ..., 1430`.
///
/// # Examples
///
/// ```
/// use intake_sim::sim::clock::DayClock;
///
/// let mut clock = DayClock::new(480);
/// let mut ticks = Vec::new();
///
/// clock.run(|t| ticks.push(t));
/// assert_eq!(ticks, vec![480, 960]);
/// ```
#[derive(Debug, Clone)]
pub struct DayClock {
    /// Step size in minutes.
    step: Minutes,
    /// Next time to be handed out.
    next: Minutes,
}

impl DayClock {
    /// Creates a clock stepping by `step` minutes.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn new(step: Minutes) -> Self {
        assert!(step > 0, "step must be > 0");
        Self { step, next: step }
    }

    /// Number of ticks the clock produces over a full day.
    pub fn total_steps(&self) -> usize {
        ((MINUTES_PER_DAY - 1) / self.step) as usize
    }

    /// Zero-based step index of time `t`.
    ///
    /// Returns `None` for times before the first tick.
    pub fn step_index(&self, t: Minutes) -> Option<usize> {
        if t < self.step {
            None
        } else {
            Some((t / self.step - 1) as usize)
        }
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// * `Some(t)` - The time of the current step
    /// * `None` - If the day is over
    pub fn tick(&mut self) -> Option<Minutes> {
        if self.next < MINUTES_PER_DAY {
            let t = self.next;
            self.next += self.step;
            Some(t)
        } else {
            None
        }
    }

    /// Runs a function for each remaining step of the day.
    pub fn run(&mut self, mut f: impl FnMut(Minutes)) {
        while let Some(t) = self.tick() {
            f(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_of_day_wraps_past_midnight() {
        assert_eq!(hour_of_day(0), 0);
        assert_eq!(hour_of_day(59), 0);
        assert_eq!(hour_of_day(60), 1);
        assert_eq!(hour_of_day(1439), 23);
        assert_eq!(hour_of_day(1440), 0);
        assert_eq!(hour_of_day(1500), 1);
    }

    #[test]
    fn test_tick() {
        let mut clock = DayClock::new(720);
        assert_eq!(clock.tick(), Some(720));
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn ten_minute_day_has_143_steps() {
        let mut clock = DayClock::new(10);
        assert_eq!(clock.total_steps(), 143);

        let mut ticks = Vec::new();
        clock.run(|t| ticks.push(t));

        assert_eq!(ticks.len(), 143);
        assert_eq!(ticks.first(), Some(&10));
        assert_eq!(ticks.last(), Some(&1430));
    }

    #[test]
    fn step_index_is_zero_based_from_first_tick() {
        let clock = DayClock::new(10);
        assert_eq!(clock.step_index(0), None);
        assert_eq!(clock.step_index(9), None);
        assert_eq!(clock.step_index(10), Some(0));
        assert_eq!(clock.step_index(60), Some(5));
    }

    #[test]
    #[should_panic]
    fn zero_step_panics() {
        DayClock::new(0);
    }
}
