//! Storage-bound intake speed limits.

/// Computes the admissible intake speed range for a forecast demand and a
/// projected inventory.
///
/// Both bounds always lie in `[0, ceiling]`. They are computed independently,
/// so `min_speed` may exceed `max_speed` when the safety line cannot be met
/// without overflowing; callers surface that instead of resolving it.
#[derive(Debug, Clone, Copy)]
pub struct SpeedLimiter {
    /// Maximum storage inventory.
    pub capacity: f64,
    /// Inventory the minimum speed aims to stay at or above.
    pub safety_line: f64,
    /// Physical pump ceiling.
    pub ceiling: f64,
}

impl SpeedLimiter {
    pub fn new(capacity: f64, safety_line: f64, ceiling: f64) -> Self {
        Self {
            capacity,
            safety_line,
            ceiling,
        }
    }

    /// Largest useful speed: keeps the tank from overflowing once the
    /// forecast demand is drawn back out, capped by the pump ceiling.
    pub fn max_speed(&self, demand: f64, inventory: f64) -> f64 {
        (self.capacity - inventory + demand).clamp(0.0, self.ceiling)
    }

    /// Smallest speed keeping projected inventory at or above the safety
    /// line after demand is served.
    pub fn min_speed(&self, demand: f64, inventory: f64) -> f64 {
        (demand - inventory + self.safety_line).clamp(0.0, self.ceiling)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::SpeedLimiter;

    fn limiter() -> SpeedLimiter {
        SpeedLimiter::new(2.0, 1.0, 2.0)
    }

    #[test]
    fn max_speed_fills_to_capacity() {
        assert_abs_diff_eq!(limiter().max_speed(0.5, 1.8), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn max_speed_capped_by_ceiling() {
        assert_eq!(limiter().max_speed(1.6, 0.2), 2.0);
    }

    #[test]
    fn max_speed_never_negative_when_over_capacity() {
        assert_eq!(limiter().max_speed(0.1, 3.0), 0.0);
    }

    #[test]
    fn min_speed_covers_deficit_to_safety_line() {
        assert_abs_diff_eq!(limiter().min_speed(0.931, 0.8), 1.131, epsilon = 1e-12);
    }

    #[test]
    fn min_speed_zero_when_above_safety_line() {
        assert_eq!(limiter().min_speed(0.262, 1.9), 0.0);
    }

    #[test]
    fn bounds_stay_within_pump_range() {
        let limiter = limiter();
        let values = [-5.0, -0.5, 0.0, 0.262, 0.931, 1.6, 2.0, 3.5, 10.0];
        for demand in [0.0, 0.262, 0.931, 1.6, 4.0] {
            for inventory in values {
                let max = limiter.max_speed(demand, inventory);
                let min = limiter.min_speed(demand, inventory);
                assert!((0.0..=limiter.ceiling).contains(&max), "max={max}");
                assert!((0.0..=limiter.ceiling).contains(&min), "min={min}");
            }
        }
    }

    #[test]
    fn safety_line_above_capacity_is_infeasible() {
        let limiter = SpeedLimiter::new(2.0, 2.5, 2.0);
        let (min, max) = (limiter.min_speed(0.5, 1.9), limiter.max_speed(0.5, 1.9));
        assert!(min > max, "min={min} max={max}");
    }
}
