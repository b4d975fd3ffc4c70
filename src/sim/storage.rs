//! Storage mass balance.

use super::clock::Minutes;

/// Outcome of integrating one step of inflow and demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageUpdate {
    /// Inventory after clamping to `[0, capacity]`.
    pub inventory: f64,
    /// Volume that did not fit (`> 0` only on overflow).
    pub overflow: f64,
    /// Demand volume that could not be served (`> 0` only on depletion).
    pub shortfall: f64,
}

impl StorageUpdate {
    pub fn overflowed(&self) -> bool {
        self.overflow > 0.0
    }

    pub fn depleted(&self) -> bool {
        self.shortfall > 0.0
    }
}

/// A storage tank with a fixed capacity.
#[derive(Debug, Clone, Copy)]
pub struct Storage {
    pub capacity: f64,
}

impl Storage {
    pub fn new(capacity: f64) -> Self {
        Self { capacity }
    }

    /// Integrates `(supply - demand)` over one step of `step` minutes.
    ///
    /// Rates are per hour. The result is clamped to `[0, capacity]`; the
    /// clamped amount is reported rather than treated as an error.
    pub fn advance_inventory(
        &self,
        inventory: f64,
        supply: f64,
        demand: f64,
        step: Minutes,
    ) -> StorageUpdate {
        let unclamped = inventory + (supply - demand) * f64::from(step) / 60.0;
        StorageUpdate {
            inventory: unclamped.clamp(0.0, self.capacity),
            overflow: (unclamped - self.capacity).max(0.0),
            shortfall: (-unclamped).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::Storage;

    #[test]
    fn integrates_net_flow_over_step() {
        let update = Storage::new(2.0).advance_inventory(1.0, 1.6, 0.4, 30);
        assert_abs_diff_eq!(update.inventory, 1.6, epsilon = 1e-12);
        assert!(!update.overflowed());
        assert!(!update.depleted());
    }

    #[test]
    fn clamps_at_capacity_and_reports_overflow() {
        let update = Storage::new(2.0).advance_inventory(1.9, 2.0, 0.262, 10);
        assert_eq!(update.inventory, 2.0);
        assert!(update.overflowed());
        assert_abs_diff_eq!(update.overflow, 1.9 + 1.738 / 6.0 - 2.0, epsilon = 1e-12);
    }

    #[test]
    fn clamps_at_zero_and_reports_shortfall() {
        let update = Storage::new(2.0).advance_inventory(0.1, 0.0, 1.6, 10);
        assert_eq!(update.inventory, 0.0);
        assert!(update.depleted());
        assert_abs_diff_eq!(update.shortfall, 1.6 / 6.0 - 0.1, epsilon = 1e-12);
    }

    #[test]
    fn mass_balance_is_exact_without_clamping() {
        let storage = Storage::new(100.0);
        let flows = [
            (1.2, 0.262),
            (0.0, 0.931),
            (2.0, 1.6),
            (0.45, 0.45),
            (1.7, 0.262),
            (0.1, 1.6),
        ];
        let mut inventory = 50.0;
        let mut expected = 0.0;
        for (supply, demand) in flows {
            let update = storage.advance_inventory(inventory, supply, demand, 10);
            assert!(!update.overflowed() && !update.depleted());
            inventory = update.inventory;
            expected += (supply - demand) * 10.0 / 60.0;
        }
        assert_abs_diff_eq!(inventory - 50.0, expected, epsilon = 1e-9);
    }

    #[test]
    fn overflow_pins_inventory_until_demand_exceeds_supply() {
        let storage = Storage::new(2.0);
        let mut inventory = 1.8;
        let mut overflow_steps = 0;
        for _ in 0..6 {
            let update = storage.advance_inventory(inventory, 2.0, 0.262, 10);
            if update.overflowed() {
                overflow_steps += 1;
                assert_eq!(update.inventory, 2.0);
            }
            inventory = update.inventory;
        }
        assert!(overflow_steps >= 1);
        assert_eq!(inventory, 2.0);

        let update = storage.advance_inventory(inventory, 0.262, 1.6, 10);
        assert!(update.inventory < 2.0);
        assert!(!update.overflowed());
    }
}
