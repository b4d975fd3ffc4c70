//! Electricity tariff lookup and price trend detection.

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::ConfigError;
use crate::forecast::HOURS_PER_DAY;
use crate::sim::clock::{Minutes, hour_of_day};

/// Electricity price for each hour of the day, repeated every day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TariffTable {
    prices: [f64; HOURS_PER_DAY],
}

impl TariffTable {
    /// Builds a table from exactly 24 finite, strictly positive prices.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the offending entry if the table has
    /// the wrong length or holds a non-positive or non-finite price.
    pub fn new(prices: &[f64]) -> Result<Self, ConfigError> {
        let prices: [f64; HOURS_PER_DAY] = prices.try_into().map_err(|_| {
            ConfigError::new(
                "tariff",
                format!("must have exactly {HOURS_PER_DAY} entries, got {}", prices.len()),
            )
        })?;
        if let Some(hour) = prices.iter().position(|p| !p.is_finite() || *p <= 0.0) {
            return Err(ConfigError::new(
                format!("tariff[{hour}]"),
                "must be a finite value > 0",
            ));
        }
        Ok(Self { prices })
    }

    /// A table charging the same price around the clock.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `price` is not a finite positive value.
    pub fn flat(price: f64) -> Result<Self, ConfigError> {
        Self::new(&[price; HOURS_PER_DAY])
    }

    pub fn prices(&self) -> &[f64; HOURS_PER_DAY] {
        &self.prices
    }
}

/// Direction of the next tariff change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Rising,
    Falling,
    Flat,
}

impl PriceTrend {
    /// `+1`, `-1` or `0`.
    pub fn signum(self) -> i8 {
        match self {
            Self::Rising => 1,
            Self::Falling => -1,
            Self::Flat => 0,
        }
    }
}

/// Answers price questions against a tariff table at simulation resolution.
#[derive(Debug, Clone)]
pub struct PriceOracle {
    table: TariffTable,
    step: Minutes,
}

impl PriceOracle {
    /// Creates an oracle scanning `table` in `step` minute increments.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn new(table: TariffTable, step: Minutes) -> Self {
        assert!(step > 0, "step must be > 0");
        Self { table, step }
    }

    /// Tariff in effect at minute `t`.
    pub fn price_at(&self, t: Minutes) -> f64 {
        self.table.prices[hour_of_day(t)]
    }

    /// Direction of the first price change within `window` minutes after `t`.
    ///
    /// Scans forward one step at a time and reports the sign of the first
    /// nonzero delta, so a price rise is seen before it takes effect.
    pub fn price_trend(&self, t: Minutes, window: Minutes) -> PriceTrend {
        let mut previous = self.price_at(t);
        for k in 1..=window / self.step {
            let price = self.price_at(t + k * self.step);
            match price.partial_cmp(&previous) {
                Some(Ordering::Greater) => return PriceTrend::Rising,
                Some(Ordering::Less) => return PriceTrend::Falling,
                _ => previous = price,
            }
        }
        PriceTrend::Flat
    }
}
