//! Tunable engine parameters.
//!
//! Defaults reproduce the baseline game. The catalog may override any field
//! through its optional `settings` object.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Interval between passive-income payouts, in milliseconds.
    pub passive_tick_ms: u64,
    /// Number of upgrades in the market when the session starts.
    pub initial_upgrade_pool: usize,
    /// Cheapest generated upgrade (inclusive).
    pub upgrade_cost_min: u32,
    /// Most expensive generated upgrade (inclusive).
    pub upgrade_cost_max: u32,
    /// Income multiplier applied by one business upgrade.
    pub business_income_growth: f64,
    /// Upgrade cost multiplier applied by one business upgrade (result is floored).
    pub business_cost_growth: f64,
    /// Largest wall-clock gap a single frame may feed into the engine.
    pub max_frame_delta_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            passive_tick_ms: 1000,
            initial_upgrade_pool: 3,
            upgrade_cost_min: 50,
            upgrade_cost_max: 149,
            business_income_growth: 1.5,
            business_cost_growth: 1.5,
            max_frame_delta_ms: 500.0,
        }
    }
}

impl EngineConfig {
    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.passive_tick_ms == 0 {
            return Err("passiveTickMs must be positive".into());
        }
        if self.upgrade_cost_min > self.upgrade_cost_max {
            return Err(format!(
                "upgradeCostMin ({}) exceeds upgradeCostMax ({})",
                self.upgrade_cost_min, self.upgrade_cost_max
            ));
        }
        for (label, value) in [
            ("businessIncomeGrowth", self.business_income_growth),
            ("businessCostGrowth", self.business_cost_growth),
            ("maxFrameDeltaMs", self.max_frame_delta_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number", label));
            }
        }
        Ok(())
    }
}
