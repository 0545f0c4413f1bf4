//! Economy state: currency, passive income, businesses, and the upgrade pool.

/// Kinds of global upgrade effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    IncomeMultiplier,
    PassiveIncomeBoost,
    CostReduction,
}

impl UpgradeKind {
    /// All kinds in generation order.
    pub fn all() -> &'static [UpgradeKind] {
        &[
            UpgradeKind::IncomeMultiplier,
            UpgradeKind::PassiveIncomeBoost,
            UpgradeKind::CostReduction,
        ]
    }

    /// Catalog spelling of the kind.
    pub fn key(&self) -> &'static str {
        match self {
            UpgradeKind::IncomeMultiplier => "incomeMultiplier",
            UpgradeKind::PassiveIncomeBoost => "passiveIncomeBoost",
            UpgradeKind::CostReduction => "costReduction",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.key() == key)
    }

    /// Inclusive effect range used when generating upgrades of this kind.
    pub fn default_effect_range(&self) -> (f64, f64) {
        match self {
            UpgradeKind::IncomeMultiplier => (1.5, 3.0),
            UpgradeKind::PassiveIncomeBoost => (1.0, 5.0),
            UpgradeKind::CostReduction => (0.1, 0.5),
        }
    }

    /// Display name derived from kind and effect strength.
    pub fn display_name(&self, effect: f64) -> String {
        match self {
            UpgradeKind::IncomeMultiplier => format!("Profit Multiplier x{:.2}", effect),
            UpgradeKind::PassiveIncomeBoost => format!("Passive Boost +{:.2} income/sec", effect),
            UpgradeKind::CostReduction => {
                format!("Efficiency Boost -{:.0}% Cost", effect * 100.0)
            }
        }
    }
}

/// Engine-unique upgrade identity. Names may collide; ids never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UpgradeId(pub u64);

/// A purchasable one-shot upgrade.
#[derive(Clone, Debug, PartialEq)]
pub struct Upgrade {
    pub id: UpgradeId,
    pub name: String,
    pub kind: UpgradeKind,
    pub effect: f64,
    pub cost: f64,
}

/// Automation purchase attached to a business.
#[derive(Clone, Debug, PartialEq)]
pub struct Manager {
    pub name: String,
    pub cost: f64,
    /// Seconds between automatic earns.
    pub interval_seconds: f64,
    pub hired: bool,
}

/// A single income-generating business.
#[derive(Clone, Debug, PartialEq)]
pub struct Business {
    pub name: String,
    pub income_per_action: f64,
    /// Listed price of the business. Only cost-reduction upgrades touch it.
    pub cost: f64,
    pub upgrade_cost: f64,
    pub cooldown_seconds: f64,
    pub unlocked: bool,
    pub unlock_threshold: f64,
    pub owned: bool,
    pub manager: Option<Manager>,
}

impl Business {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, income_per_action: f64, unlock_threshold: f64) -> Self {
        Self {
            name: name.into(),
            income_per_action,
            cost: 0.0,
            upgrade_cost: 0.0,
            cooldown_seconds: 1.0,
            unlocked: false,
            unlock_threshold,
            owned: false,
            manager: None,
        }
    }

    pub fn has_hired_manager(&self) -> bool {
        self.manager.as_ref().is_some_and(|m| m.hired)
    }

    /// Manual income per second if clicked as soon as it is ready.
    pub fn income_per_second(&self) -> f64 {
        if self.cooldown_seconds > 0.0 {
            self.income_per_action / self.cooldown_seconds
        } else {
            self.income_per_action
        }
    }
}

/// Whole mutable economy of one session.
#[derive(Clone, Debug, Default)]
pub struct EconomyState {
    pub currency: f64,
    pub passive_income_per_second: f64,
    /// Businesses in catalog order; names are unique.
    pub businesses: Vec<Business>,
    /// Purchasable upgrades, ascending by cost.
    pub available_upgrades: Vec<Upgrade>,
}

impl EconomyState {
    pub fn new(businesses: Vec<Business>) -> Self {
        Self {
            businesses,
            ..Self::default()
        }
    }

    /// Add money. Callers only pass non-negative amounts; no guard here.
    pub fn credit(&mut self, amount: f64) {
        self.currency += amount;
    }

    /// Deduct `amount` if affordable. Returns false and leaves state unchanged otherwise.
    pub fn debit(&mut self, amount: f64) -> bool {
        if self.currency >= amount {
            self.currency -= amount;
            true
        } else {
            false
        }
    }

    /// Apply an upgrade effect to the whole economy.
    pub fn apply_global_effect(&mut self, kind: UpgradeKind, effect: f64) {
        match kind {
            UpgradeKind::IncomeMultiplier => {
                for b in &mut self.businesses {
                    b.income_per_action *= effect;
                }
            }
            UpgradeKind::CostReduction => {
                let factor = 1.0 - effect;
                for b in &mut self.businesses {
                    b.cost *= factor;
                    b.upgrade_cost *= factor;
                }
            }
            UpgradeKind::PassiveIncomeBoost => {
                self.passive_income_per_second += effect;
            }
        }
    }

    pub fn business_index(&self, name: &str) -> Option<usize> {
        self.businesses.iter().position(|b| b.name == name)
    }

    #[cfg(test)]
    pub fn business(&self, name: &str) -> Option<&Business> {
        self.businesses.iter().find(|b| b.name == name)
    }

    pub fn upgrade(&self, id: UpgradeId) -> Option<&Upgrade> {
        self.available_upgrades.iter().find(|u| u.id == id)
    }

    /// Insert keeping ascending cost; equal costs keep arrival order.
    pub fn insert_upgrade(&mut self, upgrade: Upgrade) {
        let pos = self
            .available_upgrades
            .partition_point(|u| u.cost <= upgrade.cost);
        self.available_upgrades.insert(pos, upgrade);
    }

    /// Remove by identity. Returns the removed upgrade, if it was present.
    pub fn remove_upgrade(&mut self, id: UpgradeId) -> Option<Upgrade> {
        let pos = self.available_upgrades.iter().position(|u| u.id == id)?;
        Some(self.available_upgrades.remove(pos))
    }
}
