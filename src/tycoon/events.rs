//! Notifications the engine emits for the presentation layer.
//!
//! The engine only pushes into an outbox; the renderer drains it after each
//! intent or frame and redraws. Nothing flows the other way.

use super::state::UpgradeId;

#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    CurrencyChanged { currency: f64 },
    PassiveIncomeChanged { per_second: f64 },
    /// Income or upgrade cost of a business changed.
    BusinessChanged { business: String },
    BusinessUnlocked { business: String },
    BusinessLocked { business: String },
    CooldownStarted { business: String },
    /// Fraction of the cooldown still remaining.
    CooldownProgress { business: String, remaining: f64 },
    CooldownFinished { business: String, earned: f64 },
    ManagerHired { business: String, manager: String },
    /// The presentation should hide the manual earn control.
    ManualEarnDisabled { business: String },
    UpgradePurchased { id: UpgradeId, name: String },
    UpgradePoolChanged,
}

impl Notification {
    /// One-line log text, or None for notifications that only trigger a redraw.
    pub fn log_line(&self) -> Option<String> {
        match self {
            Notification::BusinessUnlocked { business } => {
                Some(format!("{} unlocked!", business))
            }
            Notification::BusinessLocked { business } => {
                Some(format!("{} locked again", business))
            }
            Notification::ManagerHired { business, manager } => {
                Some(format!("{} now runs {}", manager, business))
            }
            Notification::UpgradePurchased { name, .. } => Some(format!("Bought {}", name)),
            Notification::PassiveIncomeChanged { per_second } => {
                Some(format!("Passive income now ${:.2}/s", per_second))
            }
            _ => None,
        }
    }

    /// Whether the log line deserves highlighting.
    pub fn is_important(&self) -> bool {
        matches!(
            self,
            Notification::BusinessUnlocked { .. }
                | Notification::ManagerHired { .. }
                | Notification::UpgradePurchased { .. }
        )
    }
}
