//! Key bindings: panel switching and row selection mapped to engine intents.

use std::collections::HashSet;

use super::state::{EconomyState, UpgradeId};

/// Which list the player is looking at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Earn,
    Improve,
    Managers,
    Upgrades,
}

impl Panel {
    pub fn all() -> &'static [Panel] {
        &[Panel::Earn, Panel::Improve, Panel::Managers, Panel::Upgrades]
    }

    pub fn key(&self) -> char {
        match self {
            Panel::Earn => 'e',
            Panel::Improve => 'i',
            Panel::Managers => 'm',
            Panel::Upgrades => 'u',
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Panel::Earn => "Earn",
            Panel::Improve => "Improve",
            Panel::Managers => "Managers",
            Panel::Upgrades => "Upgrades",
        }
    }

    fn from_key(key: char) -> Option<Panel> {
        Self::all().iter().copied().find(|p| p.key() == key)
    }
}

/// A player request forwarded to the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Earn(String),
    UpgradeBusiness(String),
    HireManager(String),
    PurchaseUpgrade(UpgradeId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum KeyAction {
    SwitchPanel(Panel),
    Perform(Intent),
    Ignored,
}

/// Map '1'..='9' to a zero-based row.
pub fn row_for_key(key: char) -> Option<usize> {
    match key {
        '1'..='9' => Some(key as usize - '1' as usize),
        _ => None,
    }
}

/// Resolve a key press on `panel`. Earn rows whose manual control was
/// disabled by a hired manager are ignored.
pub fn resolve(
    key: char,
    panel: Panel,
    state: &EconomyState,
    manual_disabled: &HashSet<String>,
) -> KeyAction {
    if let Some(p) = Panel::from_key(key) {
        return KeyAction::SwitchPanel(p);
    }
    let Some(row) = row_for_key(key) else {
        return KeyAction::Ignored;
    };

    if panel == Panel::Upgrades {
        return match state.available_upgrades.get(row) {
            Some(u) => KeyAction::Perform(Intent::PurchaseUpgrade(u.id)),
            None => KeyAction::Ignored,
        };
    }

    let Some(business) = state.businesses.get(row) else {
        return KeyAction::Ignored;
    };
    let name = business.name.clone();
    match panel {
        Panel::Earn if manual_disabled.contains(&name) => KeyAction::Ignored,
        Panel::Earn => KeyAction::Perform(Intent::Earn(name)),
        Panel::Improve => KeyAction::Perform(Intent::UpgradeBusiness(name)),
        Panel::Managers => KeyAction::Perform(Intent::HireManager(name)),
        Panel::Upgrades => KeyAction::Ignored,
    }
}
