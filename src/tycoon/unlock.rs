//! Lock/unlock evaluation of businesses against current currency.

use super::state::EconomyState;

#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Unlocked(usize),
    Locked(usize),
}

/// Re-evaluate every business in catalog order and return what changed.
///
/// A locked business unlocks once currency reaches its threshold, or as soon
/// as it is owned. An unlocked business that was never earned from locks
/// again when currency drops below the threshold; owned businesses never lock.
pub fn evaluate(state: &mut EconomyState) -> Vec<Transition> {
    let currency = state.currency;
    let mut changes = Vec::new();
    for (i, b) in state.businesses.iter_mut().enumerate() {
        if !b.unlocked && (b.owned || currency >= b.unlock_threshold) {
            b.unlocked = true;
            changes.push(Transition::Unlocked(i));
        } else if b.unlocked && !b.owned && currency < b.unlock_threshold {
            b.unlocked = false;
            changes.push(Transition::Locked(i));
        }
    }
    changes
}
