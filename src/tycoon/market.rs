//! Upgrade market: procedural generation and purchase of global upgrades.

use rand::rngs::StdRng;
use rand::Rng;

use super::error::EngineError;
use super::state::{EconomyState, Upgrade, UpgradeId, UpgradeKind};

/// Effect range for one upgrade kind.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeTemplate {
    pub kind: UpgradeKind,
    pub min_effect: f64,
    pub max_effect: f64,
}

impl UpgradeTemplate {
    pub fn baseline() -> Vec<UpgradeTemplate> {
        UpgradeKind::all()
            .iter()
            .map(|&kind| {
                let (min_effect, max_effect) = kind.default_effect_range();
                UpgradeTemplate {
                    kind,
                    min_effect,
                    max_effect,
                }
            })
            .collect()
    }
}

pub struct UpgradeMarket<R: Rng = StdRng> {
    rng: R,
    templates: Vec<UpgradeTemplate>,
    cost_min: u32,
    cost_max: u32,
    next_id: u64,
}

impl<R: Rng> UpgradeMarket<R> {
    pub fn new(rng: R, templates: Vec<UpgradeTemplate>, cost_min: u32, cost_max: u32) -> Self {
        Self {
            rng,
            templates,
            cost_min,
            cost_max,
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> UpgradeId {
        let id = UpgradeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Build an upgrade with a fixed effect and cost and put it in the pool.
    pub fn stock(
        &mut self,
        state: &mut EconomyState,
        kind: UpgradeKind,
        effect: f64,
        cost: f64,
    ) -> UpgradeId {
        let id = self.allocate_id();
        state.insert_upgrade(Upgrade {
            id,
            name: kind.display_name(effect),
            kind,
            effect,
            cost,
        });
        id
    }

    /// Roll a random upgrade and insert it into the pool in cost order.
    pub fn generate(&mut self, state: &mut EconomyState) -> Option<UpgradeId> {
        if self.templates.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..self.templates.len());
        let template = &self.templates[pick];
        let kind = template.kind;
        let raw = self.rng.gen_range(template.min_effect..=template.max_effect);
        let effect = round_cents(raw);
        let cost = self.rng.gen_range(self.cost_min..=self.cost_max) as f64;
        let id = self.stock(state, kind, effect, cost);
        log::debug!("market stocked #{} {} for ${}", id.0, kind.display_name(effect), cost);
        Some(id)
    }

    /// Buy an upgrade by identity: debit, apply, remove, replace.
    pub fn purchase(
        &mut self,
        state: &mut EconomyState,
        id: UpgradeId,
    ) -> Result<Upgrade, EngineError> {
        let cost = state
            .upgrade(id)
            .map(|u| u.cost)
            .ok_or(EngineError::UnknownUpgrade(id.0))?;
        if !state.debit(cost) {
            return Err(EngineError::InsufficientFunds {
                needed: cost,
                available: state.currency,
            });
        }
        let upgrade = state
            .remove_upgrade(id)
            .ok_or(EngineError::UnknownUpgrade(id.0))?;
        state.apply_global_effect(upgrade.kind, upgrade.effect);
        self.generate(state);
        Ok(upgrade)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
