//! Static catalog of businesses and upgrades.
//!
//! The catalog is JSON embedded in the binary and parsed once at startup.
//! Any parse or validation failure aborts initialization; there is no
//! partially-loaded state.

use std::collections::HashSet;

use serde::Deserialize;

use super::config::EngineConfig;
use super::error::CatalogError;
use super::market::UpgradeTemplate;
use super::state::{Business, Manager, UpgradeKind};

/// The catalog shipped with the game.
pub const BUILTIN_CATALOG: &str = include_str!("../../static/catalog.json");

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    businesses: Vec<BusinessDef>,
    #[serde(default)]
    upgrades: Vec<UpgradeDef>,
    #[serde(default)]
    upgrade_types: Vec<UpgradeTypeDef>,
    #[serde(default)]
    settings: EngineConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BusinessDef {
    name: String,
    income: f64,
    #[serde(default)]
    cost: f64,
    upgrade_cost: f64,
    #[serde(default)]
    unlocked: bool,
    #[serde(default)]
    owned: bool,
    #[serde(default)]
    unlock_cost: f64,
    /// Cooldown in seconds.
    #[serde(default = "default_speed")]
    speed: f64,
    manager: Option<ManagerDef>,
}

fn default_speed() -> f64 {
    1.0
}

#[derive(Deserialize)]
struct ManagerDef {
    name: String,
    cost: f64,
    /// Seconds between automatic earns; defaults to the business cooldown.
    interval: Option<f64>,
}

#[derive(Deserialize)]
struct UpgradeDef {
    #[serde(rename = "type")]
    kind: String,
    effect: f64,
    cost: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpgradeTypeDef {
    #[serde(rename = "type")]
    kind: String,
    min_effect: f64,
    max_effect: f64,
}

/// A fixed upgrade placed in the initial pool.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedUpgrade {
    pub kind: UpgradeKind,
    pub effect: f64,
    pub cost: f64,
}

/// Validated catalog contents, ready to build an engine from.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub businesses: Vec<Business>,
    pub upgrades: Vec<SeedUpgrade>,
    pub templates: Vec<UpgradeTemplate>,
    pub config: EngineConfig,
}

impl Catalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        if file.businesses.is_empty() {
            return Err(invalid("at least one business is required"));
        }
        file.settings.validate().map_err(CatalogError::Invalid)?;

        let mut seen = HashSet::new();
        let mut businesses = Vec::with_capacity(file.businesses.len());
        for def in file.businesses {
            if def.name.trim().is_empty() {
                return Err(invalid("business name must not be empty"));
            }
            if !seen.insert(def.name.clone()) {
                return Err(invalid(format!("duplicate business {:?}", def.name)));
            }
            for (field, value) in [
                ("income", def.income),
                ("cost", def.cost),
                ("upgradeCost", def.upgrade_cost),
                ("unlockCost", def.unlock_cost),
                ("speed", def.speed),
            ] {
                check_amount(&def.name, field, value)?;
            }
            let manager = match def.manager {
                Some(m) => {
                    check_amount(&def.name, "manager.cost", m.cost)?;
                    let interval = m.interval.unwrap_or(def.speed);
                    if !interval.is_finite() || interval <= 0.0 {
                        return Err(invalid(format!(
                            "{}: manager.interval must be positive",
                            def.name
                        )));
                    }
                    Some(Manager {
                        name: m.name,
                        cost: m.cost,
                        interval_seconds: interval,
                        hired: false,
                    })
                }
                None => None,
            };
            businesses.push(Business {
                name: def.name,
                income_per_action: def.income,
                cost: def.cost,
                upgrade_cost: def.upgrade_cost,
                cooldown_seconds: def.speed,
                unlocked: def.unlocked || def.owned,
                unlock_threshold: def.unlock_cost,
                owned: def.owned,
                manager,
            });
        }

        let mut upgrades = Vec::with_capacity(file.upgrades.len());
        for def in file.upgrades {
            let kind = parse_kind(&def.kind)?;
            check_amount("upgrade", "effect", def.effect)?;
            check_amount("upgrade", "cost", def.cost)?;
            check_cost_reduction(kind, def.effect, def.effect)?;
            upgrades.push(SeedUpgrade {
                kind,
                effect: def.effect,
                cost: def.cost,
            });
        }

        let mut templates = UpgradeTemplate::baseline();
        for def in file.upgrade_types {
            let kind = parse_kind(&def.kind)?;
            if !def.min_effect.is_finite()
                || !def.max_effect.is_finite()
                || def.min_effect > def.max_effect
            {
                return Err(invalid(format!(
                    "{}: effect range [{}, {}] is invalid",
                    def.kind, def.min_effect, def.max_effect
                )));
            }
            check_cost_reduction(kind, def.min_effect, def.max_effect)?;
            if let Some(t) = templates.iter_mut().find(|t| t.kind == kind) {
                t.min_effect = def.min_effect;
                t.max_effect = def.max_effect;
            }
        }

        Ok(Catalog {
            businesses,
            upgrades,
            templates,
            config: file.settings,
        })
    }
}

fn invalid(msg: impl Into<String>) -> CatalogError {
    CatalogError::Invalid(msg.into())
}

fn parse_kind(key: &str) -> Result<UpgradeKind, CatalogError> {
    UpgradeKind::from_key(key).ok_or_else(|| invalid(format!("unknown upgrade type {:?}", key)))
}

/// A cost reduction of 1 or more would make prices zero or negative.
fn check_cost_reduction(kind: UpgradeKind, min: f64, max: f64) -> Result<(), CatalogError> {
    if kind == UpgradeKind::CostReduction && (min < 0.0 || max >= 1.0) {
        return Err(invalid(format!(
            "costReduction effect must lie in [0, 1), got [{}, {}]",
            min, max
        )));
    }
    Ok(())
}

fn check_amount(owner: &str, field: &str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!(
            "{}: {} must be a non-negative number, got {}",
            owner, field, value
        )))
    }
}
