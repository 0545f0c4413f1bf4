//! Lint: the shipped `static/catalog.json` is a playable economy.
//!
//! The engine validates the catalog at startup and refuses to run on a bad
//! one, which in the browser only shows up as an error screen. This test
//! catches the same mistakes at `cargo test` time and adds balance checks
//! the engine itself does not enforce.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde_json::Value;

const KNOWN_UPGRADE_TYPES: &[&str] = &["incomeMultiplier", "passiveIncomeBoost", "costReduction"];

fn load() -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("static/catalog.json");
    let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

fn businesses(catalog: &Value) -> &Vec<Value> {
    catalog["businesses"]
        .as_array()
        .expect("businesses must be an array")
}

fn number(v: &Value, field: &str) -> f64 {
    v[field]
        .as_f64()
        .unwrap_or_else(|| panic!("{} missing numeric `{}`", v["name"], field))
}

#[test]
fn business_names_unique_and_non_empty() {
    let catalog = load();
    let mut seen = HashSet::new();
    for b in businesses(&catalog) {
        let name = b["name"].as_str().expect("business name must be a string");
        assert!(!name.trim().is_empty(), "empty business name");
        assert!(seen.insert(name.to_string()), "duplicate business {}", name);
    }
    assert!(!seen.is_empty());
}

#[test]
fn exactly_one_starting_business() {
    let catalog = load();
    let owned: Vec<_> = businesses(&catalog)
        .iter()
        .filter(|b| b["owned"].as_bool().unwrap_or(false))
        .collect();
    assert_eq!(owned.len(), 1, "the player should start with one business");
    assert_eq!(number(owned[0], "unlockCost"), 0.0);
}

#[test]
fn amounts_are_positive() {
    let catalog = load();
    for b in businesses(&catalog) {
        assert!(number(b, "income") > 0.0, "{} earns nothing", b["name"]);
        assert!(number(b, "upgradeCost") > 0.0, "{} upgrades for free", b["name"]);
        assert!(number(b, "unlockCost") >= 0.0);
        if let Some(speed) = b["speed"].as_f64() {
            assert!(speed >= 0.0, "{} has negative speed", b["name"]);
        }
        if let Some(m) = b.get("manager").filter(|m| !m.is_null()) {
            assert!(number(m, "cost") > 0.0);
            if let Some(interval) = m["interval"].as_f64() {
                assert!(interval > 0.0);
            }
        }
    }
}

#[test]
fn unlock_thresholds_increase_down_the_list() {
    let catalog = load();
    let thresholds: Vec<f64> = businesses(&catalog)
        .iter()
        .map(|b| number(b, "unlockCost"))
        .collect();
    for pair in thresholds.windows(2) {
        assert!(pair[0] < pair[1], "thresholds out of order: {:?}", thresholds);
    }
}

#[test]
fn better_businesses_earn_more_per_second() {
    let catalog = load();
    let rates: Vec<f64> = businesses(&catalog)
        .iter()
        .map(|b| number(b, "income") / b["speed"].as_f64().unwrap_or(1.0).max(1.0))
        .collect();
    for pair in rates.windows(2) {
        assert!(pair[0] < pair[1], "income rates out of order: {:?}", rates);
    }
}

#[test]
fn upgrade_types_are_known_with_sane_ranges() {
    let catalog = load();
    let Some(types) = catalog["upgradeTypes"].as_array() else {
        return;
    };
    for t in types {
        let kind = t["type"].as_str().expect("upgrade type must be a string");
        assert!(KNOWN_UPGRADE_TYPES.contains(&kind), "unknown upgrade type {}", kind);
        let (min, max) = (number(t, "minEffect"), number(t, "maxEffect"));
        assert!(min <= max, "{} range inverted", kind);
        if kind == "costReduction" {
            assert!(max < 1.0, "cost reduction of {} would make things free", max);
        }
    }
}

#[test]
fn seed_upgrades_use_known_types() {
    let catalog = load();
    for u in catalog["upgrades"].as_array().into_iter().flatten() {
        let kind = u["type"].as_str().expect("upgrade type must be a string");
        assert!(KNOWN_UPGRADE_TYPES.contains(&kind), "unknown upgrade type {}", kind);
        assert!(number(u, "cost") >= 0.0);
    }
}
