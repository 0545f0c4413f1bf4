//! Lemonade Tycoon, an idle business clicker.
//!
//! `TycoonGame` is the session controller. It owns the engine (or the
//! reason it failed to load), turns key presses into intents, and drains
//! engine notifications into the player-facing log.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod events;
pub mod logic;
pub mod market;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod unlock;

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;

use actions::{Intent, KeyAction, Panel};
use catalog::Catalog;
use error::{CatalogError, EngineError};
use events::Notification;
use logic::Engine;

/// Oldest entries are dropped past this length.
const LOG_CAPACITY: usize = 50;

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

pub struct TycoonGame {
    engine: Option<Engine>,
    /// Why the catalog failed to load, if it did.
    pub load_error: Option<String>,
    pub panel: Panel,
    pub log: Vec<LogEntry>,
    /// Businesses whose manual earn control is hidden.
    pub manual_disabled: HashSet<String>,
    /// Remaining cooldown fraction per cooling business, fed by notifications.
    pub cooling: HashMap<String, f64>,
}

impl TycoonGame {
    /// Start a session from the built-in catalog.
    pub fn new(seed: u64) -> Self {
        Self::from_catalog(Catalog::builtin(), seed)
    }

    pub fn from_catalog(catalog: Result<Catalog, CatalogError>, seed: u64) -> Self {
        let mut game = Self {
            engine: None,
            load_error: None,
            panel: Panel::Earn,
            log: Vec::new(),
            manual_disabled: HashSet::new(),
            cooling: HashMap::new(),
        };
        match catalog {
            Ok(catalog) => {
                game.engine = Some(Engine::new(catalog, StdRng::seed_from_u64(seed)));
                game.add_log("Welcome to Lemonade Tycoon!", true);
                game.pump();
            }
            Err(e) => {
                log::error!("catalog load failed: {}", e);
                game.load_error = Some(e.to_string());
            }
        }
        game
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    #[cfg(test)]
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    /// Handle a key press. Returns true if the key did something.
    pub fn handle_key(&mut self, key: char) -> bool {
        let action = match &self.engine {
            Some(engine) => actions::resolve(key, self.panel, engine.state(), &self.manual_disabled),
            None => return false,
        };
        match action {
            KeyAction::SwitchPanel(panel) => {
                self.panel = panel;
                true
            }
            KeyAction::Perform(intent) => {
                let _ = self.dispatch(intent);
                true
            }
            KeyAction::Ignored => false,
        }
    }

    /// Forward an intent to the engine. Rejections are logged for the player
    /// and returned to the caller.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), EngineError> {
        let engine = self.engine.as_mut().ok_or(EngineError::Uninitialized)?;
        let result = match &intent {
            Intent::Earn(name) => engine.earn(name),
            Intent::UpgradeBusiness(name) => engine.upgrade_business(name),
            Intent::HireManager(name) => engine.hire_manager(name),
            Intent::PurchaseUpgrade(id) => engine.purchase_upgrade(*id),
        };
        if let Err(e) = &result {
            log::warn!("{:?} rejected: {}", intent, e);
            self.add_log(&e.to_string(), false);
        }
        self.pump();
        result
    }

    /// Run the engine clock up to `now_ms`. No-op when uninitialized.
    pub fn advance_to(&mut self, now_ms: u64) {
        if let Some(engine) = self.engine.as_mut() {
            engine.advance_to(now_ms);
            self.pump();
        }
    }

    /// Drain engine notifications into presentation state.
    fn pump(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        for note in engine.drain_notifications() {
            match &note {
                Notification::ManualEarnDisabled { business } => {
                    self.manual_disabled.insert(business.clone());
                }
                Notification::CooldownStarted { business } => {
                    let remaining = self
                        .engine
                        .as_ref()
                        .and_then(|e| e.cooldown_progress(business))
                        .unwrap_or(1.0);
                    self.cooling.insert(business.clone(), remaining);
                }
                Notification::CooldownProgress {
                    business,
                    remaining,
                } => {
                    self.cooling.insert(business.clone(), *remaining);
                }
                Notification::CooldownFinished { business, .. } => {
                    self.cooling.remove(business);
                }
                _ => {}
            }
            if let Some(line) = note.log_line() {
                self.add_log(&line, note.is_important());
            }
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }
}
