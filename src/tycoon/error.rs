//! Error types returned by engine intents and the catalog loader.

use thiserror::Error;

/// Why an intent was rejected. Every variant is recoverable; the session
/// keeps running and the presentation shows the message as a notice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("not enough money: need ${needed:.2}, have ${available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("{0} is still cooling down")]
    ActionUnavailable(String),

    #[error("{0} is locked")]
    BusinessLocked(String),

    #[error("no business named {0:?}")]
    UnknownBusiness(String),

    #[error("upgrade #{0} is no longer available")]
    UnknownUpgrade(u64),

    #[error("{0} has no manager for hire")]
    NoManager(String),

    #[error("{0} already has a manager")]
    ManagerAlreadyHired(String),

    #[error("the game has not been initialized")]
    Uninitialized,
}

/// Why the catalog could not be turned into an initial economy.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog rejected: {0}")]
    Invalid(String),
}
