//! Per-business earn cooldowns.
//!
//! Each business cycles `Ready -> Cooling -> Ready`. Starting a cooldown
//! while one is running is refused, so there is never more than one pending
//! countdown per business.

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cooldown {
    Ready,
    Cooling { started_at: u64, ends_at: u64 },
}

impl Cooldown {
    pub fn is_ready(&self) -> bool {
        matches!(self, Cooldown::Ready)
    }

    /// Fraction of the countdown still remaining at `now` (1.0 = just started).
    pub fn remaining_fraction(&self, now: u64) -> f64 {
        match *self {
            Cooldown::Ready => 0.0,
            Cooldown::Cooling { started_at, ends_at } => {
                if ends_at <= started_at || now >= ends_at {
                    return 0.0;
                }
                let total = (ends_at - started_at) as f64;
                let left = (ends_at - now.max(started_at)) as f64;
                left / total
            }
        }
    }

    pub fn remaining_ms(&self, now: u64) -> u64 {
        match *self {
            Cooldown::Ready => 0,
            Cooldown::Cooling { ends_at, .. } => ends_at.saturating_sub(now),
        }
    }
}

/// Cooldown slot for every business, indexed like `EconomyState::businesses`.
#[derive(Debug, Default)]
pub struct CooldownTable {
    slots: Vec<Cooldown>,
}

impl CooldownTable {
    pub fn new(businesses: usize) -> Self {
        Self {
            slots: vec![Cooldown::Ready; businesses],
        }
    }

    pub fn get(&self, index: usize) -> Cooldown {
        self.slots.get(index).copied().unwrap_or(Cooldown::Ready)
    }

    /// Begin a countdown. Returns false if the business is already cooling.
    pub fn start(&mut self, index: usize, now: u64, duration_ms: u64) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_ready() => {
                *slot = Cooldown::Cooling {
                    started_at: now,
                    ends_at: now.saturating_add(duration_ms),
                };
                true
            }
            _ => false,
        }
    }

    /// Mark the countdown done. Returns false if nothing was running.
    pub fn finish(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if !slot.is_ready() => {
                *slot = Cooldown::Ready;
                true
            }
            _ => false,
        }
    }

    /// Indices currently cooling.
    pub fn cooling(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_ready())
            .map(|(i, _)| i)
    }
}
