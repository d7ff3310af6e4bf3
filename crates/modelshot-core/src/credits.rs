//! Client-side credit balance cache.
//!
//! The authoritative balance lives in the server ledger. The client keeps a
//! copy in a key-value store (browser `localStorage`) for display and for the
//! pre-flight check before a batch is generated.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Credits charged per generated image.
pub const CREDITS_PER_IMAGE: u64 = 10;

/// Storage key of the cached balance.
pub const STORAGE_KEY: &str = "ems_user_credits_v1";

/// Purchasable credit packs. Each pack grants its face value in credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum CreditPack {
    Hundred,
    TwoHundred,
    ThreeHundred,
}

impl CreditPack {
    pub const ALL: [CreditPack; 3] = [
        CreditPack::Hundred,
        CreditPack::TwoHundred,
        CreditPack::ThreeHundred,
    ];

    pub fn credits(self) -> u64 {
        match self {
            CreditPack::Hundred => 100,
            CreditPack::TwoHundred => 200,
            CreditPack::ThreeHundred => 300,
        }
    }

    /// Images the pack pays for.
    pub fn images(self) -> u64 {
        self.credits() / CREDITS_PER_IMAGE
    }
}

impl TryFrom<u64> for CreditPack {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        CreditPack::ALL
            .into_iter()
            .find(|pack| pack.credits() == value)
            .ok_or_else(|| format!("Unknown credit pack: {value}"))
    }
}

impl From<CreditPack> for u64 {
    fn from(pack: CreditPack) -> Self {
        pack.credits()
    }
}

/// Key-value backend holding the cached balance as text.
pub trait CreditStore {
    fn read(&self) -> Option<String>;
    fn write(&self, value: &str);
}

/// In-memory store, for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
        }
    }
}

impl CreditStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn write(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_string());
    }
}

/// Result of [`CreditCache::consume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeOutcome {
    pub ok: bool,
    pub remaining: u64,
}

/// Balance cache over a [`CreditStore`].
#[derive(Debug)]
pub struct CreditCache<S> {
    store: S,
}

impl<S: CreditStore> CreditCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cached balance. Missing, unparsable, negative or non-finite values
    /// read as zero.
    pub fn balance(&self) -> u64 {
        self.store
            .read()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map_or(0, |value| value.floor() as u64)
    }

    /// Overwrite the balance, flooring fractions and clamping at zero.
    pub fn set(&self, amount: f64) -> u64 {
        let safe = if amount.is_finite() {
            amount.floor().max(0.0) as u64
        } else {
            0
        };
        self.store.write(&safe.to_string());
        safe
    }

    /// Add credits. Negative or non-finite amounts add nothing.
    pub fn add(&self, amount: f64) -> u64 {
        let delta = if amount.is_finite() {
            amount.floor().max(0.0) as u64
        } else {
            0
        };
        let next = self.balance().saturating_add(delta);
        self.store.write(&next.to_string());
        debug!(delta, balance = next, "credits added");
        next
    }

    /// Spend `amount` credits if the balance allows it.
    ///
    /// An insufficient balance is reported, not changed.
    pub fn consume(&self, amount: u64) -> ConsumeOutcome {
        let current = self.balance();
        if current < amount {
            debug!(amount, balance = current, "insufficient credits");
            return ConsumeOutcome {
                ok: false,
                remaining: current,
            };
        }
        let remaining = current - amount;
        self.store.write(&remaining.to_string());
        debug!(amount, balance = remaining, "credits consumed");
        ConsumeOutcome {
            ok: true,
            remaining,
        }
    }

    /// Whether the balance pays for `images` generated images.
    pub fn can_afford(&self, images: u64) -> bool {
        self.balance() >= images.saturating_mul(CREDITS_PER_IMAGE)
    }
}
