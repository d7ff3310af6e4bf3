//! Credit cache bindings backed by `localStorage`.

use modelshot_core::credits::{CreditCache, CreditStore, STORAGE_KEY};
use wasm_bindgen::prelude::*;

/// Reads and writes the cached balance in `window.localStorage`.
///
/// Storage can be unavailable (private mode, sandboxed frames); reads then
/// return nothing and writes are dropped.
struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl CreditStore for LocalStorageStore {
    fn read(&self) -> Option<String> {
        Self::storage()?.get_item(STORAGE_KEY).ok()?
    }

    fn write(&self, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(STORAGE_KEY, value);
        }
    }
}

/// Cached credit balance.
#[wasm_bindgen]
pub struct JsCreditCache {
    inner: CreditCache<LocalStorageStore>,
}

#[wasm_bindgen]
impl JsCreditCache {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CreditCache::new(LocalStorageStore),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn balance(&self) -> f64 {
        self.inner.balance() as f64
    }

    /// Overwrite the balance (e.g. after a server sync).
    pub fn set(&self, amount: f64) -> f64 {
        self.inner.set(amount) as f64
    }

    pub fn add(&self, amount: f64) -> f64 {
        self.inner.add(amount) as f64
    }

    /// Spend credits. Returns false, leaving the balance alone, if too few remain.
    pub fn consume(&self, amount: f64) -> bool {
        let amount = if amount.is_finite() { amount.max(0.0).ceil() as u64 } else { u64::MAX };
        self.inner.consume(amount).ok
    }

    pub fn can_afford(&self, images: u32) -> bool {
        self.inner.can_afford(images as u64)
    }
}

impl Default for JsCreditCache {
    fn default() -> Self {
        Self::new()
    }
}
