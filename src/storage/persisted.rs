//! Typed access to persisted keys
//!
//! Reads never fail: a missing key yields the default, and an unreadable or
//! corrupt one is logged and also yields the default.

use serde::{de::DeserializeOwned, Serialize};

use super::kv::KeyValueStore;
use crate::error::PettyCashResult;

/// Storage key names, one per persisted field
pub mod keys {
    pub const TRANSACTIONS: &str = "transactions";
    pub const INITIAL_BALANCE: &str = "initialBalance";
    pub const TARGET_TOTAL: &str = "targetTotal";
    pub const VISIBLE_CATEGORIES: &str = "visibleCategories";
    pub const THEME: &str = "theme";
}

/// Load `key`, falling back to `default` when absent or unreadable
pub fn load_or<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is corrupt, using default");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, using default");
            default
        }
    }
}

/// Load `key`, falling back to `T::default()`
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    load_or(store, key, T::default())
}

/// Serialize `value` under `key`
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> PettyCashResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Theme};
    use crate::storage::kv::MemoryStore;

    #[test]
    fn test_missing_key_yields_default() {
        let store = MemoryStore::new();
        let theme: Theme = load_or_default(&store, keys::THEME);
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn test_corrupt_value_yields_default() {
        let mut store = MemoryStore::new();
        store.insert_raw(keys::TARGET_TOTAL, "{not json");

        let target = load_or(&store, keys::TARGET_TOTAL, Money::from_units(7));
        assert_eq!(target, Money::from_units(7));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save(&mut store, keys::INITIAL_BALANCE, &Some(Money::from_units(250))).unwrap();
        assert_eq!(store.raw(keys::INITIAL_BALANCE), Some("250"));

        let loaded: Option<Money> = load_or_default(&store, keys::INITIAL_BALANCE);
        assert_eq!(loaded, Some(Money::from_units(250)));
    }

    #[test]
    fn test_null_initial_balance() {
        let mut store = MemoryStore::new();
        save(&mut store, keys::INITIAL_BALANCE, &None::<Money>).unwrap();
        assert_eq!(store.raw(keys::INITIAL_BALANCE), Some("null"));

        let loaded: Option<Money> = load_or(&store, keys::INITIAL_BALANCE, Some(Money::zero()));
        assert_eq!(loaded, None);
    }
}
