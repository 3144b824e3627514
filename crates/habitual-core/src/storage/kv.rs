//! Key-value persistence seam.
//!
//! The habit store writes whole JSON documents per key. Backends only need
//! string get/set; missing or malformed values are the caller's business.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::PersistenceError;

/// Keys of the persisted layout.
pub mod keys {
    pub const HABITS: &str = "habits";
    pub const LOGS: &str = "logs";
    pub const REVIEWS: &str = "reviews";
    pub const IDENTITY: &str = "identity";
    pub const THEME_MODE: &str = "theme_mode";
    pub const WEEK_START_DAY: &str = "week_start_day";
    pub const ONBOARDING_COMPLETED: &str = "onboarding_completed";
}

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, for exercising warning paths.
    pub fn read_only() -> Self {
        Self {
            entries: RefCell::default(),
            read_only: true,
        }
    }

    /// Keep the current entries but reject further writes.
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RefCell::new(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
            read_only: false,
        }
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.read_only {
            return Err(PersistenceError::WriteRejected {
                key: key.to_string(),
                message: "store is read-only".into(),
            });
        }
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_get_set() {
        let kv = MemoryKv::new();
        assert!(kv.get("k").unwrap().is_none());
        kv.set("k", "v").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
        kv.set("k", "w").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn read_only_rejects_writes() {
        let kv = MemoryKv::read_only();
        assert!(matches!(
            kv.set("habits", "[]"),
            Err(PersistenceError::WriteRejected { .. })
        ));
    }

    #[test]
    fn into_read_only_keeps_entries() {
        let kv = MemoryKv::with_entries([("theme_mode", "light")]).into_read_only();
        assert_eq!(kv.get("theme_mode").unwrap().as_deref(), Some("light"));
        assert!(kv.set("theme_mode", "dark").is_err());
        assert_eq!(kv.get("theme_mode").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn borrowed_store_delegates() {
        let kv = MemoryKv::new();
        let by_ref: &dyn KvStore = &kv;
        by_ref.set(keys::THEME_MODE, "light").unwrap();
        assert_eq!(kv.get(keys::THEME_MODE).unwrap().as_deref(), Some("light"));
    }
}
