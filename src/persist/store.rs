//! Key-value storage seam.

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::StoreError;

/// String-keyed storage of serialized values.
///
/// Backends only move strings around; typing and encoding live in
/// [`PersistentState`](super::PersistentState).
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` if there is none.
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes the entry under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw stored string, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    #[instrument(skip(self))]
    fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!("Writing entry");
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            debug!("Entry removed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").expect("get failed"), None);

        store.set("a", "1").expect("set failed");
        store.set("a", "2").expect("set failed");
        assert_eq!(store.get("a").expect("get failed"), Some("2".to_string()));
        assert_eq!(store.len(), 1);

        store.remove("a").expect("remove failed");
        store.remove("a").expect("second remove failed");
        assert!(store.is_empty());
    }

    #[test]
    fn test_mut_ref_forwards_to_store() {
        let mut store = MemoryStore::new();
        {
            let mut borrowed = &mut store;
            borrowed.set("k", "v").expect("set failed");
        }
        assert_eq!(store.raw("k"), Some("v"));
    }
}
