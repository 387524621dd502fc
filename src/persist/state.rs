//! A typed value mirrored into a key-value store.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{Codec, JsonCodec, KeyValueStore};

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// A value of type `T` kept in sync with one entry of a [`KeyValueStore`].
///
/// The store itself is passed to every call rather than owned, so several
/// states can share a single backend. The value is written on load and after
/// every mutation; write failures are logged and otherwise ignored.
pub struct PersistentState<T, C = JsonCodec> {
    key: String,
    value: T,
    codec: C,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> PersistentState<T, JsonCodec>
where
    T: Serialize + DeserializeOwned,
{
    /// Loads `key` as JSON, falling back to `default` if it is missing or unreadable.
    pub fn load<S: KeyValueStore>(store: &mut S, key: impl Into<String>, default: T) -> Self {
        Self::load_with_codec(store, key, JsonCodec, || default)
    }

    /// Like [`load`](Self::load), computing the default only when it is needed.
    pub fn load_with<S: KeyValueStore>(
        store: &mut S,
        key: impl Into<String>,
        default: impl FnOnce() -> T,
    ) -> Self {
        Self::load_with_codec(store, key, JsonCodec, default)
    }
}

impl<T, C> PersistentState<T, C>
where
    C: Codec<T>,
{
    /// Loads `key` through `codec`.
    ///
    /// Only an absent entry or one the codec cannot decode falls back to the
    /// default. A stored `0`, `false` or empty string is a real value and is kept.
    #[instrument(skip_all, fields(key = tracing::field::Empty))]
    pub fn load_with_codec<S: KeyValueStore>(
        store: &mut S,
        key: impl Into<String>,
        codec: C,
        default: impl FnOnce() -> T,
    ) -> Self {
        let key = key.into();
        tracing::Span::current().record("key", key.as_str());

        let value = match read(store, &key, &codec) {
            Some(value) => {
                debug!("Loaded persisted value");
                value
            }
            None => default(),
        };

        let state = Self {
            key,
            value,
            codec,
            subscribers: Vec::new(),
        };
        state.persist(store);
        state
    }

    /// Storage key for this value.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Consumes the state, returning the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Replaces the value and persists it.
    #[instrument(skip_all, fields(key = %self.key))]
    pub fn set<S: KeyValueStore>(&mut self, store: &mut S, value: T) {
        self.value = value;
        self.persist(store);
        self.notify();
    }

    /// Mutates the value in place and persists it.
    #[instrument(skip_all, fields(key = %self.key))]
    pub fn update<S: KeyValueStore>(&mut self, store: &mut S, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.persist(store);
        self.notify();
    }

    /// Moves the value to a new key.
    ///
    /// The entry under the previous key is removed before the value is written
    /// under the new one. Setting the same key again just rewrites the value.
    #[instrument(skip_all, fields(from = %self.key))]
    pub fn set_key<S: KeyValueStore>(&mut self, store: &mut S, key: impl Into<String>) {
        let key = key.into();
        if key != self.key {
            self.remove_entry(store);
            info!(to = %key, "Storage key changed");
        }
        self.rekey(store, key);
    }

    /// Removes the entry under the current key. The in-memory value is kept.
    #[instrument(skip_all, fields(key = %self.key))]
    pub fn remove_entry<S: KeyValueStore>(&self, store: &mut S) {
        if let Err(e) = store.remove(&self.key) {
            warn!(error = %e, "Failed to remove entry");
        }
    }

    /// Writes the value under `key` without touching the previous entry.
    pub fn rekey<S: KeyValueStore>(&mut self, store: &mut S, key: impl Into<String>) {
        self.key = key.into();
        self.persist(store);
    }

    /// Registers a callback invoked with the new value after every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    fn persist<S: KeyValueStore>(&self, store: &mut S) {
        let encoded = match self.codec.encode(&self.value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to encode value, not persisted");
                return;
            }
        };
        if let Err(e) = store.set(&self.key, &encoded) {
            warn!(key = %self.key, error = %e, "Failed to persist value");
        }
    }

    fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.value);
        }
    }
}

fn read<T, C, S>(store: &mut S, key: &str, codec: &C) -> Option<T>
where
    C: Codec<T>,
    S: KeyValueStore,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No persisted value, using default");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Store read failed, using default");
            return None;
        }
    };

    match codec.decode(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Persisted value is unreadable, using default");
            None
        }
    }
}

impl<T: std::fmt::Debug, C: std::fmt::Debug> std::fmt::Debug for PersistentState<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentState")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("codec", &self.codec)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
