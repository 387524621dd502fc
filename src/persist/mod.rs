//! Persistence adapter: typed state over a string key-value store.

mod codec;
mod error;
mod state;
mod store;

pub use codec::{Codec, FnCodec, JsonCodec};
pub use error::{CodecError, StoreError};
pub use state::PersistentState;
pub use store::{KeyValueStore, MemoryStore};
