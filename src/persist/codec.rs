//! Value codecs for persisted state.

use derive_new::new;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::CodecError;

/// Converts values to and from their stored string form.
pub trait Codec<T> {
    /// Serializes `value`.
    fn encode(&self, value: &T) -> Result<String, CodecError>;

    /// Parses a stored string back into a value.
    fn decode(&self, raw: &str) -> Result<T, CodecError>;
}

/// Default codec: JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    #[instrument(skip_all)]
    fn encode(&self, value: &T) -> Result<String, CodecError> {
        Ok(serde_json::to_string(value)?)
    }

    #[instrument(skip_all, fields(len = raw.len()))]
    fn decode(&self, raw: &str) -> Result<T, CodecError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Codec assembled from a caller-supplied pair of functions.
#[derive(Clone, Copy, new)]
pub struct FnCodec<E, D> {
    encode: E,
    decode: D,
}

impl<T, E, D> Codec<T> for FnCodec<E, D>
where
    E: Fn(&T) -> Result<String, CodecError>,
    D: Fn(&str) -> Result<T, CodecError>,
{
    fn encode(&self, value: &T) -> Result<String, CodecError> {
        (self.encode)(value)
    }

    fn decode(&self, raw: &str) -> Result<T, CodecError> {
        (self.decode)(raw)
    }
}

impl<E, D> std::fmt::Debug for FnCodec<E, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCodec").finish_non_exhaustive()
    }
}
