use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Result, SlotError};

/// Format revision written into every persisted cart.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Envelope around a serialized cart.
///
/// The whole cart is written on every mutation, so the envelope carries the
/// full state plus enough metadata to reject payloads written by an
/// incompatible build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedCart<T> {
    /// Revision of the payload layout.
    pub format_version: u32,

    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,

    /// The serialized cart state.
    pub cart: T,
}

impl<T> PersistedCart<T> {
    /// Wraps a cart in a snapshot stamped with the current time.
    pub fn new(cart: T) -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            saved_at: Utc::now(),
            cart,
        }
    }

    /// Consumes the envelope and returns the cart.
    pub fn into_cart(self) -> T {
        self.cart
    }
}

impl<T: Serialize> PersistedCart<T> {
    /// Serializes the envelope to the JSON blob stored in the slot.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T: DeserializeOwned> PersistedCart<T> {
    /// Parses a blob read from the slot.
    ///
    /// Fails on malformed JSON, a payload that does not match `T`, or an
    /// unknown format revision.
    pub fn decode(blob: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(blob)?;
        if snapshot.format_version != CURRENT_FORMAT_VERSION {
            return Err(SlotError::UnsupportedFormat {
                found: snapshot.format_version,
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestState {
        value: i32,
        name: String,
    }

    #[test]
    fn encode_then_decode_restores_state() {
        let original = TestState {
            value: 42,
            name: "test".to_string(),
        };

        let blob = PersistedCart::new(&original).encode().unwrap();
        let restored: PersistedCart<TestState> = PersistedCart::decode(&blob).unwrap();

        assert_eq!(restored.format_version, CURRENT_FORMAT_VERSION);
        assert_eq!(restored.into_cart(), original);
    }

    #[test]
    fn decode_rejects_garbage() {
        let result = PersistedCart::<TestState>::decode("{not json");
        assert!(matches!(result, Err(SlotError::Serialization(_))));
    }

    #[test]
    fn decode_rejects_mismatched_shape() {
        let blob = r#"{"format_version":1,"saved_at":"2024-01-01T00:00:00Z","cart":[1,2,3]}"#;
        let result = PersistedCart::<TestState>::decode(blob);
        assert!(matches!(result, Err(SlotError::Serialization(_))));
    }

    #[test]
    fn decode_rejects_unknown_format_version() {
        let blob = r#"{"format_version":99,"saved_at":"2024-01-01T00:00:00Z","cart":{"value":1,"name":"x"}}"#;
        let result = PersistedCart::<TestState>::decode(blob);
        assert!(matches!(
            result,
            Err(SlotError::UnsupportedFormat { found: 99 })
        ));
    }
}
