use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog identifier of a sweet.
///
/// Issued by the remote catalog and stable for the lifetime of the item,
/// so it is the key that cart lines are deduplicated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SweetId(i64);

impl SweetId {
    /// Creates a sweet ID from the catalog's numeric identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the numeric identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SweetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SweetId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<SweetId> for i64 {
    fn from(id: SweetId) -> Self {
        id.0
    }
}

/// Identifier of a single checkout attempt.
///
/// Only used to correlate log lines and outcomes; never sent to the
/// inventory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutId(Uuid);

impl CheckoutId {
    /// Creates a new random checkout ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CheckoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CheckoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
