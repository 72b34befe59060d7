use serde::{Deserialize, Serialize};

/// An exchange wallet for a single asset.
///
/// `id` is the remote system's stable identity; accounts are created on
/// first sync and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    /// Asset ticker, e.g. "BTC".
    pub code: String,
    /// Display name, e.g. "Bitcoin".
    pub name: String,
}
