mod ledger;
mod paginate;
mod prices;

pub use ledger::LedgerSynchronizer;
pub use paginate::{fetch_new_records, ListingScope};
pub use prices::fetch_spot_prices;

use crate::models::{Account, Transaction};

/// Anything carrying a stable remote identity. Identity is the sole basis
/// for deduplication across runs.
pub trait LedgerRecord {
    fn record_id(&self) -> &str;
}

impl LedgerRecord for Account {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl LedgerRecord for Transaction {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Result of syncing one dataset: the merged items, plus whether the
/// remote was actually consulted (as opposed to a local short-circuit).
#[derive(Debug, Clone)]
pub struct SyncedDataset<T> {
    pub items: Vec<T>,
    pub refreshed: bool,
}
