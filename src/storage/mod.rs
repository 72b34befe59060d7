mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use anyhow::Result;

use crate::models::{Account, Transaction};

/// Persistence for the synced datasets.
///
/// Each dataset is read once at the start of a run and overwritten
/// wholesale after a successful sync. A dataset that has never been
/// written reads as `None` (first run).
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn load_accounts(&self) -> Result<Option<Vec<Account>>>;
    async fn save_accounts(&self, accounts: &[Account]) -> Result<()>;

    async fn load_transactions(&self) -> Result<Option<Vec<Transaction>>>;
    async fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;
}
