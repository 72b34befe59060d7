//! In-memory store implementation for testing.

use anyhow::Result;
use tokio::sync::Mutex;

use crate::models::{Account, Transaction};

use super::Store;

/// In-memory store for testing purposes.
#[derive(Default)]
pub struct MemoryStore {
    accounts: Mutex<Option<Vec<Account>>>,
    transactions: Mutex<Option<Vec<Transaction>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the accounts dataset, as if a prior run had persisted it.
    pub async fn seed_accounts(&self, accounts: Vec<Account>) {
        *self.accounts.lock().await = Some(accounts);
    }

    /// Pre-seed the transactions dataset.
    pub async fn seed_transactions(&self, transactions: Vec<Transaction>) {
        *self.transactions.lock().await = Some(transactions);
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn load_accounts(&self) -> Result<Option<Vec<Account>>> {
        Ok(self.accounts.lock().await.clone())
    }

    async fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        *self.accounts.lock().await = Some(accounts.to_vec());
        Ok(())
    }

    async fn load_transactions(&self) -> Result<Option<Vec<Transaction>>> {
        Ok(self.transactions.lock().await.clone())
    }

    async fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        *self.transactions.lock().await = Some(transactions.to_vec());
        Ok(())
    }
}
