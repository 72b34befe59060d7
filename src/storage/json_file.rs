use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use crate::models::{Account, Transaction};

use super::Store;

/// JSON file-based store.
///
/// Layout:
/// ```text
/// data/
///   accounts.json
///   transactions.json
/// ```
pub struct JsonFileStore {
    base_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn dataset_file(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.json"))
    }

    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create data directory")?;
        }
        Ok(())
    }

    async fn read_json<T: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &Path,
    ) -> Result<Option<T>> {
        match fs::read_to_string(path).await {
            Ok(content) => {
                let value = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read dataset file"),
        }
    }

    async fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        self.ensure_dir(path).await?;
        let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
        fs::write(path, content)
            .await
            .context("Failed to write dataset file")?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for JsonFileStore {
    async fn load_accounts(&self) -> Result<Option<Vec<Account>>> {
        self.read_json(&self.dataset_file("accounts")).await
    }

    async fn save_accounts(&self, accounts: &[Account]) -> Result<()> {
        self.write_json(&self.dataset_file("accounts"), &accounts)
            .await
    }

    async fn load_transactions(&self) -> Result<Option<Vec<Transaction>>> {
        self.read_json(&self.dataset_file("transactions")).await
    }

    async fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.write_json(&self.dataset_file("transactions"), &transactions)
            .await
    }
}
