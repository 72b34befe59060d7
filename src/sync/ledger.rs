//! Account and transaction synchronization.
//!
//! Each dataset short-circuits to the locally persisted copy unless it is
//! missing or a refresh is forced; otherwise new remote records are fetched
//! through the pagination engine, normalized, merged and persisted.
//! Persistence write failures are logged but never abort the run — the
//! in-memory result still feeds the valuation report.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::client::LedgerClient;
use crate::models::{Account, Transaction, TransactionKind};
use crate::storage::Store;

use super::paginate::{fetch_new_records, ListingScope};
use super::{LedgerRecord, SyncedDataset};

#[derive(Debug, Deserialize)]
struct RawAccount {
    id: String,
    currency: RawCurrency,
}

#[derive(Debug, Deserialize)]
struct RawCurrency {
    code: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    id: String,
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: RawMoney,
    native_amount: RawMoney,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: String,
}

impl LedgerRecord for RawAccount {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl LedgerRecord for RawTransaction {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Exchange fee charged on fiat-settled buys: 1.5% of the fiat value with
/// a $3 floor.
fn buy_fee(usd: Decimal) -> Decimal {
    (usd * Decimal::new(15, 3)).max(Decimal::from(3))
}

fn normalize(raw: RawTransaction) -> Transaction {
    let amount = raw.amount.amount;
    let code = raw.amount.currency;
    let usd = raw.native_amount.amount;
    let fee = if raw.kind == TransactionKind::Buy && code != "USD" {
        buy_fee(usd)
    } else {
        Decimal::ZERO
    };
    // Zero-amount records never occur in practice, but a division fault
    // must not depend on that.
    let price = if amount.is_zero() {
        Decimal::ZERO
    } else {
        (usd - fee) / amount
    };

    Transaction {
        id: raw.id,
        kind: raw.kind,
        amount,
        code,
        usd,
        price,
        fee,
        date: raw.created_at,
    }
}

pub struct LedgerSynchronizer<'a, S> {
    client: &'a LedgerClient,
    store: &'a S,
}

impl<'a, S: Store> LedgerSynchronizer<'a, S> {
    pub fn new(client: &'a LedgerClient, store: &'a S) -> Self {
        Self { client, store }
    }

    /// Sync the accounts dataset. Accounts are append-only here; pruning is
    /// a separate, explicit step.
    pub async fn sync_accounts(&self, refresh: bool) -> Result<SyncedDataset<Account>> {
        let mut accounts = match self.load_accounts_lenient().await {
            Some(accounts) if !refresh => {
                return Ok(SyncedDataset {
                    items: accounts,
                    refreshed: false,
                })
            }
            Some(accounts) => accounts,
            None => Vec::new(),
        };

        tracing::info!("retrieving accounts");
        let new_records: Vec<RawAccount> =
            fetch_new_records(self.client, "accounts", None, &accounts).await?;
        accounts.extend(new_records.into_iter().map(|raw| Account {
            id: raw.id,
            code: raw.currency.code,
            name: raw.currency.name,
        }));

        self.persist_accounts(&accounts).await;
        Ok(SyncedDataset {
            items: accounts,
            refreshed: true,
        })
    }

    /// Sync the transactions dataset across every known account, keeping
    /// the merged set ordered newest-first.
    pub async fn sync_transactions(
        &self,
        accounts: &[Account],
        refresh: bool,
    ) -> Result<SyncedDataset<Transaction>> {
        let mut transactions = match self.load_transactions_lenient().await {
            Some(transactions) if !refresh => {
                return Ok(SyncedDataset {
                    items: transactions,
                    refreshed: false,
                })
            }
            Some(transactions) => transactions,
            None => Vec::new(),
        };

        for account in accounts {
            tracing::info!(code = %account.code, "retrieving transactions");
            let scope = ListingScope {
                collection: "accounts",
                id: &account.id,
            };
            let new_records: Vec<RawTransaction> =
                fetch_new_records(self.client, "transactions", Some(scope), &transactions)
                    .await?;
            transactions.extend(new_records.into_iter().map(normalize));
        }

        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        self.persist_transactions(&transactions).await;
        Ok(SyncedDataset {
            items: transactions,
            refreshed: true,
        })
    }

    /// Drop accounts whose asset never appears in the transaction history,
    /// persisting only when the set actually shrank.
    pub async fn prune_accounts(
        &self,
        accounts: Vec<Account>,
        transactions: &[Transaction],
    ) -> Vec<Account> {
        let total = accounts.len();
        let kept: Vec<Account> = accounts
            .into_iter()
            .filter(|account| transactions.iter().any(|t| t.code == account.code))
            .collect();

        if kept.len() < total {
            tracing::info!(removed = total - kept.len(), "pruned unused accounts");
            self.persist_accounts(&kept).await;
        }
        kept
    }

    async fn load_accounts_lenient(&self) -> Option<Vec<Account>> {
        match self.store.load_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read accounts dataset; resyncing in full");
                None
            }
        }
    }

    async fn load_transactions_lenient(&self) -> Option<Vec<Transaction>> {
        match self.store.load_transactions().await {
            Ok(transactions) => transactions,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read transactions dataset; resyncing in full");
                None
            }
        }
    }

    async fn persist_accounts(&self, accounts: &[Account]) {
        if let Err(e) = self.store.save_accounts(accounts).await {
            tracing::warn!(error = %e, "failed to persist accounts dataset");
        }
    }

    async fn persist_transactions(&self, transactions: &[Transaction]) {
        if let Err(e) = self.store.save_transactions(transactions).await {
            tracing::warn!(error = %e, "failed to persist transactions dataset");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw_tx(kind: &str, amount: Decimal, currency: &str, usd: Decimal) -> RawTransaction {
        serde_json::from_value(serde_json::json!({
            "id": "tx-1",
            "type": kind,
            "amount": { "amount": amount.to_string(), "currency": currency },
            "native_amount": { "amount": usd.to_string(), "currency": "USD" },
            "created_at": "2024-03-01T12:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn buy_fee_has_a_three_dollar_floor() {
        assert_eq!(buy_fee(dec!(100)), dec!(3));
        assert_eq!(buy_fee(dec!(1000)), dec!(15.000));
    }

    #[test]
    fn non_fiat_buy_gets_fee_and_net_price() {
        let tx = normalize(raw_tx("buy", dec!(1), "BTC", dec!(100)));
        assert_eq!(tx.fee, dec!(3));
        assert_eq!(tx.price, dec!(97));
        assert_eq!(tx.kind, TransactionKind::Buy);
    }

    #[test]
    fn fiat_buy_is_fee_free() {
        let tx = normalize(raw_tx("buy", dec!(100), "USD", dec!(100)));
        assert_eq!(tx.fee, Decimal::ZERO);
        assert_eq!(tx.price, dec!(1));
    }

    #[test]
    fn sells_and_sends_are_fee_free() {
        let sell = normalize(raw_tx("sell", dec!(-2), "ETH", dec!(-500)));
        assert_eq!(sell.fee, Decimal::ZERO);
        assert_eq!(sell.price, dec!(250));

        let send = normalize(raw_tx("send", dec!(-1), "BTC", dec!(-200)));
        assert_eq!(send.fee, Decimal::ZERO);
        assert_eq!(send.price, dec!(200));
    }

    #[test]
    fn zero_amount_yields_zero_price() {
        let tx = normalize(raw_tx("send", dec!(0), "BTC", dec!(0)));
        assert_eq!(tx.price, Decimal::ZERO);
    }

    #[test]
    fn unknown_kind_survives_normalization() {
        let tx = normalize(raw_tx("exchange_deposit", dec!(5), "USDC", dec!(5)));
        assert_eq!(tx.kind, TransactionKind::Other("exchange_deposit".to_string()));
        assert_eq!(tx.fee, Decimal::ZERO);
    }
}
