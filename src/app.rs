//! The run pipeline.
//!
//! One run executes the fixed sequence accounts → transactions → prune →
//! prices → summary. Sync steps abort the run on fetch failures; report
//! write failures for the transactions export are logged and skipped so
//! the valuation still completes from in-memory state.

use anyhow::{Context, Result};

use crate::client::LedgerClient;
use crate::config::ResolvedConfig;
use crate::credentials::ApiCredentials;
use crate::portfolio::{build_summary, ValuationOptions};
use crate::report::ReportWriter;
use crate::storage::{JsonFileStore, Store};
use crate::sync::{fetch_spot_prices, LedgerSynchronizer};

/// Run-mode switches, surfaced as CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Re-fetch the accounts listing even when a local dataset exists.
    pub refresh_accounts: bool,
    /// Re-fetch transaction listings even when a local dataset exists.
    pub refresh_transactions: bool,
    /// Count outgoing transfers toward holdings and cost basis.
    pub include_sent: bool,
}

/// Execute one full sync + valuation run against the real API.
pub async fn run(config: &ResolvedConfig, options: RunOptions) -> Result<()> {
    let credentials = ApiCredentials::load(&config.credentials_file())?;
    let client = LedgerClient::new(credentials);
    let store = JsonFileStore::new(&config.data_dir);

    run_with(&client, &store, config, options).await
}

/// The pipeline body, parameterized over client and store so tests can
/// point both at fakes.
pub async fn run_with<S: Store>(
    client: &LedgerClient,
    store: &S,
    config: &ResolvedConfig,
    options: RunOptions,
) -> Result<()> {
    tracing::info!("starting sync");
    let synchronizer = LedgerSynchronizer::new(client, store);

    let accounts = synchronizer.sync_accounts(options.refresh_accounts).await?;
    let transactions = synchronizer
        .sync_transactions(&accounts.items, options.refresh_transactions)
        .await?;
    let accounts = synchronizer
        .prune_accounts(accounts.items, &transactions.items)
        .await;

    let reports = ReportWriter::new(&config.output_dir);
    if transactions.refreshed {
        if let Err(e) = reports.write_transactions(&transactions.items) {
            tracing::warn!(error = %e, "failed to write transactions report");
        }
    }

    let prices = fetch_spot_prices(client, &accounts, &config.quote_currency).await?;

    let rows = build_summary(
        &accounts,
        &transactions.items,
        &prices,
        ValuationOptions {
            include_sent: options.include_sent,
        },
    );
    let path = reports
        .write_summary(&rows)
        .context("failed to write summary report")?;

    tracing::info!(
        accounts = accounts.len(),
        transactions = transactions.items.len(),
        report = %path.display(),
        "run complete"
    );
    Ok(())
}
