//! Spot price retrieval.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::client::{LedgerClient, Resource};
use crate::error::ClientError;
use crate::models::{Account, PriceSnapshot};

#[derive(Debug, Deserialize)]
struct SpotPrice {
    amount: Decimal,
}

/// Fetch the current spot price for every account's asset.
///
/// Lookups are issued one at a time; the remote rate limit is the reason
/// this is not fanned out.
pub async fn fetch_spot_prices(
    client: &LedgerClient,
    accounts: &[Account],
    quote_currency: &str,
) -> Result<PriceSnapshot, ClientError> {
    tracing::info!("retrieving current prices");
    let mut snapshot = PriceSnapshot::new();

    for account in accounts {
        let path = format!("/v2/prices/{}-{}/spot", account.code, quote_currency);
        let spot: Resource<SpotPrice> = client.get(&path).await?;
        snapshot.insert(account.code.clone(), spot.data.amount);
    }

    Ok(snapshot)
}
