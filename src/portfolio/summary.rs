//! The valuation engine.
//!
//! Consumes the final account and transaction sets plus the spot price
//! snapshot, and derives one summary row per account along with a totals
//! row. Pure computation; the engine never touches storage or the network.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Account, PriceSnapshot, Transaction, TransactionKind};

use super::SummaryRow;

/// Valuation switches for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationOptions {
    /// Count outgoing transfers toward holdings and cost basis.
    pub include_sent: bool,
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Build the summary rows: one per account, ordered by the last-buy signal
/// (descending, ties broken by the last-sell signal ascending, blanks
/// ranking below every numeric value), with the totals row appended last.
pub fn build_summary(
    accounts: &[Account],
    transactions: &[Transaction],
    prices: &PriceSnapshot,
    options: ValuationOptions,
) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = accounts
        .iter()
        .map(|account| account_row(account, transactions, prices, options))
        .collect();

    rows.sort_by(signal_order);

    let totals = totals_row(&rows);
    rows.push(totals);
    rows
}

fn account_row(
    account: &Account,
    transactions: &[Transaction],
    prices: &PriceSnapshot,
    options: ValuationOptions,
) -> SummaryRow {
    // The transaction set is kept newest-first, so `find` below returns the
    // most recent match.
    let selected: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.code == account.code && (options.include_sent || !t.is_sent()))
        .collect();

    let mut amount = Decimal::ZERO;
    let mut invested_value = Decimal::ZERO;
    for t in &selected {
        amount += t.amount;
        if !t.is_reward() {
            invested_value += t.usd;
        }
    }

    let current_price = prices.get(&account.code).unwrap_or_else(|| {
        tracing::warn!(code = %account.code, "no spot price in snapshot; valuing at zero");
        Decimal::ZERO
    });

    let current_value = round2(amount * current_price);
    let value_difference = round2(current_value - invested_value);
    let pct_change_value = pct_of(value_difference, invested_value);
    let avg_invest_price = (!amount.is_zero()).then(|| invested_value / amount);

    let last_buy = selected
        .iter()
        .copied()
        .find(|t| t.kind == TransactionKind::Buy);
    let last_sell = selected
        .iter()
        .copied()
        .find(|t| t.kind == TransactionKind::Sell);

    let sold_last = match (last_buy, last_sell) {
        (Some(buy), Some(sell)) => sell.date > buy.date,
        (None, Some(_)) => true,
        _ => false,
    };

    let pct_change_last_buy = match last_buy {
        Some(buy) if !sold_last => pct_of(current_price - buy.price, buy.price),
        _ => None,
    };
    let pct_change_last_sell = match last_sell {
        Some(sell) if sold_last => pct_of(current_price - sell.price, sell.price),
        _ => None,
    };

    SummaryRow {
        name: account.name.clone(),
        code: account.code.clone(),
        avg_invest_price,
        current_price: Some(current_price),
        last_buy_price: last_buy.map(|t| t.price),
        pct_change_last_buy,
        last_sell_price: last_sell.map(|t| t.price),
        pct_change_last_sell,
        amount: Some(amount),
        current_value,
        invested_value,
        value_difference,
        pct_change_value,
        last_buy_date: last_buy.map(|t| t.date),
        last_sell_date: last_sell.map(|t| t.date),
    }
}

/// Descending last-buy signal, ties broken by ascending last-sell signal.
/// `None` compares below every numeric value on both fields, giving a total
/// order without any numeric coercion of blanks.
fn signal_order(a: &SummaryRow, b: &SummaryRow) -> std::cmp::Ordering {
    b.pct_change_last_buy
        .cmp(&a.pct_change_last_buy)
        .then_with(|| a.pct_change_last_sell.cmp(&b.pct_change_last_sell))
}

/// `difference / base * 100`, rounded; `None` when the base is zero.
fn pct_of(difference: Decimal, base: Decimal) -> Option<Decimal> {
    (!base.is_zero()).then(|| round2(difference / base * Decimal::ONE_HUNDRED))
}

fn totals_row(rows: &[SummaryRow]) -> SummaryRow {
    let invested_value: Decimal = rows.iter().map(|r| r.invested_value).sum();
    let current_value: Decimal = rows.iter().map(|r| r.current_value).sum();
    let value_difference = round2(current_value - invested_value);
    let pct_change_value = pct_of(value_difference, invested_value);

    SummaryRow {
        name: String::new(),
        code: String::new(),
        avg_invest_price: None,
        current_price: None,
        last_buy_price: None,
        pct_change_last_buy: None,
        last_sell_price: None,
        pct_change_last_sell: None,
        amount: None,
        current_value,
        invested_value,
        value_difference,
        pct_change_value,
        last_buy_date: None,
        last_sell_date: None,
    }
}
