use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One valuation row of the summary report.
///
/// Optional fields are signals that may not apply to an account (no buy on
/// record, nothing invested, …) and render as blank report columns. The
/// synthetic totals row carries only the aggregate money columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub code: String,
    pub avg_invest_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub last_buy_price: Option<Decimal>,
    pub pct_change_last_buy: Option<Decimal>,
    pub last_sell_price: Option<Decimal>,
    pub pct_change_last_sell: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub current_value: Decimal,
    pub invested_value: Decimal,
    pub value_difference: Decimal,
    pub pct_change_value: Option<Decimal>,
    pub last_buy_date: Option<DateTime<Utc>>,
    pub last_sell_date: Option<DateTime<Utc>>,
}
