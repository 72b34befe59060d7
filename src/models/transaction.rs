use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Remote transaction kind.
///
/// Kinds the valuation engine cares about get their own variant; anything
/// else the remote invents round-trips unchanged through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Buy,
    Sell,
    Send,
    StakingReward,
    InflationReward,
    #[serde(untagged)]
    Other(String),
}

impl TransactionKind {
    /// Adds to the asset balance without being a cash purchase.
    pub fn is_reward(&self) -> bool {
        matches!(self, Self::StakingReward | Self::InflationReward)
    }
}

/// A single ledger entry, normalized from the remote record.
///
/// `fee` and `price` are derived at sync time; everything else comes
/// straight from the remote system. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Signed asset quantity; negative for outgoing sends.
    pub amount: Decimal,
    pub code: String,
    /// Native fiat value of the transaction.
    pub usd: Decimal,
    /// Effective per-unit cost net of fee.
    pub price: Decimal,
    pub fee: Decimal,
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Outgoing transfer of a non-fiat asset. Excluded from holdings and
    /// cost-basis math unless the run overrides it.
    pub fn is_sent(&self) -> bool {
        self.kind == TransactionKind::Send && self.code != "USD"
    }

    pub fn is_reward(&self) -> bool {
        self.kind.is_reward()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_round_trip_as_snake_case() {
        let kind: TransactionKind = serde_json::from_str("\"staking_reward\"").unwrap();
        assert_eq!(kind, TransactionKind::StakingReward);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"staking_reward\"");
    }

    #[test]
    fn unknown_kinds_pass_through_unchanged() {
        let kind: TransactionKind = serde_json::from_str("\"exchange_deposit\"").unwrap();
        assert_eq!(kind, TransactionKind::Other("exchange_deposit".to_string()));
        assert_eq!(
            serde_json::to_string(&kind).unwrap(),
            "\"exchange_deposit\""
        );
    }

    #[test]
    fn sent_requires_non_fiat_send() {
        let tx = Transaction {
            id: "t1".to_string(),
            kind: TransactionKind::Send,
            amount: Decimal::new(-5, 1),
            code: "BTC".to_string(),
            usd: Decimal::new(-100, 0),
            price: Decimal::new(200, 0),
            fee: Decimal::ZERO,
            date: Utc::now(),
        };
        assert!(tx.is_sent());

        let fiat = Transaction {
            code: "USD".to_string(),
            ..tx.clone()
        };
        assert!(!fiat.is_sent());

        let buy = Transaction {
            kind: TransactionKind::Buy,
            ..tx
        };
        assert!(!buy.is_sent());
    }

    #[test]
    fn rewards_are_classified() {
        assert!(TransactionKind::StakingReward.is_reward());
        assert!(TransactionKind::InflationReward.is_reward());
        assert!(!TransactionKind::Buy.is_reward());
        assert!(!TransactionKind::Send.is_reward());
        assert!(!TransactionKind::Other("airdrop".to_string()).is_reward());
    }
}
