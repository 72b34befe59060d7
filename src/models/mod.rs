mod account;
mod price;
mod transaction;

pub use account::Account;
pub use price::PriceSnapshot;
pub use transaction::{Transaction, TransactionKind};
