mod models;
mod summary;

pub use models::SummaryRow;
pub use summary::{build_summary, round2, ValuationOptions};
