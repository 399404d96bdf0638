mod month;
mod transaction;

pub use month::MonthKey;
pub use transaction::{Kind, Transaction};
