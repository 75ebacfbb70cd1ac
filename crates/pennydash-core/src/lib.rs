pub mod clock;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod ledger;
pub mod source;

pub use clock::{Clock, FixedClock, SystemClock};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope, failure_from_error};
pub use error::{CoreError, CoreResult};
pub use ledger::aggregate::{
    AggregateResult, BalancePoint, Totals, aggregate, aggregate_for_period, balance_series,
    category_totals, compute_totals,
};
pub use ledger::period::{PeriodKind, filter_by_period};
pub use ledger::types::{Transaction, TransactionId, TransactionKind};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
