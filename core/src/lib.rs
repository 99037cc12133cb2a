#![forbid(unsafe_code)]
//! Domain types and aggregation rules for the ESD DAO holder report.
//!
//! Nothing in this crate performs I/O. The report crate feeds it values read
//! from the chain and this crate decides what they mean.

pub mod amount;
pub mod holders;
pub mod ledger;
pub mod snapshot;
pub mod status;

pub use alloy_primitives::{Address, U256};

pub use amount::{format_amount, Amount, EpochId, AMOUNT_DECIMALS};
pub use holders::unique_holders;
pub use ledger::{HolderLedger, Totals, TotalsError};
pub use snapshot::{EpochSnapshot, UserSnapshot};
pub use status::{DecodeError, UserStatus, USER_STATUS_COUNT};
