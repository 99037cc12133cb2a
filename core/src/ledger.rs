//! Per-holder accumulation.
//!
//! The ledger owns both running totals and the address-keyed snapshot map.
//! Only FROZEN and FLUID bonded balances are summed; LOCKED accounts are
//! recorded but counted in neither total.

use std::fmt;

use alloy_primitives::Address;
use indexmap::IndexMap;

use crate::{Amount, UserSnapshot, UserStatus};

/// Bonded balances summed by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub frozen: Amount,
    pub fluid: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsError {
    Overflow { status: UserStatus },
    DuplicateHolder { address: Address },
}

impl fmt::Display for TotalsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { status } => {
                write!(f, "total bonded for {status} holders overflowed 256 bits")
            }
            Self::DuplicateHolder { address } => {
                write!(f, "holder {address} was recorded twice")
            }
        }
    }
}

impl std::error::Error for TotalsError {}

impl Totals {
    /// Add `bonded` to the total for `status`. LOCKED is a no-op.
    pub fn add(&mut self, status: UserStatus, bonded: Amount) -> Result<(), TotalsError> {
        let slot = match status {
            UserStatus::Frozen => &mut self.frozen,
            UserStatus::Fluid => &mut self.fluid,
            UserStatus::Locked => return Ok(()),
        };
        *slot = slot
            .checked_add(bonded)
            .ok_or(TotalsError::Overflow { status })?;
        Ok(())
    }
}

/// Snapshots keyed by holder in discovery order, plus the running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderLedger {
    users: IndexMap<Address, UserSnapshot>,
    totals: Totals,
}

impl HolderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(holders: usize) -> Self {
        Self {
            users: IndexMap::with_capacity(holders),
            totals: Totals::default(),
        }
    }

    /// Record one holder. The ledger is unchanged if this returns an error.
    pub fn record(&mut self, address: Address, snapshot: UserSnapshot) -> Result<(), TotalsError> {
        if self.users.contains_key(&address) {
            return Err(TotalsError::DuplicateHolder { address });
        }

        let mut totals = self.totals;
        totals.add(snapshot.status, snapshot.bonded)?;

        self.totals = totals;
        self.users.insert(address, snapshot);
        Ok(())
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn users(&self) -> &IndexMap<Address, UserSnapshot> {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn into_parts(self) -> (IndexMap<Address, UserSnapshot>, Totals) {
        (self.users, self.totals)
    }
}
