//! Aggregation invariant checking for fuzz testing

use std::collections::HashSet;

use alloy_primitives::{Address, U256};
use esd_dao_core::{DecodeError, Totals, UserStatus};

/// Holder discovery invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolderInvariantResult {
    Valid,
    MoreHoldersThanEvents { holders: usize, events: usize },
    MissingHolder { address: Address },
    UnknownHolder { address: Address },
    DuplicateHolder { address: Address },
    OrderViolation { position: usize, expected: Address, actual: Address },
}

/// Status decoding invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusInvariantResult {
    Valid,
    WrongStatus { code: u8, expected: UserStatus, actual: UserStatus },
    InRangeRejected { code: u8 },
    OutOfRangeAccepted { code: u8, status: UserStatus },
    WideWordAccepted { word: U256, status: UserStatus },
}

/// Bonded totals invariant results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TotalsInvariantResult {
    Valid,
    FrozenMismatch { expected: U256, actual: U256 },
    FluidMismatch { expected: U256, actual: U256 },
    ExpectedSumOverflow,
}

// ============================================================================
// Holder Discovery Invariants (H1-H3)
// ============================================================================

/// H1: never more holders than `Deposit` events
pub fn check_holders_bounded(events: &[Address], holders: &[Address]) -> HolderInvariantResult {
    if holders.len() > events.len() {
        HolderInvariantResult::MoreHoldersThanEvents {
            holders: holders.len(),
            events: events.len(),
        }
    } else {
        HolderInvariantResult::Valid
    }
}

/// H2: every depositor appears exactly once and nobody else appears
pub fn check_holders_exact(events: &[Address], holders: &[Address]) -> HolderInvariantResult {
    let mut seen = HashSet::with_capacity(holders.len());
    for address in holders {
        if !seen.insert(*address) {
            return HolderInvariantResult::DuplicateHolder { address: *address };
        }
    }

    let depositors: HashSet<Address> = events.iter().copied().collect();
    if let Some(address) = holders.iter().find(|address| !depositors.contains(*address)) {
        return HolderInvariantResult::UnknownHolder { address: *address };
    }
    if let Some(address) = events.iter().find(|address| !seen.contains(*address)) {
        return HolderInvariantResult::MissingHolder { address: *address };
    }

    HolderInvariantResult::Valid
}

/// H3: holders are listed in first-deposit order
pub fn check_first_occurrence_order(events: &[Address], holders: &[Address]) -> HolderInvariantResult {
    let mut seen = HashSet::new();
    let expected = events.iter().filter(|address| seen.insert(**address));

    for (position, (expected, actual)) in expected.zip(holders).enumerate() {
        if expected != actual {
            return HolderInvariantResult::OrderViolation {
                position,
                expected: *expected,
                actual: *actual,
            };
        }
    }

    HolderInvariantResult::Valid
}

// ============================================================================
// Status Decoding Invariants (S1)
// ============================================================================

/// S1: 0/1/2 decode to FROZEN/FLUID/LOCKED and everything else is rejected
pub fn check_status_decode(code: u8, decoded: Result<UserStatus, DecodeError>) -> StatusInvariantResult {
    let expected = match code {
        0 => Some(UserStatus::Frozen),
        1 => Some(UserStatus::Fluid),
        2 => Some(UserStatus::Locked),
        _ => None,
    };

    match (expected, decoded) {
        (Some(expected), Ok(actual)) if expected != actual => {
            StatusInvariantResult::WrongStatus { code, expected, actual }
        }
        (Some(_), Ok(_)) => StatusInvariantResult::Valid,
        (Some(_), Err(_)) => StatusInvariantResult::InRangeRejected { code },
        (None, Ok(status)) => StatusInvariantResult::OutOfRangeAccepted { code, status },
        (None, Err(_)) => StatusInvariantResult::Valid,
    }
}

/// S1 over a full return word: only words below 3 decode, and nothing is truncated
pub fn check_status_word_decode(
    word: U256,
    decoded: Result<UserStatus, DecodeError>,
) -> StatusInvariantResult {
    match u8::try_from(word) {
        Ok(code) => check_status_decode(code, decoded),
        Err(_) => match decoded {
            Ok(status) => StatusInvariantResult::WideWordAccepted { word, status },
            Err(_) => StatusInvariantResult::Valid,
        },
    }
}

// ============================================================================
// Bonded Totals Invariants (B1)
// ============================================================================

/// B1: frozen/fluid totals are the bonded sums of exactly those holders;
/// LOCKED bonded is in neither
pub fn check_status_partition(
    snapshots: &[(UserStatus, U256)],
    totals: Totals,
) -> TotalsInvariantResult {
    let mut frozen = U256::ZERO;
    let mut fluid = U256::ZERO;

    for (status, bonded) in snapshots {
        let slot = match status {
            UserStatus::Frozen => &mut frozen,
            UserStatus::Fluid => &mut fluid,
            UserStatus::Locked => continue,
        };
        *slot = match slot.checked_add(*bonded) {
            Some(sum) => sum,
            None => return TotalsInvariantResult::ExpectedSumOverflow,
        };
    }

    if totals.frozen != frozen {
        TotalsInvariantResult::FrozenMismatch {
            expected: frozen,
            actual: totals.frozen,
        }
    } else if totals.fluid != fluid {
        TotalsInvariantResult::FluidMismatch {
            expected: fluid,
            actual: totals.fluid,
        }
    } else {
        TotalsInvariantResult::Valid
    }
}
