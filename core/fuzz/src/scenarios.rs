//! Fuzz testing scenarios that simulate a report run
//!
//! These drive the same core rules the report binary uses, with holders
//! supplied in memory instead of read from a node.

use alloy_primitives::Address;
use esd_dao_core::{unique_holders, HolderLedger, Totals, UserSnapshot, UserStatus, U256};

use crate::arbitrary::HolderInput;
use crate::invariants::*;

/// Result of a simulated run
#[derive(Debug, Clone)]
pub enum SimulationResult {
    Success,
    Error(String),
    InvariantViolation(String),
}

impl SimulationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SimulationResult::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SimulationResult::Error(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SimulationResult::InvariantViolation(_))
    }
}

/// Reduce deposit logs to holders and check H1-H3
pub fn simulate_discovery(events: &[Address]) -> (SimulationResult, Vec<Address>) {
    let holders: Vec<Address> = unique_holders(events.iter().copied()).into_iter().collect();

    let checks = [
        check_holders_bounded(events, &holders),
        check_holders_exact(events, &holders),
        check_first_occurrence_order(events, &holders),
    ];
    for check in checks {
        if check != HolderInvariantResult::Valid {
            return (
                SimulationResult::InvariantViolation(format!("{check:?}")),
                holders,
            );
        }
    }

    (SimulationResult::Success, holders)
}

/// Decode every holder's status and accumulate, checking B1 on success.
///
/// Holders repeating an earlier address are skipped, the way discovery would
/// have collapsed them. An undecodable status is an `Error`, not a violation.
pub fn simulate_aggregation(holders: &[HolderInput]) -> (SimulationResult, Option<Totals>) {
    simulate_aggregation_in_order(holders, &(0..holders.len()).collect::<Vec<_>>())
}

/// Like [`simulate_aggregation`], but snapshots "arrive" in `completion_order`
/// before being recorded in discovery order, as the bounded holder pool does.
pub fn simulate_aggregation_in_order(
    holders: &[HolderInput],
    completion_order: &[usize],
) -> (SimulationResult, Option<Totals>) {
    let unique = dedupe(holders);

    let mut slots: Vec<Option<UserSnapshot>> = vec![None; unique.len()];
    for &index in completion_order.iter().filter(|&&index| index < unique.len()) {
        let holder = unique[index];
        let status = match UserStatus::try_from(holder.status_code) {
            Ok(status) => status,
            Err(err) => return (SimulationResult::Error(err.to_string()), None),
        };
        slots[index] = Some(UserSnapshot {
            staged: holder.staged,
            bonded: holder.bonded,
            status,
            fluid_until: U256::ZERO,
            locked_until: U256::ZERO,
        });
    }

    let mut ledger = HolderLedger::with_capacity(unique.len());
    let mut recorded = Vec::with_capacity(unique.len());
    for (holder, slot) in unique.iter().zip(slots) {
        let Some(snapshot) = slot else {
            return (
                SimulationResult::Error(format!("no snapshot arrived for {}", holder.address)),
                None,
            );
        };
        if let Err(err) = ledger.record(holder.address, snapshot) {
            return (SimulationResult::Error(err.to_string()), None);
        }
        recorded.push((snapshot.status, snapshot.bonded));
    }

    let totals = ledger.totals();
    match check_status_partition(&recorded, totals) {
        TotalsInvariantResult::Valid => (SimulationResult::Success, Some(totals)),
        violation => (
            SimulationResult::InvariantViolation(format!("{violation:?}")),
            Some(totals),
        ),
    }
}

fn dedupe(holders: &[HolderInput]) -> Vec<&HolderInput> {
    let order = unique_holders(holders.iter().map(|holder| holder.address));
    order
        .iter()
        .filter_map(|address| holders.iter().find(|holder| holder.address == *address))
        .collect()
}
