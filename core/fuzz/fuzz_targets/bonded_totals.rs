//! Fuzz target for bonded totals
//!
//! Tests invariants:
//! - B1: FROZEN/FLUID totals sum exactly their holders' bonded; LOCKED counts in neither
//! - B2: the order snapshots arrive in does not change the totals
//!
//! Run with: cargo test --release -p esd-dao-fuzz bonded_totals

use crate::*;
use alloy_primitives::{Address, U256};
use esd_dao_core::Totals;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn fuzz_status_partition(holders in arb_holders_all_statuses()) {
        let (result, totals) = simulate_aggregation(&holders);

        prop_assert!(result.is_success(),
            "Invariant violation: {:?}\nHolders: {:?}", result, holders);
        prop_assert!(totals.is_some());
    }

    /// Changing a LOCKED holder's bonded balance never moves either total
    #[test]
    fn fuzz_locked_bonded_is_ignored(
        holders in arb_holders_all_statuses(),
        locked_bonded in arb_bonded(),
    ) {
        let (_, before) = simulate_aggregation(&holders);

        let mut changed = holders.clone();
        changed[2].bonded = locked_bonded;
        let (result, after) = simulate_aggregation(&changed);

        prop_assert!(result.is_success());
        prop_assert_eq!(before, after);
    }

    /// B2: any completion order yields the sequential totals
    #[test]
    fn fuzz_completion_order_is_irrelevant(
        (holders, order) in arb_holders_all_statuses().prop_flat_map(|holders| {
            let order: Vec<usize> = (0..holders.len()).collect();
            (Just(holders), Just(order).prop_shuffle())
        }),
    ) {
        let (sequential_result, sequential) = simulate_aggregation(&holders);
        let (shuffled_result, shuffled) = simulate_aggregation_in_order(&holders, &order);

        prop_assert!(sequential_result.is_success());
        prop_assert!(shuffled_result.is_success());
        prop_assert_eq!(sequential, shuffled);
    }
}

#[test]
fn frozen_fluid_locked_scenario() {
    let holders = vec![
        HolderInput {
            address: Address::repeat_byte(0xa),
            status_code: 0,
            staged: U256::ZERO,
            bonded: U256::from(100u64),
        },
        HolderInput {
            address: Address::repeat_byte(0xb),
            status_code: 1,
            staged: U256::ZERO,
            bonded: U256::from(50u64),
        },
        HolderInput {
            address: Address::repeat_byte(0xc),
            status_code: 2,
            staged: U256::ZERO,
            bonded: U256::from(1_000u64),
        },
    ];

    let (result, totals) = simulate_aggregation(&holders);

    assert!(result.is_success(), "{result:?}");
    assert_eq!(
        totals,
        Some(Totals {
            frozen: U256::from(100u64),
            fluid: U256::from(50u64),
        })
    );
}
