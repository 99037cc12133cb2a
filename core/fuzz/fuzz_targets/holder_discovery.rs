//! Fuzz target for holder discovery
//!
//! Tests invariants:
//! - H1: holder count never exceeds the number of Deposit events
//! - H2: every depositor appears exactly once
//! - H3: holders keep first-deposit order
//!
//! Run with: cargo test --release -p esd-dao-fuzz holder_discovery

use crate::*;
use alloy_primitives::Address;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Discovery over arbitrary deposit logs never violates H1-H3
    #[test]
    fn fuzz_holder_discovery(events in arb_deposit_accounts()) {
        let (result, holders) = simulate_discovery(&events);

        prop_assert!(result.is_success(),
            "Invariant violation: {:?}\nEvents: {:?}", result, events);
        prop_assert!(holders.len() <= events.len());
    }

    /// Appending a log for a known depositor never changes the holder set
    #[test]
    fn fuzz_repeat_deposit_is_idempotent(
        events in prop::collection::vec(arb_address(), 1..32),
        pick in any::<prop::sample::Index>(),
    ) {
        let (_, before) = simulate_discovery(&events);

        let mut extended = events.clone();
        extended.push(events[pick.index(events.len())]);
        let (result, after) = simulate_discovery(&extended);

        prop_assert!(result.is_success());
        prop_assert_eq!(before, after);
    }
}

#[test]
fn repeat_depositor_scenario() {
    let a = Address::repeat_byte(0xa);
    let b = Address::repeat_byte(0xb);

    let (result, holders) = simulate_discovery(&[a, b, a]);

    assert!(result.is_success(), "{result:?}");
    assert_eq!(holders, vec![a, b]);
}
