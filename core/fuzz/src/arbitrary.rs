//! Arbitrary input generators for fuzz testing
//!
//! Address pools are kept small on purpose so that generated deposit logs
//! contain repeat depositors.

use alloy_primitives::{Address, U256};
use esd_dao_core::USER_STATUS_COUNT;
use proptest::prelude::*;

/// Arbitrary depositor address, biased toward a pool of 8 repeat addresses
pub fn arb_address() -> impl Strategy<Value = Address> {
    prop_oneof![
        // Repeat depositors (75% of tests)
        3 => (0u8..8u8).prop_map(Address::repeat_byte),
        // Fresh addresses
        1 => prop::array::uniform20(any::<u8>()).prop_map(Address::from),
    ]
}

/// One account per `Deposit` log, in log order
pub fn arb_deposit_accounts() -> impl Strategy<Value = Vec<Address>> {
    prop::collection::vec(arb_address(), 0..64)
}

/// Arbitrary bonded balance with edge cases
/// Tests: 0, 1 wei, one token, u64/u128 ranges
pub fn arb_bonded() -> impl Strategy<Value = U256> {
    prop_oneof![
        Just(U256::ZERO),
        Just(U256::from(1u64)),
        Just(U256::from(1_000_000_000_000_000_000u64)),
        any::<u64>().prop_map(U256::from),
        any::<u128>().prop_map(U256::from),
    ]
}

/// Status code as returned by the contract, including out-of-range values
pub fn arb_status_code() -> impl Strategy<Value = u8> {
    prop_oneof![
        Just(0u8),
        Just(USER_STATUS_COUNT - 1),
        Just(USER_STATUS_COUNT),
        Just(u8::MAX),
        any::<u8>(),
    ]
}

/// Full ABI return word for `statusOf`, including values whose low byte is a valid code
pub fn arb_status_word() -> impl Strategy<Value = U256> {
    prop_oneof![
        (0u64..3).prop_map(U256::from),
        (3u64..1024).prop_map(U256::from),
        any::<u8>().prop_map(|low| U256::from(256u64 + u64::from(low))),
        prop::array::uniform32(any::<u8>()).prop_map(|bytes| U256::from_be_bytes::<32>(bytes)),
    ]
}

/// Status code the contract can legitimately return
pub fn arb_valid_status_code() -> impl Strategy<Value = u8> {
    0u8..USER_STATUS_COUNT
}

/// One holder as the DAO would report it
#[derive(Debug, Clone)]
pub struct HolderInput {
    pub address: Address,
    pub status_code: u8,
    pub staged: U256,
    pub bonded: U256,
}

impl Arbitrary for HolderInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop::array::uniform20(any::<u8>()).prop_map(Address::from),
            arb_valid_status_code(),
            arb_bonded(),
            arb_bonded(),
        )
            .prop_map(|(address, status_code, staged, bonded)| HolderInput {
                address,
                status_code,
                staged,
                bonded,
            })
            .boxed()
    }
}

/// Holders with one of each status guaranteed, followed by random extras
pub fn arb_holders_all_statuses() -> impl Strategy<Value = Vec<HolderInput>> {
    (
        arb_bonded(),
        arb_bonded(),
        arb_bonded(),
        prop::collection::vec(any::<HolderInput>(), 0..32),
    )
        .prop_map(|(frozen, fluid, locked, extra)| {
            let mut holders = vec![
                HolderInput {
                    address: Address::repeat_byte(0xf0),
                    status_code: 0,
                    staged: U256::ZERO,
                    bonded: frozen,
                },
                HolderInput {
                    address: Address::repeat_byte(0xf1),
                    status_code: 1,
                    staged: U256::ZERO,
                    bonded: fluid,
                },
                HolderInput {
                    address: Address::repeat_byte(0xf2),
                    status_code: 2,
                    staged: U256::ZERO,
                    bonded: locked,
                },
            ];
            holders.extend(extra);
            holders
        })
}
