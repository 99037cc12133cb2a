use alloy_primitives::Address;
use indexmap::IndexSet;

/// Collapse depositor addresses (one per `Deposit` event) into the set of
/// distinct holders, keeping first-occurrence order.
pub fn unique_holders<I>(accounts: I) -> IndexSet<Address>
where
    I: IntoIterator<Item = Address>,
{
    accounts.into_iter().collect()
}
