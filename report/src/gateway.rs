//! Read-only view of the DAO contract.
//!
//! Each method is one named contract read. [`crate::rpc::RpcGateway`] serves
//! them over JSON-RPC; tests serve them from memory.

use async_trait::async_trait;
use esd_dao_core::{Address, Amount, EpochId, U256};

use crate::error::GatewayError;

/// One `Deposit` log. Only the depositor and its block are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositEvent {
    pub account: Address,
    pub block_number: Option<u64>,
}

/// Inclusive block window for an event query. `to: None` means the chain head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub from: u64,
    pub to: Option<u64>,
}

impl BlockRange {
    pub fn since(from: u64) -> Self {
        Self { from, to: None }
    }

    pub fn between(from: u64, to: u64) -> Self {
        Self { from, to: Some(to) }
    }

    pub fn contains(&self, block: u64) -> bool {
        block >= self.from && self.to.map_or(true, |to| block <= to)
    }
}

#[async_trait]
pub trait DaoGateway: Send + Sync {
    async fn total_supply(&self) -> Result<Amount, GatewayError>;
    async fn total_bonded(&self) -> Result<Amount, GatewayError>;
    async fn total_staged(&self) -> Result<Amount, GatewayError>;
    async fn total_debt(&self) -> Result<Amount, GatewayError>;
    async fn total_redeemable(&self) -> Result<Amount, GatewayError>;

    async fn epoch(&self) -> Result<EpochId, GatewayError>;
    async fn epoch_time(&self) -> Result<EpochId, GatewayError>;

    async fn outstanding_coupons(&self, epoch: EpochId) -> Result<Amount, GatewayError>;
    async fn coupons_expiration(&self, epoch: EpochId) -> Result<EpochId, GatewayError>;
    async fn expiring_coupons(&self, epoch: EpochId) -> Result<Amount, GatewayError>;
    async fn total_bonded_at(&self, epoch: EpochId) -> Result<Amount, GatewayError>;

    async fn balance_of_staged(&self, account: Address) -> Result<Amount, GatewayError>;
    async fn balance_of_bonded(&self, account: Address) -> Result<Amount, GatewayError>;
    /// Raw `Account.Status` return word; decoding is the caller's job.
    async fn status_of(&self, account: Address) -> Result<U256, GatewayError>;
    async fn fluid_until(&self, account: Address) -> Result<EpochId, GatewayError>;
    async fn locked_until(&self, account: Address) -> Result<EpochId, GatewayError>;

    async fn latest_block(&self) -> Result<u64, GatewayError>;
    /// `Deposit` logs inside `range`, in log order.
    async fn deposit_events(&self, range: BlockRange) -> Result<Vec<DepositEvent>, GatewayError>;
}
