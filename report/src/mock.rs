//! In-memory [`DaoGateway`] for driver and builder tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use esd_dao_core::{Address, Amount, EpochId, EpochSnapshot, U256};

use crate::{
    error::GatewayError,
    gateway::{BlockRange, DaoGateway, DepositEvent},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockUser {
    pub staged: Amount,
    pub bonded: Amount,
    pub status_code: U256,
    pub fluid_until: EpochId,
    pub locked_until: EpochId,
}

impl MockUser {
    pub fn bonded(status_code: u64, bonded: u64) -> Self {
        Self {
            staged: U256::from(3u64),
            bonded: U256::from(bonded),
            status_code: U256::from(status_code),
            fluid_until: U256::from(40u64),
            locked_until: U256::from(44u64),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockGateway {
    pub supply: Amount,
    pub total_bonded: Amount,
    pub total_staged: Amount,
    pub total_debt: Amount,
    pub total_redeemable: Amount,
    pub epoch: EpochId,
    pub epoch_time: EpochId,
    pub epoch_data: HashMap<EpochId, EpochSnapshot>,
    pub users: HashMap<Address, MockUser>,
    pub deposits: Vec<DepositEvent>,
    pub head: u64,
    /// Calls named here fail with a canned error.
    pub failing: HashSet<&'static str>,
    /// Reject any log query whose result would exceed this many entries.
    pub max_logs_per_query: Option<usize>,
    pub log_queries: Mutex<Vec<BlockRange>>,
    /// Holders whose `balanceOfStaged` read has started but not returned.
    pub holder_reads_in_flight: AtomicUsize,
    pub peak_holder_reads: AtomicUsize,
}

pub fn holder(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

impl MockGateway {
    /// One epoch (7) with coupon data and no holders.
    pub fn new() -> Self {
        let epoch = U256::from(7u64);
        let mut epoch_data = HashMap::new();
        epoch_data.insert(
            epoch,
            EpochSnapshot {
                outstanding_coupons: U256::from(900u64),
                coupons_expiration: U256::from(97u64),
                expiring_coupons: U256::from(120u64),
                total_bonded: U256::from(2_000u64),
            },
        );

        Self {
            supply: U256::from(10_000u64),
            total_bonded: U256::from(2_000u64),
            total_staged: U256::from(1_500u64),
            total_debt: U256::from(700u64),
            total_redeemable: U256::from(80u64),
            epoch,
            epoch_time: U256::from(1_600_000_000u64),
            epoch_data,
            head: 100,
            ..Self::default()
        }
    }

    pub fn with_user(mut self, address: Address, user: MockUser) -> Self {
        self.users.insert(address, user);
        self
    }

    pub fn with_deposit(mut self, account: Address, block: u64) -> Self {
        self.deposits.push(DepositEvent {
            account,
            block_number: Some(block),
        });
        self.head = self.head.max(block);
        self
    }

    pub fn failing(mut self, call: &'static str) -> Self {
        self.failing.insert(call);
        self
    }

    pub fn peak_holder_reads(&self) -> usize {
        self.peak_holder_reads.load(Ordering::SeqCst)
    }

    pub fn recorded_log_queries(&self) -> Vec<BlockRange> {
        self.log_queries
            .lock()
            .expect("log query record must not be poisoned")
            .clone()
    }

    fn check(&self, call: &'static str) -> Result<(), GatewayError> {
        if self.failing.contains(call) {
            return Err(GatewayError::new(call, "mock rejected the call"));
        }
        Ok(())
    }

    fn epoch_entry(&self, call: &'static str, epoch: EpochId) -> Result<&EpochSnapshot, GatewayError> {
        self.check(call)?;
        self.epoch_data
            .get(&epoch)
            .ok_or_else(|| GatewayError::new(call, format!("unknown epoch {epoch}")))
    }

    fn user(&self, call: &'static str, account: Address) -> Result<MockUser, GatewayError> {
        self.check(call)?;
        Ok(self.users.get(&account).copied().unwrap_or_default())
    }
}

#[async_trait]
impl DaoGateway for MockGateway {
    async fn total_supply(&self) -> Result<Amount, GatewayError> {
        self.check("totalSupply").map(|()| self.supply)
    }

    async fn total_bonded(&self) -> Result<Amount, GatewayError> {
        self.check("totalBonded").map(|()| self.total_bonded)
    }

    async fn total_staged(&self) -> Result<Amount, GatewayError> {
        self.check("totalStaged").map(|()| self.total_staged)
    }

    async fn total_debt(&self) -> Result<Amount, GatewayError> {
        self.check("totalDebt").map(|()| self.total_debt)
    }

    async fn total_redeemable(&self) -> Result<Amount, GatewayError> {
        self.check("totalRedeemable").map(|()| self.total_redeemable)
    }

    async fn epoch(&self) -> Result<EpochId, GatewayError> {
        self.check("epoch").map(|()| self.epoch)
    }

    async fn epoch_time(&self) -> Result<EpochId, GatewayError> {
        self.check("epochTime").map(|()| self.epoch_time)
    }

    async fn outstanding_coupons(&self, epoch: EpochId) -> Result<Amount, GatewayError> {
        self.epoch_entry("outstandingCoupons", epoch)
            .map(|entry| entry.outstanding_coupons)
    }

    async fn coupons_expiration(&self, epoch: EpochId) -> Result<EpochId, GatewayError> {
        self.epoch_entry("couponsExpiration", epoch)
            .map(|entry| entry.coupons_expiration)
    }

    async fn expiring_coupons(&self, epoch: EpochId) -> Result<Amount, GatewayError> {
        self.epoch_entry("expiringCoupons", epoch)
            .map(|entry| entry.expiring_coupons)
    }

    async fn total_bonded_at(&self, epoch: EpochId) -> Result<Amount, GatewayError> {
        self.epoch_entry("totalBondedAt", epoch)
            .map(|entry| entry.total_bonded)
    }

    async fn balance_of_staged(&self, account: Address) -> Result<Amount, GatewayError> {
        let now = self.holder_reads_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_holder_reads.fetch_max(now, Ordering::SeqCst);
        // Let other holder tasks run so overlapping reads are observable.
        tokio::task::yield_now().await;
        self.holder_reads_in_flight.fetch_sub(1, Ordering::SeqCst);

        self.user("balanceOfStaged", account).map(|user| user.staged)
    }

    async fn balance_of_bonded(&self, account: Address) -> Result<Amount, GatewayError> {
        self.user("balanceOfBonded", account).map(|user| user.bonded)
    }

    async fn status_of(&self, account: Address) -> Result<U256, GatewayError> {
        self.user("statusOf", account).map(|user| user.status_code)
    }

    async fn fluid_until(&self, account: Address) -> Result<EpochId, GatewayError> {
        self.user("fluidUntil", account).map(|user| user.fluid_until)
    }

    async fn locked_until(&self, account: Address) -> Result<EpochId, GatewayError> {
        self.user("lockedUntil", account).map(|user| user.locked_until)
    }

    async fn latest_block(&self) -> Result<u64, GatewayError> {
        self.check("eth_blockNumber").map(|()| self.head)
    }

    async fn deposit_events(&self, range: BlockRange) -> Result<Vec<DepositEvent>, GatewayError> {
        self.check("queryFilter(Deposit)")?;
        self.log_queries
            .lock()
            .expect("log query record must not be poisoned")
            .push(range);

        let events: Vec<DepositEvent> = self
            .deposits
            .iter()
            .filter(|event| event.block_number.map_or(false, |block| range.contains(block)))
            .copied()
            .collect();

        if let Some(limit) = self.max_logs_per_query {
            if events.len() > limit {
                return Err(GatewayError::new(
                    "queryFilter(Deposit)",
                    format!("query returned more than {limit} results"),
                ));
            }
        }
        Ok(events)
    }
}
