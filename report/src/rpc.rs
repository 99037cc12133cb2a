use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{BlockNumberOrTag, Filter},
    sol,
    sol_types::SolEvent,
    transports::http::reqwest::Url,
};
use async_trait::async_trait;
use esd_dao_core::{Address, Amount, EpochId, U256};

use crate::{
    error::GatewayError,
    gateway::{BlockRange, DaoGateway, DepositEvent},
};

sol! {
    #[sol(rpc)]
    interface IDao {
        event Deposit(address indexed account, uint256 value);

        function totalSupply() external view returns (uint256);
        function totalBonded() external view returns (uint256);
        function totalStaged() external view returns (uint256);
        function totalDebt() external view returns (uint256);
        function totalRedeemable() external view returns (uint256);

        function epoch() external view returns (uint256);
        function epochTime() external view returns (uint256);

        function outstandingCoupons(uint256 epoch) external view returns (uint256);
        function couponsExpiration(uint256 epoch) external view returns (uint256);
        function expiringCoupons(uint256 epoch) external view returns (uint256);
        function totalBondedAt(uint256 epoch) external view returns (uint256);

        function balanceOfStaged(address account) external view returns (uint256);
        function balanceOfBonded(address account) external view returns (uint256);
        // Read as a full word so a bad value cannot be truncated into a valid one.
        function statusOf(address account) external view returns (uint256);
        function fluidUntil(address account) external view returns (uint256);
        function lockedUntil(address account) external view returns (uint256);
    }
}

/// [`DaoGateway`] over an HTTP JSON-RPC endpoint.
pub struct RpcGateway {
    dao: IDao::IDaoInstance<DynProvider>,
}

impl RpcGateway {
    pub fn connect(rpc_url: Url, dao_address: Address) -> Self {
        let provider = ProviderBuilder::new().connect_http(rpc_url).erased();
        Self {
            dao: IDao::new(dao_address, provider),
        }
    }

    pub fn dao_address(&self) -> Address {
        *self.dao.address()
    }

    fn deposit_filter(&self, range: BlockRange) -> Filter {
        let to = range
            .to
            .map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number);
        Filter::new()
            .address(self.dao_address())
            .event_signature(IDao::Deposit::SIGNATURE_HASH)
            .from_block(BlockNumberOrTag::Number(range.from))
            .to_block(to)
    }
}

#[async_trait]
impl DaoGateway for RpcGateway {
    async fn total_supply(&self) -> Result<Amount, GatewayError> {
        self.dao
            .totalSupply()
            .call()
            .await
            .map_err(|err| GatewayError::new("totalSupply", err))
    }

    async fn total_bonded(&self) -> Result<Amount, GatewayError> {
        self.dao
            .totalBonded()
            .call()
            .await
            .map_err(|err| GatewayError::new("totalBonded", err))
    }

    async fn total_staged(&self) -> Result<Amount, GatewayError> {
        self.dao
            .totalStaged()
            .call()
            .await
            .map_err(|err| GatewayError::new("totalStaged", err))
    }

    async fn total_debt(&self) -> Result<Amount, GatewayError> {
        self.dao
            .totalDebt()
            .call()
            .await
            .map_err(|err| GatewayError::new("totalDebt", err))
    }

    async fn total_redeemable(&self) -> Result<Amount, GatewayError> {
        self.dao
            .totalRedeemable()
            .call()
            .await
            .map_err(|err| GatewayError::new("totalRedeemable", err))
    }

    async fn epoch(&self) -> Result<EpochId, GatewayError> {
        self.dao
            .epoch()
            .call()
            .await
            .map_err(|err| GatewayError::new("epoch", err))
    }

    async fn epoch_time(&self) -> Result<EpochId, GatewayError> {
        self.dao
            .epochTime()
            .call()
            .await
            .map_err(|err| GatewayError::new("epochTime", err))
    }

    async fn outstanding_coupons(&self, epoch: EpochId) -> Result<Amount, GatewayError> {
        self.dao
            .outstandingCoupons(epoch)
            .call()
            .await
            .map_err(|err| GatewayError::new("outstandingCoupons", err))
    }

    async fn coupons_expiration(&self, epoch: EpochId) -> Result<EpochId, GatewayError> {
        self.dao
            .couponsExpiration(epoch)
            .call()
            .await
            .map_err(|err| GatewayError::new("couponsExpiration", err))
    }

    async fn expiring_coupons(&self, epoch: EpochId) -> Result<Amount, GatewayError> {
        self.dao
            .expiringCoupons(epoch)
            .call()
            .await
            .map_err(|err| GatewayError::new("expiringCoupons", err))
    }

    async fn total_bonded_at(&self, epoch: EpochId) -> Result<Amount, GatewayError> {
        self.dao
            .totalBondedAt(epoch)
            .call()
            .await
            .map_err(|err| GatewayError::new("totalBondedAt", err))
    }

    async fn balance_of_staged(&self, account: Address) -> Result<Amount, GatewayError> {
        self.dao
            .balanceOfStaged(account)
            .call()
            .await
            .map_err(|err| GatewayError::new("balanceOfStaged", err))
    }

    async fn balance_of_bonded(&self, account: Address) -> Result<Amount, GatewayError> {
        self.dao
            .balanceOfBonded(account)
            .call()
            .await
            .map_err(|err| GatewayError::new("balanceOfBonded", err))
    }

    async fn status_of(&self, account: Address) -> Result<U256, GatewayError> {
        self.dao
            .statusOf(account)
            .call()
            .await
            .map_err(|err| GatewayError::new("statusOf", err))
    }

    async fn fluid_until(&self, account: Address) -> Result<EpochId, GatewayError> {
        self.dao
            .fluidUntil(account)
            .call()
            .await
            .map_err(|err| GatewayError::new("fluidUntil", err))
    }

    async fn locked_until(&self, account: Address) -> Result<EpochId, GatewayError> {
        self.dao
            .lockedUntil(account)
            .call()
            .await
            .map_err(|err| GatewayError::new("lockedUntil", err))
    }

    async fn latest_block(&self) -> Result<u64, GatewayError> {
        self.dao
            .provider()
            .get_block_number()
            .await
            .map_err(|err| GatewayError::new("eth_blockNumber", err))
    }

    async fn deposit_events(&self, range: BlockRange) -> Result<Vec<DepositEvent>, GatewayError> {
        let filter = self.deposit_filter(range);
        let logs = self
            .dao
            .provider()
            .get_logs(&filter)
            .await
            .map_err(|err| GatewayError::new("queryFilter(Deposit)", err))?;

        logs.iter()
            .map(|log| {
                let decoded = log
                    .log_decode::<IDao::Deposit>()
                    .map_err(|err| GatewayError::new("decode(Deposit)", err))?;
                Ok(DepositEvent {
                    account: decoded.inner.data.account,
                    block_number: log.block_number,
                })
            })
            .collect()
    }
}
