//! Aggregation driver: one full read of the DAO and all of its holders.

use std::sync::Arc;

use esd_dao_core::{Address, Amount, EpochId, EpochSnapshot, HolderLedger, UserSnapshot};
use indexmap::{IndexMap, IndexSet};
use tokio::{
    sync::Semaphore,
    task::{JoinError, JoinSet},
};

use crate::{
    config::ReportOptions,
    discovery::discover_holders,
    error::ReportError,
    gateway::DaoGateway,
    snapshot::{epoch_snapshot, user_snapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaoTotals {
    pub supply: Amount,
    pub total_bonded: Amount,
    pub total_staged: Amount,
    pub total_debt: Amount,
    pub total_redeemable: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub totals: DaoTotals,
    pub epoch: EpochId,
    pub epoch_time: EpochId,
    pub epoch_snapshot: EpochSnapshot,
    pub users: IndexMap<Address, UserSnapshot>,
    pub total_frozen: Amount,
    pub total_fluid: Amount,
}

pub struct Reporter<G> {
    gateway: Arc<G>,
    options: ReportOptions,
}

impl<G> Reporter<G>
where
    G: DaoGateway + 'static,
{
    pub fn new(gateway: G, options: ReportOptions) -> Self {
        Self::from_shared(Arc::new(gateway), options)
    }

    pub fn from_shared(gateway: Arc<G>, options: ReportOptions) -> Self {
        Self { gateway, options }
    }

    /// Read everything and aggregate. Either the whole result or the first error.
    pub async fn run(&self) -> Result<RunResult, ReportError> {
        let gateway = self.gateway.as_ref();

        tracing::info!("reading DAO totals");
        let totals = self.dao_totals().await?;
        let (epoch, epoch_time) = tokio::try_join!(gateway.epoch(), gateway.epoch_time())?;

        tracing::info!(%epoch, %epoch_time, "reading epoch snapshot");
        let epoch_snapshot = epoch_snapshot(gateway, epoch).await?;

        let holders =
            discover_holders(gateway, self.options.start_block, self.options.log_chunk_size).await?;
        tracing::info!(
            holders = holders.len(),
            concurrency = self.options.holder_concurrency.get(),
            "reading holder snapshots"
        );

        let ledger = match self.options.holder_concurrency.get() {
            1 => self.accumulate_sequential(&holders).await?,
            limit => self.accumulate_pooled(&holders, limit).await?,
        };
        let (users, by_status) = ledger.into_parts();
        tracing::info!(
            total_frozen = %by_status.frozen,
            total_fluid = %by_status.fluid,
            "aggregation complete"
        );

        Ok(RunResult {
            totals,
            epoch,
            epoch_time,
            epoch_snapshot,
            users,
            total_frozen: by_status.frozen,
            total_fluid: by_status.fluid,
        })
    }

    async fn dao_totals(&self) -> Result<DaoTotals, ReportError> {
        let gateway = self.gateway.as_ref();
        let (supply, total_bonded, total_staged, total_debt, total_redeemable) = tokio::try_join!(
            gateway.total_supply(),
            gateway.total_bonded(),
            gateway.total_staged(),
            gateway.total_debt(),
            gateway.total_redeemable(),
        )?;

        Ok(DaoTotals {
            supply,
            total_bonded,
            total_staged,
            total_debt,
            total_redeemable,
        })
    }

    async fn accumulate_sequential(
        &self,
        holders: &IndexSet<Address>,
    ) -> Result<HolderLedger, ReportError> {
        let mut ledger = HolderLedger::with_capacity(holders.len());
        for (index, &holder) in holders.iter().enumerate() {
            let snapshot = user_snapshot(self.gateway.as_ref(), holder).await?;
            tracing::debug!(index, %holder, status = %snapshot.status, bonded = %snapshot.bonded, "holder");
            ledger.record(holder, snapshot)?;
        }
        Ok(ledger)
    }

    /// Fetch up to `limit` holders at once, then record them in discovery
    /// order so the ledger matches the sequential path exactly.
    ///
    /// A task is only spawned once it holds a permit, so at most `limit`
    /// holder tasks exist at any time.
    async fn accumulate_pooled(
        &self,
        holders: &IndexSet<Address>,
        limit: usize,
    ) -> Result<HolderLedger, ReportError> {
        let permits = Arc::new(Semaphore::new(limit));
        let mut tasks = JoinSet::new();
        let mut slots: Vec<Option<UserSnapshot>> = vec![None; holders.len()];

        // Returning early drops `tasks`, which aborts every holder still in flight.
        for (index, &holder) in holders.iter().enumerate() {
            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|err| ReportError::HolderPool(err.to_string()))?;
            while let Some(joined) = tasks.try_join_next() {
                settle(joined, &mut slots)?;
            }

            let gateway = Arc::clone(&self.gateway);
            tasks.spawn(async move {
                let _permit = permit;
                let snapshot = user_snapshot(gateway.as_ref(), holder).await?;
                Ok::<_, ReportError>((index, snapshot))
            });
        }
        while let Some(joined) = tasks.join_next().await {
            settle(joined, &mut slots)?;
        }

        let mut ledger = HolderLedger::with_capacity(holders.len());
        for (&holder, slot) in holders.iter().zip(slots) {
            let snapshot = slot.ok_or_else(|| {
                ReportError::HolderPool(format!("no snapshot was produced for {holder}"))
            })?;
            tracing::debug!(%holder, status = %snapshot.status, bonded = %snapshot.bonded, "holder");
            ledger.record(holder, snapshot)?;
        }
        Ok(ledger)
    }
}

type HolderTaskResult = Result<Result<(usize, UserSnapshot), ReportError>, JoinError>;

fn settle(joined: HolderTaskResult, slots: &mut [Option<UserSnapshot>]) -> Result<(), ReportError> {
    let (index, snapshot) = joined.map_err(|err| ReportError::HolderPool(err.to_string()))??;
    slots[index] = Some(snapshot);
    Ok(())
}
