use std::num::NonZeroU64;

use esd_dao_core::{unique_holders, Address};
use indexmap::IndexSet;

use crate::{
    error::{GatewayError, ReportError},
    gateway::{BlockRange, DaoGateway, DepositEvent},
};

/// Every address that has ever deposited into the DAO, in first-deposit order.
///
/// With no `chunk_size` the whole history is one log query. A node that
/// refuses oversized results fails the call; nothing is retried.
pub async fn discover_holders<G>(
    gateway: &G,
    start_block: u64,
    chunk_size: Option<NonZeroU64>,
) -> Result<IndexSet<Address>, ReportError>
where
    G: DaoGateway + ?Sized,
{
    let events = match chunk_size {
        None => gateway.deposit_events(BlockRange::since(start_block)).await?,
        Some(size) => deposit_events_chunked(gateway, start_block, size).await?,
    };
    tracing::info!(events = events.len(), from_block = start_block, "fetched Deposit events");

    Ok(unique_holders(events.iter().map(|event| event.account)))
}

async fn deposit_events_chunked<G>(
    gateway: &G,
    start_block: u64,
    chunk_size: NonZeroU64,
) -> Result<Vec<DepositEvent>, GatewayError>
where
    G: DaoGateway + ?Sized,
{
    let latest = gateway.latest_block().await?;
    let mut events = Vec::new();
    let mut from = start_block;

    while from <= latest {
        let to = from.saturating_add(chunk_size.get() - 1).min(latest);
        tracing::debug!(from, to, "querying Deposit window");
        events.extend(gateway.deposit_events(BlockRange::between(from, to)).await?);

        match to.checked_add(1) {
            Some(next) => from = next,
            None => break,
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{holder, MockGateway};

    fn chunk(size: u64) -> Option<NonZeroU64> {
        NonZeroU64::new(size)
    }

    #[tokio::test]
    async fn repeated_depositors_collapse_to_one_entry() {
        let gateway = MockGateway::new()
            .with_deposit(holder(0xa), 10)
            .with_deposit(holder(0xb), 11)
            .with_deposit(holder(0xa), 12);

        let holders = discover_holders(&gateway, 0, None)
            .await
            .expect("discovery must succeed");

        let ordered: Vec<_> = holders.into_iter().collect();
        assert_eq!(ordered, vec![holder(0xa), holder(0xb)]);
        assert_eq!(gateway.recorded_log_queries(), vec![BlockRange::since(0)]);
    }

    #[tokio::test]
    async fn events_before_start_block_are_ignored() {
        let gateway = MockGateway::new()
            .with_deposit(holder(1), 5)
            .with_deposit(holder(2), 50);

        let holders = discover_holders(&gateway, 20, None)
            .await
            .expect("discovery must succeed");

        assert_eq!(holders.len(), 1);
        assert!(holders.contains(&holder(2)));
    }

    #[tokio::test]
    async fn oversized_result_surfaces_without_retry() {
        let mut gateway = MockGateway::new()
            .with_deposit(holder(1), 10)
            .with_deposit(holder(2), 20)
            .with_deposit(holder(3), 30);
        gateway.max_logs_per_query = Some(2);

        let err = discover_holders(&gateway, 0, None)
            .await
            .expect_err("oversized query must fail");

        assert_eq!(
            err,
            ReportError::Gateway(GatewayError::new(
                "queryFilter(Deposit)",
                "query returned more than 2 results"
            ))
        );
        assert_eq!(gateway.recorded_log_queries().len(), 1);
    }

    #[tokio::test]
    async fn chunked_windows_cover_start_to_head_exactly() {
        let mut gateway = MockGateway::new();
        gateway.head = 124;

        discover_holders(&gateway, 100, chunk(10))
            .await
            .expect("discovery must succeed");

        assert_eq!(
            gateway.recorded_log_queries(),
            vec![
                BlockRange::between(100, 109),
                BlockRange::between(110, 119),
                BlockRange::between(120, 124),
            ]
        );
    }

    #[tokio::test]
    async fn chunked_discovery_matches_single_query() {
        let mut gateway = MockGateway::new()
            .with_deposit(holder(3), 101)
            .with_deposit(holder(1), 105)
            .with_deposit(holder(3), 150)
            .with_deposit(holder(2), 199)
            .with_deposit(holder(1), 200);

        let single = discover_holders(&gateway, 100, None)
            .await
            .expect("single query must succeed");

        gateway.max_logs_per_query = Some(2);
        let chunked = discover_holders(&gateway, 100, chunk(25))
            .await
            .expect("chunked query must succeed");

        assert_eq!(single, chunked);
        assert!(single.iter().eq(chunked.iter()));
    }

    #[tokio::test]
    async fn start_past_head_yields_no_holders() {
        let mut gateway = MockGateway::new();
        gateway.head = 50;

        let holders = discover_holders(&gateway, 51, chunk(10))
            .await
            .expect("empty range must succeed");

        assert!(holders.is_empty());
        assert!(gateway.recorded_log_queries().is_empty());
    }

    #[tokio::test]
    async fn failing_window_aborts_discovery() {
        let gateway = MockGateway::new()
            .with_deposit(holder(1), 10)
            .failing("queryFilter(Deposit)");

        let err = discover_holders(&gateway, 0, chunk(4))
            .await
            .expect_err("failing window must abort");
        assert!(matches!(err, ReportError::Gateway(_)));
    }
}
