//! Epoch and user snapshot builders.
//!
//! Every read inside one snapshot is independent, so they are joined with
//! `try_join!`: the first failing read ends the build and the remaining
//! in-flight reads are dropped.

use esd_dao_core::{Address, EpochId, EpochSnapshot, UserSnapshot, UserStatus};

use crate::{error::ReportError, gateway::DaoGateway};

pub async fn epoch_snapshot<G>(gateway: &G, epoch: EpochId) -> Result<EpochSnapshot, ReportError>
where
    G: DaoGateway + ?Sized,
{
    let (outstanding_coupons, coupons_expiration, expiring_coupons, total_bonded) = tokio::try_join!(
        gateway.outstanding_coupons(epoch),
        gateway.coupons_expiration(epoch),
        gateway.expiring_coupons(epoch),
        gateway.total_bonded_at(epoch),
    )?;

    Ok(EpochSnapshot {
        outstanding_coupons,
        coupons_expiration,
        expiring_coupons,
        total_bonded,
    })
}

pub async fn user_snapshot<G>(gateway: &G, account: Address) -> Result<UserSnapshot, ReportError>
where
    G: DaoGateway + ?Sized,
{
    let (staged, bonded, status_code, fluid_until, locked_until) = tokio::try_join!(
        gateway.balance_of_staged(account),
        gateway.balance_of_bonded(account),
        gateway.status_of(account),
        gateway.fluid_until(account),
        gateway.locked_until(account),
    )?;

    let status = UserStatus::try_from(status_code).map_err(|source| ReportError::Decode {
        address: account,
        source,
    })?;

    Ok(UserSnapshot {
        staged,
        bonded,
        status,
        fluid_until,
        locked_until,
    })
}
