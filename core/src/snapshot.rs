use crate::{Amount, EpochId, UserStatus};

/// Coupon and bonding figures for a single epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochSnapshot {
    pub outstanding_coupons: Amount,
    pub coupons_expiration: EpochId,
    pub expiring_coupons: Amount,
    pub total_bonded: Amount,
}

/// Balances and lock state of one depositor at the time of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSnapshot {
    pub staged: Amount,
    pub bonded: Amount,
    pub status: UserStatus,
    pub fluid_until: EpochId,
    pub locked_until: EpochId,
}
