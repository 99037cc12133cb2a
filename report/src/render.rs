use esd_dao_core::{format_amount, Address, UserSnapshot};

use crate::{driver::RunResult, error::ReportError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(result: &RunResult, format: OutputFormat) -> Result<String, ReportError> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
    }
}

/// Console report. Global totals are shown in whole tokens; per-epoch and
/// per-holder figures stay in raw 18-decimal units.
pub fn render_text(result: &RunResult) -> String {
    let totals = &result.totals;
    let epoch = &result.epoch_snapshot;

    let mut lines = vec![
        format!("Supply {}", format_amount(totals.supply)),
        format!("Total bonded {}", format_amount(totals.total_bonded)),
        format!("Total staged {}", format_amount(totals.total_staged)),
        format!("Total debt {}", format_amount(totals.total_debt)),
        format!("Total redeemable {}", format_amount(totals.total_redeemable)),
        format!("Current epoch: {}", result.epoch),
        format!("Epoch Time: {}", result.epoch_time),
        format!(
            "Epoch data: outstandingCoupons={} couponsExpiration={} expiringCoupons={} totalBonded={}",
            epoch.outstanding_coupons,
            epoch.coupons_expiration,
            epoch.expiring_coupons,
            epoch.total_bonded
        ),
        format!("User data ({} holders)", result.users.len()),
    ];
    lines.extend(
        result
            .users
            .iter()
            .map(|(address, user)| render_user_line(address, user)),
    );
    lines.push(format!("Total Frozen: {}", result.total_frozen));
    lines.push(format!("Total Fluid: {}", result.total_fluid));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_user_line(address: &Address, user: &UserSnapshot) -> String {
    format!(
        "  {address} staged={} bonded={} status={} fluidUntil={} lockedUntil={}",
        user.staged, user.bonded, user.status, user.fluid_until, user.locked_until
    )
}

pub fn render_json(result: &RunResult) -> Result<String, ReportError> {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JsonTotals {
        supply: String,
        total_bonded: String,
        total_staged: String,
        total_debt: String,
        total_redeemable: String,
    }

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JsonEpoch {
        outstanding_coupons: String,
        coupons_expiration: String,
        expiring_coupons: String,
        total_bonded: String,
    }

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JsonUser {
        address: String,
        staged: String,
        bonded: String,
        status: &'static str,
        fluid_until: String,
        locked_until: String,
    }

    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct JsonReport {
        totals: JsonTotals,
        epoch: String,
        epoch_time: String,
        epoch_data: JsonEpoch,
        users: Vec<JsonUser>,
        total_frozen: String,
        total_fluid: String,
    }

    let totals = &result.totals;
    let epoch = &result.epoch_snapshot;
    let report = JsonReport {
        totals: JsonTotals {
            supply: totals.supply.to_string(),
            total_bonded: totals.total_bonded.to_string(),
            total_staged: totals.total_staged.to_string(),
            total_debt: totals.total_debt.to_string(),
            total_redeemable: totals.total_redeemable.to_string(),
        },
        epoch: result.epoch.to_string(),
        epoch_time: result.epoch_time.to_string(),
        epoch_data: JsonEpoch {
            outstanding_coupons: epoch.outstanding_coupons.to_string(),
            coupons_expiration: epoch.coupons_expiration.to_string(),
            expiring_coupons: epoch.expiring_coupons.to_string(),
            total_bonded: epoch.total_bonded.to_string(),
        },
        users: result
            .users
            .iter()
            .map(|(address, user)| JsonUser {
                address: address.to_string(),
                staged: user.staged.to_string(),
                bonded: user.bonded.to_string(),
                status: user.status.as_str(),
                fluid_until: user.fluid_until.to_string(),
                locked_until: user.locked_until.to_string(),
            })
            .collect(),
        total_frozen: result.total_frozen.to_string(),
        total_fluid: result.total_fluid.to_string(),
    };

    serde_json::to_string_pretty(&report).map_err(|err| ReportError::Render(err.to_string()))
}
