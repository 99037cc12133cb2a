#![forbid(unsafe_code)]

pub mod config;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod gateway;
pub mod render;
pub mod rpc;
pub mod snapshot;

#[cfg(test)]
mod mock;

pub use config::{Deployment, Overrides, ReportOptions, ReportSettings};
pub use driver::{DaoTotals, Reporter, RunResult};
pub use error::{ConfigError, GatewayError, ReportError};
pub use gateway::{BlockRange, DaoGateway, DepositEvent};
pub use render::OutputFormat;
pub use rpc::RpcGateway;

/// Connect to the configured node, run the report and render it.
pub async fn report_cli_output(
    settings: &ReportSettings,
    format: OutputFormat,
) -> Result<String, ReportError> {
    let gateway = RpcGateway::connect(settings.rpc_url.clone(), settings.dao_address);
    tracing::info!(
        dao = %gateway.dao_address(),
        from_block = settings.options.start_block,
        "connected"
    );

    let result = Reporter::new(gateway, settings.options).run().await?;
    render::render(&result, format)
}
