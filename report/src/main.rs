use clap::Parser;
use esd_dao_report::{
    config::{self, Overrides, ReportSettings},
    OutputFormat, ReportError,
};
use tracing_subscriber::EnvFilter;

/// Print ESD DAO totals, the current epoch's coupons and every depositor's
/// bonded balance.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Known deployment to report on
    #[arg(long, default_value = config::DEFAULT_NETWORK)]
    network: String,

    /// JSON-RPC endpoint; falls back to the URL environment variable
    #[arg(long)]
    rpc_url: Option<String>,

    /// DAO contract address, overriding the deployment's
    #[arg(long)]
    dao: Option<String>,

    /// First block to scan for Deposit events, overriding the deployment block
    #[arg(long)]
    from_block: Option<u64>,

    /// Holder snapshots fetched at once (1 = one after another)
    #[arg(long, default_value_t = config::DEFAULT_HOLDER_CONCURRENCY)]
    holder_concurrency: usize,

    /// Split the Deposit log scan into windows of this many blocks
    #[arg(long)]
    log_chunk_size: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Args::parse()).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ReportError> {
    let deployment = config::require_known_deployment(&args.network)?;
    let settings = ReportSettings::resolve(
        deployment,
        Overrides {
            rpc_url: args.rpc_url,
            dao_address: args.dao,
            from_block: args.from_block,
            holder_concurrency: Some(args.holder_concurrency),
            log_chunk_size: args.log_chunk_size,
        },
        std::env::var_os(config::RPC_URL_ENV_VAR),
    )?;

    let output = esd_dao_report::report_cli_output(&settings, args.format).await?;
    print!("{output}");
    Ok(())
}
