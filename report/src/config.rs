use std::{
    ffi::OsString,
    num::{NonZeroU64, NonZeroUsize},
};

use alloy::transports::http::reqwest::Url;
use esd_dao_core::Address;

use crate::error::ConfigError;

pub const DEFAULT_NETWORK: &str = "mainnet";

pub const ESD_DAO_ADDRESS: &str = "0x443D2f2755DB5942601fa062Cc248aAA153313D3";
/// Block the DAO was deployed in; no `Deposit` event can predate it.
pub const ESD_DAO_DEPLOY_BLOCK: u64 = 10_722_554;

pub const RPC_URL_ENV_VAR: &str = "URL";
pub const DEFAULT_HOLDER_CONCURRENCY: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub network: &'static str,
    pub dao_address: &'static str,
    pub start_block: u64,
}

pub const DEPLOYMENTS: [Deployment; 1] = [Deployment {
    network: DEFAULT_NETWORK,
    dao_address: ESD_DAO_ADDRESS,
    start_block: ESD_DAO_DEPLOY_BLOCK,
}];

pub fn require_known_deployment(network: &str) -> Result<&'static Deployment, ConfigError> {
    DEPLOYMENTS
        .iter()
        .find(|deployment| deployment.network == network)
        .ok_or_else(|| ConfigError::UnknownNetwork {
            network: network.to_string(),
        })
}

/// Knobs the driver reads once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub start_block: u64,
    /// 1 means holders are snapshotted strictly one after another.
    pub holder_concurrency: NonZeroUsize,
    /// `None` fetches every `Deposit` log in a single query.
    pub log_chunk_size: Option<NonZeroU64>,
}

impl ReportOptions {
    pub fn for_deployment(deployment: &Deployment) -> Self {
        Self {
            start_block: deployment.start_block,
            holder_concurrency: NonZeroUsize::MIN,
            log_chunk_size: None,
        }
    }
}

/// Values supplied on the command line; `None` falls back to the deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub rpc_url: Option<String>,
    pub dao_address: Option<String>,
    pub from_block: Option<u64>,
    pub holder_concurrency: Option<usize>,
    pub log_chunk_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub rpc_url: Url,
    pub dao_address: Address,
    pub options: ReportOptions,
}

impl ReportSettings {
    pub fn resolve(
        deployment: &Deployment,
        overrides: Overrides,
        env_rpc_url: Option<OsString>,
    ) -> Result<Self, ConfigError> {
        let rpc_url = resolve_rpc_url(overrides.rpc_url, env_rpc_url)?;

        let raw_address = overrides
            .dao_address
            .unwrap_or_else(|| deployment.dao_address.to_string());
        let dao_address = raw_address
            .parse::<Address>()
            .map_err(|err| ConfigError::InvalidDaoAddress {
                value: raw_address.clone(),
                message: err.to_string(),
            })?;

        let mut options = ReportOptions::for_deployment(deployment);
        if let Some(from_block) = overrides.from_block {
            options.start_block = from_block;
        }
        if let Some(concurrency) = overrides.holder_concurrency {
            options.holder_concurrency =
                NonZeroUsize::new(concurrency).ok_or(ConfigError::ZeroHolderConcurrency)?;
        }
        if let Some(chunk) = overrides.log_chunk_size {
            options.log_chunk_size =
                Some(NonZeroU64::new(chunk).ok_or(ConfigError::ZeroLogChunkSize)?);
        }

        Ok(Self {
            rpc_url,
            dao_address,
            options,
        })
    }
}

fn resolve_rpc_url(flag: Option<String>, env_value: Option<OsString>) -> Result<Url, ConfigError> {
    let raw = match flag {
        Some(url) => url,
        None => env_value
            .map(|value| value.to_string_lossy().into_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingRpcUrl {
                variable: RPC_URL_ENV_VAR,
            })?,
    };

    raw.parse::<Url>().map_err(|err| ConfigError::InvalidRpcUrl {
        url: raw.clone(),
        message: err.to_string(),
    })
}
