use std::fmt;

use esd_dao_core::{Address, DecodeError, TotalsError};

/// A read or event query against the DAO that did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{call} failed: {message}")]
pub struct GatewayError {
    pub call: &'static str,
    pub message: String,
}

impl GatewayError {
    pub fn new(call: &'static str, err: impl fmt::Display) -> Self {
        Self {
            call,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("network is not a known ESD DAO deployment: {network}")]
    UnknownNetwork { network: String },
    #[error("no RPC endpoint configured: pass --rpc-url or set {variable}")]
    MissingRpcUrl { variable: &'static str },
    #[error("invalid RPC URL {url}: {message}")]
    InvalidRpcUrl { url: String, message: String },
    #[error("invalid DAO address {value}: {message}")]
    InvalidDaoAddress { value: String, message: String },
    #[error("holder concurrency must be at least 1")]
    ZeroHolderConcurrency,
    #[error("log chunk size must be at least 1 block")]
    ZeroLogChunkSize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("holder {address}: {source}")]
    Decode {
        address: Address,
        #[source]
        source: DecodeError,
    },
    #[error(transparent)]
    Totals(#[from] TotalsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("holder pool failed: {0}")]
    HolderPool(String),
    #[error("could not render report: {0}")]
    Render(String),
}
