use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

use crate::shared::errors::ConfigError;
use crate::shared::types::Cluster;
use crate::transaction::compute_budget::BudgetConfig;

pub const KEYPAIR_PATH_VAR: &str = "LOCAL_PAYER_JSON_ABSPATH";
pub const RPC_URL_VAR: &str = "RPC_URL";
pub const CONFIG_PATH_VAR: &str = "FEE_LAB_CONFIG";
pub const UNIT_PRICE_VAR: &str = "FEE_LAB_COMPUTE_UNIT_PRICE";
pub const UNIT_LIMIT_VAR: &str = "FEE_LAB_COMPUTE_UNIT_LIMIT";
pub const CLUSTER_VAR: &str = "FEE_LAB_CLUSTER";

/// Recipient used by the transfer walkthroughs
pub const DEFAULT_RECIPIENT: &str = "CSg4fcG4WqaVgTE33gzquXYGKAuZpikNWKQ4P4y71kke";

/// 0.001 SOL
pub const DEFAULT_TRANSFER_LAMPORTS: u64 = 1_000_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcCfg {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletCfg {
    pub keypair: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorerCfg {
    #[serde(default)]
    pub cluster: Cluster,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransferCfg {
    pub recipient: String,
    pub lamports: u64,
}

impl Default for TransferCfg {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT.to_string(),
            lamports: DEFAULT_TRANSFER_LAMPORTS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc: RpcCfg,
    pub wallet: WalletCfg,
    pub budget: BudgetConfig,
    pub explorer: ExplorerCfg,
    pub transfer: TransferCfg,
}

impl Config {
    /// Load `.env`, then build from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("no .env file loaded: {}", e);
        }
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Priority: variables > config file > defaults. The key path is required.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(keypair) = lookup(KEYPAIR_PATH_VAR).filter(|v| !v.is_empty()) {
            cfg.wallet.keypair = Some(PathBuf::from(keypair));
        }
        if let Some(url) = lookup(RPC_URL_VAR).filter(|v| !v.is_empty()) {
            cfg.rpc.url = Some(url);
        }
        if let Some(price) = lookup(UNIT_PRICE_VAR) {
            cfg.budget.unit_price = parse_number(UNIT_PRICE_VAR, &price)?;
        }
        if let Some(limit) = lookup(UNIT_LIMIT_VAR) {
            cfg.budget.unit_limit = parse_number(UNIT_LIMIT_VAR, &limit)?;
        }
        if let Some(cluster) = lookup(CLUSTER_VAR) {
            cfg.explorer.cluster = cluster.parse()?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.keypair_path()?;
        self.recipient()?;
        Ok(())
    }

    pub fn keypair_path(&self) -> Result<&Path, ConfigError> {
        self.wallet
            .keypair
            .as_deref()
            .ok_or(ConfigError::MissingVar(KEYPAIR_PATH_VAR))
    }

    /// Configured endpoint, or the public endpoint of the configured cluster
    pub fn rpc_url(&self) -> String {
        self.rpc
            .url
            .clone()
            .unwrap_or_else(|| self.explorer.cluster.rpc_url().to_string())
    }

    pub fn cluster(&self) -> Cluster {
        self.explorer.cluster
    }

    pub fn recipient(&self) -> Result<Pubkey, ConfigError> {
        Pubkey::from_str(&self.transfer.recipient).map_err(|e| ConfigError::InvalidPubkey {
            value: self.transfer.recipient.clone(),
            reason: e.to_string(),
        })
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}
