//! Common types used across the application

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::ConfigError;

/// Solana cluster the scripts talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
}

impl Cluster {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::MainnetBeta => "mainnet-beta",
        }
    }

    /// Public RPC endpoint for the cluster
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "devnet" => Ok(Cluster::Devnet),
            "testnet" => Ok(Cluster::Testnet),
            // explorer accepts both spellings
            "mainnet" | "mainnet-beta" => Ok(Cluster::MainnetBeta),
            other => Err(ConfigError::InvalidValue {
                name: "cluster",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_parsing() {
        assert_eq!("devnet".parse::<Cluster>().unwrap(), Cluster::Devnet);
        assert_eq!("mainnet".parse::<Cluster>().unwrap(), Cluster::MainnetBeta);
        assert_eq!("mainnet-beta".parse::<Cluster>().unwrap(), Cluster::MainnetBeta);
        assert!("localnet".parse::<Cluster>().is_err());
    }

    #[test]
    fn test_cluster_defaults_to_devnet() {
        assert_eq!(Cluster::default(), Cluster::Devnet);
        assert_eq!(Cluster::default().rpc_url(), "https://api.devnet.solana.com");
    }
}
