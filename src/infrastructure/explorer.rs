use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::shared::types::Cluster;

const EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

/// What to link to on the explorer
#[derive(Debug, Clone, Copy)]
pub enum ExplorerTarget<'a> {
    Address(&'a Pubkey),
    Transaction(&'a Signature),
}

pub fn explorer_url(target: ExplorerTarget<'_>, cluster: Cluster) -> String {
    let path = match target {
        ExplorerTarget::Address(address) => format!("address/{}", address),
        ExplorerTarget::Transaction(signature) => format!("tx/{}", signature),
    };
    format!("{}/{}?cluster={}", EXPLORER_BASE_URL, path, cluster)
}

pub fn tx_url(signature: &Signature, cluster: Cluster) -> String {
    explorer_url(ExplorerTarget::Transaction(signature), cluster)
}

pub fn address_url(address: &Pubkey, cluster: Cluster) -> String {
    explorer_url(ExplorerTarget::Address(address), cluster)
}
