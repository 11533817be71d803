//! Solana RPC client wrapper: blockhashes, simulation, submission and fee queries

use async_trait::async_trait;
use serde::Serialize;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcSendTransactionConfig, RpcSimulateTransactionConfig},
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::Signature,
};
use solana_transaction_status::UiTransactionEncoding;
use tracing::{debug, info, warn};

use crate::shared::errors::{AppError, AppResult};
use crate::transaction::compute_budget::create_compute_unit_limit_instruction;
use crate::transaction::envelope::Envelope;
use crate::transaction::fees::MAX_COMPUTE_UNIT_LIMIT;
use crate::transaction::transaction_builder::{build_envelope, FreshnessOracle};

/// Options for `submit`. Preflight runs unless skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    pub skip_preflight: bool,
    pub preflight_commitment: Option<CommitmentLevel>,
}

impl SubmitOptions {
    pub fn skip_preflight() -> Self {
        Self {
            skip_preflight: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulateOptions {
    pub sig_verify: bool,
    pub replace_recent_blockhash: bool,
}

/// Outcome of a simulation. A would-be failure is reported in `error`, not as `Err`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationOutcome {
    pub units_consumed: Option<u64>,
    pub logs: Vec<String>,
    pub error: Option<String>,
}

impl SimulationOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Solana RPC client wrapper
pub struct SolanaRpcClient {
    client: RpcClient,
}

impl SolanaRpcClient {
    /// Create new RPC client at `confirmed` commitment
    pub fn new(rpc_url: String) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()),
        }
    }

    #[cfg(test)]
    fn from_client(client: RpcClient) -> Self {
        Self { client }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Get latest blockhash
    pub async fn latest_blockhash(&self) -> AppResult<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| AppError::Rpc(format!("Failed to get latest blockhash: {}", e)))
    }

    /// Get balance in lamports
    pub async fn balance(&self, address: &Pubkey) -> AppResult<u64> {
        self.client
            .get_balance(address)
            .await
            .map_err(|e| AppError::Rpc(format!("Failed to get balance: {}", e)))
    }

    pub async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> AppResult<Signature> {
        self.client
            .request_airdrop(address, lamports)
            .await
            .map_err(|e| AppError::Rpc(format!("Airdrop request failed: {}", e)))
    }

    /// Rent for `space` bytes of account data
    pub async fn minimum_balance_for_rent_exemption(&self, space: usize) -> AppResult<u64> {
        self.client
            .get_minimum_balance_for_rent_exemption(space)
            .await
            .map_err(|e| AppError::Rpc(format!("Failed to get rent exemption minimum: {}", e)))
    }

    /// Recent per-slot prioritization fees (micro-lamports/CU) for txs touching `accounts`
    pub async fn recent_prioritization_fees(&self, accounts: &[Pubkey]) -> AppResult<Vec<u64>> {
        let fees = self
            .client
            .get_recent_prioritization_fees(accounts)
            .await
            .map_err(|e| AppError::Rpc(format!("Failed to get recent prioritization fees: {}", e)))?;
        debug!("received {} prioritization fee samples", fees.len());
        Ok(fees.into_iter().map(|fee| fee.prioritization_fee).collect())
    }

    /// Simulate without committing. Signatures are only checked with `sig_verify`.
    pub async fn simulate(
        &self,
        envelope: &Envelope,
        options: SimulateOptions,
    ) -> AppResult<SimulationOutcome> {
        let config = RpcSimulateTransactionConfig {
            sig_verify: options.sig_verify,
            replace_recent_blockhash: options.replace_recent_blockhash,
            encoding: Some(UiTransactionEncoding::Base64),
            ..RpcSimulateTransactionConfig::default()
        };

        let response = self
            .client
            .simulate_transaction_with_config(envelope.transaction(), config)
            .await
            .map_err(|e| AppError::Rpc(format!("Simulation request failed: {}", e)))?;

        let result = response.value;
        let outcome = SimulationOutcome {
            units_consumed: result.units_consumed,
            logs: result.logs.unwrap_or_default(),
            error: result.err.map(|err| err.to_string()),
        };

        match &outcome.error {
            None => info!("🧪 Simulation succeeded: {:?} CUs consumed", outcome.units_consumed),
            Some(err) => warn!("🧪 Simulation reported failure: {}", err),
        }
        Ok(outcome)
    }

    /// Units `instructions` consume when paid by `payer`.
    ///
    /// Simulates with the maximum limit so the estimate is not capped. The result
    /// includes the cost of a SetComputeUnitLimit directive.
    pub async fn estimate_compute_units(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
    ) -> AppResult<u32> {
        let mut with_limit = vec![create_compute_unit_limit_instruction(MAX_COMPUTE_UNIT_LIMIT)];
        with_limit.extend_from_slice(instructions);

        // the node swaps in a current blockhash
        let envelope = build_envelope(&with_limit, payer, Hash::default())?;
        let outcome = self
            .simulate(
                &envelope,
                SimulateOptions {
                    sig_verify: false,
                    replace_recent_blockhash: true,
                },
            )
            .await?;

        if let Some(err) = outcome.error {
            return Err(AppError::Simulation(err));
        }
        let units = outcome
            .units_consumed
            .ok_or_else(|| AppError::Simulation("node returned no unit count".to_string()))?;
        u32::try_from(units)
            .map_err(|_| AppError::Simulation(format!("unit count out of range: {}", units)))
    }

    /// Send a signed envelope. Rejections are returned verbatim and never retried.
    pub async fn submit(&self, envelope: &Envelope, options: SubmitOptions) -> AppResult<Signature> {
        let config = RpcSendTransactionConfig {
            skip_preflight: options.skip_preflight,
            preflight_commitment: options.preflight_commitment,
            encoding: Some(UiTransactionEncoding::Base64),
            ..RpcSendTransactionConfig::default()
        };

        match self
            .client
            .send_transaction_with_config(envelope.transaction(), config)
            .await
        {
            Ok(signature) => {
                info!("🚀 Transaction sent: {}", signature);
                Ok(signature)
            }
            Err(err) => {
                log_preflight_logs(&err);
                Err(AppError::RemoteRejection(err.to_string()))
            }
        }
    }
}

#[async_trait]
impl FreshnessOracle for SolanaRpcClient {
    async fn latest_blockhash(&self) -> AppResult<Hash> {
        SolanaRpcClient::latest_blockhash(self).await
    }
}

fn log_preflight_logs(err: &ClientError) {
    if let ClientErrorKind::RpcError(RpcError::RpcResponseError {
        data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
        ..
    }) = &err.kind
    {
        for line in result.logs.iter().flatten() {
            warn!("preflight: {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use solana_client::rpc_request::RpcRequest;
    use solana_sdk::signature::{Keypair, Signer};
    use std::collections::HashMap;

    #[test]
    fn test_submit_options() {
        let default = SubmitOptions::default();
        assert!(!default.skip_preflight);
        assert!(default.preflight_commitment.is_none());
        assert!(SubmitOptions::skip_preflight().skip_preflight);
    }

    #[test]
    fn test_simulation_outcome_failure_is_data() {
        let outcome = SimulationOutcome {
            units_consumed: Some(200),
            logs: vec![],
            error: Some("Error processing Instruction 2: Computational budget exceeded".to_string()),
        };
        assert!(!outcome.succeeded());
        assert!(SimulationOutcome::default().succeeded());
    }

    fn transfer(payer: &Pubkey) -> Vec<Instruction> {
        vec![crate::transaction::instructions::build_simple_transfer_instruction(
            payer,
            &Pubkey::new_unique(),
            1_000,
        )]
    }

    #[tokio::test]
    async fn test_estimate_without_unit_count_is_simulation_error() {
        let client = SolanaRpcClient::from_client(RpcClient::new_mock("succeeds".to_string()));
        let payer = Pubkey::new_unique();

        let err = client.estimate_compute_units(&transfer(&payer), &payer).await.unwrap_err();
        assert!(matches!(err, AppError::Simulation(_)));
    }

    #[tokio::test]
    async fn test_estimate_with_simulated_failure_is_simulation_error() {
        let mut mocks = HashMap::new();
        mocks.insert(
            RpcRequest::SimulateTransaction,
            json!({
                "context": { "slot": 1 },
                "value": {
                    "err": "AccountNotFound",
                    "logs": [],
                    "accounts": null,
                    "unitsConsumed": 150,
                    "returnData": null
                }
            }),
        );
        let client = SolanaRpcClient::from_client(RpcClient::new_mock_with_mocks(
            "succeeds".to_string(),
            mocks,
        ));
        let payer = Pubkey::new_unique();

        let err = client.estimate_compute_units(&transfer(&payer), &payer).await.unwrap_err();
        assert!(matches!(err, AppError::Simulation(_)));
    }

    #[tokio::test]
    async fn test_rejected_submission_is_remote_rejection() {
        let client = SolanaRpcClient::from_client(RpcClient::new_mock("fails".to_string()));
        let payer = Keypair::new();
        let mut envelope = build_envelope(&transfer(&payer.pubkey()), &payer.pubkey(), Hash::new_unique())
            .unwrap();
        envelope.sign(&[&payer]).unwrap();

        let err = client.submit(&envelope, SubmitOptions::default()).await.unwrap_err();
        assert!(matches!(err, AppError::RemoteRejection(_)));
    }

    #[tokio::test]
    async fn test_unreachable_node_is_rpc_error() {
        let client = SolanaRpcClient::new("http://127.0.0.1:1".to_string());
        let err = client.latest_blockhash().await.unwrap_err();
        assert!(matches!(err, AppError::Rpc(_)));
    }
}
