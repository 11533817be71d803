// src/app.rs
use solana_sdk::{
    instruction::Instruction,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::{
    explorer, load_payer, SimulateOptions, SimulationOutcome, SolanaRpcClient, SubmitOptions,
};
use crate::shared::errors::AppResult;
use crate::shared::utils::{format_sol, lamports_to_sol};
use crate::transaction::{
    fees::FeeEstimate, instructions::build_create_account_instruction, BudgetOverrides, Envelope,
    TransactionBuilder,
};

/// Everything a walkthrough needs: config, payer, RPC client and a transaction builder
pub struct AppContext {
    pub config: Config,
    pub payer: Keypair,
    pub rpc: Arc<SolanaRpcClient>,
    pub builder: TransactionBuilder<Arc<SolanaRpcClient>>,
}

impl AppContext {
    /// Load config and payer. Fails before any network call when either is missing.
    pub fn bootstrap() -> AppResult<Self> {
        let config = Config::load()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> AppResult<Self> {
        let payer = load_payer(config.keypair_path()?)?;
        info!("Loaded payer: {}", payer.pubkey());

        let rpc = Arc::new(SolanaRpcClient::new(config.rpc_url()));
        info!("Using RPC endpoint: {}", rpc.url());

        let builder = TransactionBuilder::new(rpc.clone(), config.budget);
        Ok(Self {
            config,
            payer,
            rpc,
            builder,
        })
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn tx_url(&self, signature: &Signature) -> String {
        explorer::tx_url(signature, self.config.cluster())
    }

    /// Build an envelope without budget directives, paid by the loaded payer
    pub async fn build(&self, instructions: &[Instruction]) -> AppResult<Envelope> {
        self.builder.build(instructions, &self.payer.pubkey()).await
    }

    pub async fn build_with_budget(
        &self,
        instructions: &[Instruction],
        overrides: BudgetOverrides,
    ) -> AppResult<Envelope> {
        self.builder
            .build_with_budget(instructions, &self.payer.pubkey(), overrides)
            .await
    }

    /// Submit a signed envelope and log the expected fee with an explorer link
    pub async fn submit(&self, envelope: &Envelope, options: SubmitOptions) -> AppResult<Signature> {
        let fee = FeeEstimate::for_envelope(envelope)?;
        if fee.duplicate_directives {
            warn!("Envelope repeats a compute budget directive, the node will reject it");
        }
        let signature = self.rpc.submit(envelope, options).await?;
        info!(
            "Transaction submitted (expected fee {} lamports): {}",
            fee.total(),
            self.tx_url(&signature)
        );
        Ok(signature)
    }

    pub async fn simulate(
        &self,
        envelope: &Envelope,
        options: SimulateOptions,
    ) -> AppResult<SimulationOutcome> {
        self.rpc.simulate(envelope, options).await
    }

    /// Request a 1 SOL airdrop when the payer holds 1 SOL or less. Returns the balance seen.
    pub async fn ensure_funded(&self) -> AppResult<u64> {
        let balance = self.rpc.balance(&self.payer.pubkey()).await?;
        info!("Current balance of payer (in lamports): {}", balance);
        info!("Current balance of payer (in SOL): {}", format_sol(lamports_to_sol(balance)));

        if balance <= LAMPORTS_PER_SOL {
            info!("Funding {} from airdrop", self.payer.pubkey());
            let signature = self.rpc.request_airdrop(&self.payer.pubkey(), LAMPORTS_PER_SOL).await?;
            info!("Airdrop requested: {}", signature);
        }
        Ok(balance)
    }

    /// Create a fresh zero-space system account funded with the rent minimum.
    /// Two signatures are required: the payer and the new account.
    pub async fn create_random_account(&self) -> AppResult<(Keypair, Signature)> {
        let keypair = Keypair::new();
        let space = 0;

        let rent = self.rpc.minimum_balance_for_rent_exemption(space).await?;
        info!("Minimum balance for rent exemption: {} lamports", rent);

        let create_account_ix =
            build_create_account_instruction(&self.payer.pubkey(), &keypair.pubkey(), rent, space as u64);

        let mut envelope = self.build(&[create_account_ix]).await?;
        envelope.sign(&[&self.payer, &keypair])?;

        let signature = self.submit(&envelope, SubmitOptions::default()).await?;
        info!("New account {} created: {}", keypair.pubkey(), self.tx_url(&signature));
        Ok((keypair, signature))
    }
}
