use async_trait::async_trait;
use std::sync::Arc;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
};
use tracing::{debug, info};

use crate::shared::errors::{AppError, AppResult};
use crate::transaction::compute_budget::{
    create_compute_budget_instructions, BudgetConfig, BudgetOverrides, ComputeBudget,
};
use crate::transaction::envelope::Envelope;

/// Source of recent blockhashes. Queried once per envelope, never cached.
#[async_trait]
pub trait FreshnessOracle: Send + Sync {
    async fn latest_blockhash(&self) -> AppResult<Hash>;
}

#[async_trait]
impl<T: FreshnessOracle + ?Sized> FreshnessOracle for Arc<T> {
    async fn latest_blockhash(&self) -> AppResult<Hash> {
        (**self).latest_blockhash().await
    }
}

/// Compile `instructions` into an unsigned v0 envelope paid by `payer`.
///
/// Instruction order is kept exactly as given.
pub fn build_envelope(
    instructions: &[Instruction],
    payer: &Pubkey,
    recent_blockhash: Hash,
) -> AppResult<Envelope> {
    let message = v0::Message::try_compile(payer, instructions, &[], recent_blockhash)
        .map_err(|e| AppError::Assembly(e.to_string()))?;
    Ok(Envelope::new_unsigned(VersionedMessage::V0(message)))
}

/// Same as [`build_envelope`] with the price and limit directives prepended.
/// The budget is encoded as given, even if the limit is too low to execute.
pub fn build_envelope_with_budget(
    instructions: &[Instruction],
    payer: &Pubkey,
    budget: ComputeBudget,
    recent_blockhash: Hash,
) -> AppResult<Envelope> {
    let mut all = create_compute_budget_instructions(budget);
    all.extend_from_slice(instructions);
    build_envelope(&all, payer, recent_blockhash)
}

pub struct TransactionBuilder<O> {
    oracle: O,
    defaults: BudgetConfig,
}

impl<O: FreshnessOracle> TransactionBuilder<O> {
    pub fn new(oracle: O, defaults: BudgetConfig) -> Self {
        Self { oracle, defaults }
    }

    pub fn defaults(&self) -> &BudgetConfig {
        &self.defaults
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Fetch a fresh blockhash and build an envelope without budget directives
    pub async fn build(&self, instructions: &[Instruction], payer: &Pubkey) -> AppResult<Envelope> {
        let recent_blockhash = self.oracle.latest_blockhash().await?;
        debug!(%recent_blockhash, "fetched recent blockhash");

        let envelope = build_envelope(instructions, payer, recent_blockhash)?;
        info!(
            "🔨 Built transaction with {} instructions, {} required signatures",
            instructions.len(),
            envelope.required_signatures()
        );
        Ok(envelope)
    }

    /// Fetch a fresh blockhash and build an envelope with compute budget directives.
    /// Unset overrides fall back to the builder defaults.
    pub async fn build_with_budget(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        overrides: BudgetOverrides,
    ) -> AppResult<Envelope> {
        let budget = self.defaults.resolve(overrides);
        let recent_blockhash = self.oracle.latest_blockhash().await?;
        debug!(%recent_blockhash, "fetched recent blockhash");

        let envelope = build_envelope_with_budget(instructions, payer, budget, recent_blockhash)?;
        info!(
            "🔨 Built prioritized transaction: {} CU limit, {} micro-lamports/CU, {} instructions",
            budget.unit_limit,
            budget.unit_price,
            instructions.len() + 2
        );
        Ok(envelope)
    }
}
