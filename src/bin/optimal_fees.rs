use anyhow::Result;
use fee_lab::infrastructure::SubmitOptions;
use fee_lab::transaction::{
    compute_budget::{create_compute_unit_limit_instruction, create_priority_fee_instruction},
    instructions::build_simple_transfer_instruction,
    PrioritizationFeeStats,
};
use fee_lab::{report::TransactionReport, AppContext};
use solana_sdk::system_program;
use tracing::{info, warn};

/// 1 lamport per compute unit
const UNIT_PRICE: u64 = 1_000_000;

#[tokio::main]
async fn main() -> Result<()> {
    fee_lab::init_tracing();
    let ctx = AppContext::bootstrap()?;
    let payer = ctx.payer_pubkey();
    let recipient = ctx.config.recipient()?;

    let transfer_ix = build_simple_transfer_instruction(&payer, &recipient, ctx.config.transfer.lamports);

    // Priority fees are charged on the requested limit, so estimate what the
    // transaction really needs. The estimate already covers the limit directive.
    let transfer_units = ctx
        .rpc
        .estimate_compute_units(std::slice::from_ref(&transfer_ix), &payer)
        .await?;
    info!("Expected CUs to be consumed by transfer: {} CUs", transfer_units);

    let mut instructions = vec![create_priority_fee_instruction(UNIT_PRICE), transfer_ix];
    let total_units = ctx.rpc.estimate_compute_units(&instructions, &payer).await?;
    info!("Total expected CUs to be consumed by tx: {} CUs", total_units);

    instructions.insert(0, create_compute_unit_limit_instruction(total_units));

    let mut envelope = ctx.build(&instructions).await?;
    envelope.sign(&[&ctx.payer])?;

    info!(
        "Sending transaction with ComputeUnitLimit {} and PricePerComputeUnit {}",
        total_units, UNIT_PRICE
    );
    let signature = ctx.submit(&envelope, SubmitOptions::default()).await?;
    let report = TransactionReport::new("optimal compute unit limit", &envelope)?
        .with_transaction_signature(signature.to_string(), ctx.tx_url(&signature));
    info!("{}", report.to_json()?);

    // Recent prioritization fees for the accounts this transfer writes to
    let samples = ctx
        .rpc
        .recent_prioritization_fees(&[payer, recipient, system_program::id()])
        .await?;
    match PrioritizationFeeStats::from_samples(&samples) {
        Some(stats) => info!(
            "Recent prioritization fees over {} slots: min {}, median {}, p75 {}, max {} (recommended {} micro-lamports/CU)",
            stats.samples, stats.min, stats.median, stats.p75, stats.max, stats.recommended()
        ),
        None => warn!("No recent prioritization fees reported"),
    }

    Ok(())
}
