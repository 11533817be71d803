use anyhow::Result;
use fee_lab::infrastructure::{SimulateOptions, SubmitOptions};
use fee_lab::transaction::instructions::build_simple_transfer_instruction;
use fee_lab::{report::TransactionReport, AppContext, BudgetOverrides};
use solana_sdk::signature::{Keypair, Signer};
use tracing::{error, info};

/// Far below what a transfer needs, so execution runs out of compute
const STARVED_UNIT_LIMIT: u32 = 200;

#[tokio::main]
async fn main() -> Result<()> {
    fee_lab::init_tracing();
    let ctx = AppContext::bootstrap()?;
    let recipient = ctx.config.recipient()?;

    let transfer_ix =
        build_simple_transfer_instruction(&ctx.payer_pubkey(), &recipient, ctx.config.transfer.lamports);

    // Simulation does not need signatures; the result includes the CUs consumed
    let mut envelope = ctx.build(std::slice::from_ref(&transfer_ix)).await?;
    let unsigned = ctx.simulate(&envelope, SimulateOptions::default()).await?;
    let report = TransactionReport::new("simulation without signature", &envelope)?
        .with_simulation(unsigned);
    info!("{}", report.to_json()?);

    // Sign with an unrelated key so signature verification fails
    let impostor = Keypair::new();
    let bogus = impostor.sign_message(&envelope.message_data());
    envelope.attach_signature(&ctx.payer_pubkey(), bogus)?;

    match ctx
        .simulate(&envelope, SimulateOptions { sig_verify: true, ..SimulateOptions::default() })
        .await
    {
        Ok(outcome) => info!("Simulation with incorrect signature: {:?}", outcome),
        Err(e) => error!("Simulation failed: {}", e),
    }

    // Preflight verifies signatures, checks the blockhash is within the last
    // 150 blocks and simulates before the node accepts the transaction
    if let Err(e) = ctx.submit(&envelope, SubmitOptions::default()).await {
        error!("Transaction failed during preflight: {}", e);
    }

    // Preflight also catches a compute budget that is too small
    let mut starved = ctx
        .build_with_budget(
            &[transfer_ix],
            BudgetOverrides::default()
                .with_unit_price(1_000_000)
                .with_unit_limit(STARVED_UNIT_LIMIT),
        )
        .await?;
    starved.sign(&[&ctx.payer])?;

    if let Err(e) = ctx.submit(&starved, SubmitOptions::default()).await {
        error!("Transaction failed during preflight: {}", e);
    }

    // Without preflight the node accepts it; execution fails on chain and the fee is still charged
    let signature = ctx.submit(&starved, SubmitOptions::skip_preflight()).await?;
    info!("Transaction submitted: {}", ctx.tx_url(&signature));

    Ok(())
}
