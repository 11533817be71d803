use anyhow::Result;
use fee_lab::transaction::instructions::build_simple_transfer_instruction;
use fee_lab::{infrastructure::SubmitOptions, report::TransactionReport, AppContext, BudgetOverrides};
use tracing::info;

/// 1 lamport per compute unit
const UNIT_PRICE: u64 = 1_000_000;

/// A plain transfer consumes roughly 450 CUs; keep some margin
const TIGHT_UNIT_LIMIT: u32 = 500;

#[tokio::main]
async fn main() -> Result<()> {
    fee_lab::init_tracing();
    let ctx = AppContext::bootstrap()?;
    let recipient = ctx.config.recipient()?;

    let transfer_ix =
        build_simple_transfer_instruction(&ctx.payer_pubkey(), &recipient, ctx.config.transfer.lamports);

    // Default limit: fee = price * limit + 5_000 per signature
    let mut prioritized = ctx
        .build_with_budget(
            std::slice::from_ref(&transfer_ix),
            BudgetOverrides::default().with_unit_price(UNIT_PRICE),
        )
        .await?;
    prioritized.sign(&[&ctx.payer])?;
    let signature = ctx.submit(&prioritized, SubmitOptions::default()).await?;
    let report = TransactionReport::new("priority fee, default limit", &prioritized)?
        .with_transaction_signature(signature.to_string(), ctx.tx_url(&signature));
    info!("{}", report.to_json()?);

    // Priority fees are charged on the requested limit, not on consumption.
    // A limit close to actual usage is much cheaper: (500 * 1) + 5_000 = 5_500 lamports
    let mut tight = ctx
        .build_with_budget(
            &[transfer_ix],
            BudgetOverrides::default()
                .with_unit_price(UNIT_PRICE)
                .with_unit_limit(TIGHT_UNIT_LIMIT),
        )
        .await?;
    tight.sign(&[&ctx.payer])?;
    let signature = ctx.submit(&tight, SubmitOptions::default()).await?;
    let report = TransactionReport::new("priority fee, tight limit", &tight)?
        .with_transaction_signature(signature.to_string(), ctx.tx_url(&signature));
    info!("{}", report.to_json()?);

    Ok(())
}
