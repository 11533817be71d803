use anyhow::Result;
use fee_lab::{infrastructure::SubmitOptions, report::TransactionReport, AppContext};
use fee_lab::transaction::instructions::build_simple_transfer_instruction;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    fee_lab::init_tracing();
    let ctx = AppContext::bootstrap()?;
    let recipient = ctx.config.recipient()?;
    let lamports = ctx.config.transfer.lamports;

    let transfer_ix = build_simple_transfer_instruction(&ctx.payer_pubkey(), &recipient, lamports);

    let mut envelope = ctx.build(&[transfer_ix]).await?;
    // only the payer signs, so the fee is 5_000 lamports
    envelope.sign(&[&ctx.payer])?;

    let signature = ctx.submit(&envelope, SubmitOptions::default()).await?;
    let report = TransactionReport::new("transfer", &envelope)?
        .with_transaction_signature(signature.to_string(), ctx.tx_url(&signature));
    info!("Transaction completed:\n{}", report.to_json()?);

    Ok(())
}
