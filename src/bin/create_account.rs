use anyhow::Result;
use fee_lab::AppContext;
use solana_sdk::signature::Signer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    fee_lab::init_tracing();
    let ctx = AppContext::bootstrap()?;

    // airdrop if the account holds 1 SOL or less
    ctx.ensure_funded().await?;

    // expected fee is 10_000 lamports: payer and new account both sign
    let (keypair, signature) = ctx.create_random_account().await?;
    info!("Created account {}", keypair.pubkey());
    info!("New account created {}", ctx.tx_url(&signature));

    Ok(())
}
