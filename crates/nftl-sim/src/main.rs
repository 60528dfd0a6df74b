//! NFTL scenario runner
//!
//! Provisions a simnet and walks one loan through its whole lifecycle,
//! printing each loan record as JSON.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nftl_common::{LoanId, VERSION};
use nftl_ledger::{LedgerConfig, Simnet};

/// Collateral token used by the scenario
const SCENARIO_NFT_ID: u64 = 101;

/// Loan term in blocks
const SCENARIO_DURATION: u64 = 30;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting NFTL simulator v{}", VERSION);

    let config = LedgerConfig::load().context("failed to load ledger configuration")?;
    info!("Loaded configuration: {:?}", config);

    let simnet = Simnet::from_config(config);
    let borrower = simnet
        .account("wallet_1")
        .context("simnet needs at least one wallet (NFTL_WALLETS >= 1)")?;
    let mut registry = simnet.registry();

    let loan_id = registry.create_loan(
        borrower,
        SCENARIO_NFT_ID,
        Decimal::from(1000),
        SCENARIO_DURATION,
    )?;
    info!(loan_id, height = simnet.block_height(), "Opened scenario loan");
    print_loan(&registry, loan_id)?;

    simnet.mine_empty_blocks(SCENARIO_DURATION / 2);

    if let Some(stranger) = simnet.account("wallet_2") {
        match registry.repay_loan(stranger, loan_id) {
            Ok(total) => warn!(%total, "Stranger repayment unexpectedly accepted"),
            Err(err) => info!(error = %err, "Stranger repayment rejected"),
        }
    }

    let total = registry.repay_loan(borrower, loan_id)?;
    info!(%total, height = simnet.block_height(), "Borrower repaid");
    print_loan(&registry, loan_id)?;

    let missing = registry.last_loan_id() + 1;
    if registry.get_loan(missing).is_none() {
        info!(loan_id = missing, "No loan recorded");
    }

    info!("Scenario complete");
    Ok(())
}

fn print_loan<H: nftl_ledger::BlockHeightSource>(
    registry: &nftl_ledger::LoanRegistry<H>,
    loan_id: LoanId,
) -> Result<()> {
    let loan = registry
        .get_loan(loan_id)
        .with_context(|| format!("loan {loan_id} disappeared"))?;
    println!("{}", serde_json::to_string_pretty(loan)?);
    Ok(())
}
