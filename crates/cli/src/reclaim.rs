use clap::Args;
use reclaim_lib::{
    reclaim::lamports_to_sol, Config, EmptyAccountRecord, FeeBreakdown, KeychainWallet,
    ReclaimError, ReclaimSession, RpcLedger, WalletSigner,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use std::{str::FromStr, sync::Arc};

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Wallet whose token accounts are scanned
    #[arg(long)]
    pub owner: String,
}

#[derive(Debug, Args)]
pub struct CloseArgs {
    /// Owner keypair: JSON keypair file path, `[u8, ...]` array or base58 private key
    #[arg(long, env = "RECLAIM_KEYPAIR", hide_env_values = true)]
    pub keypair: String,

    /// Comma-separated accounts to close (defaults to every empty account found)
    #[arg(long, value_delimiter = ',')]
    pub accounts: Vec<String>,

    /// Share of the reclaimed rent sent to the donation address (0-100)
    #[arg(long)]
    pub donation_percentage: Option<u8>,

    /// Submit the transaction (default is dry-run)
    #[arg(long, default_value_t = false)]
    pub execute: bool,
}

pub async fn handle_scan(
    args: ScanArgs,
    rpc_client: Arc<RpcClient>,
    config: Config,
) -> Result<(), ReclaimError> {
    let owner = parse_pubkey(&args.owner)?;
    let network = config.network.cluster;
    let session = ReclaimSession::new(Arc::new(RpcLedger::new(rpc_client)), owner, config)?;

    println!("Scanning {owner} on {}...", network.display_name());
    let records = session.scan().await?;
    if records.is_empty() {
        println!("No empty token accounts found.");
        return Ok(());
    }

    print_records(&records);
    let total: u64 = records.iter().map(|record| record.reclaimable_lamports).sum();
    println!("\n{} empty accounts, {:.6} SOL reclaimable", records.len(), lamports_to_sol(total));
    Ok(())
}

pub async fn handle_close(
    args: CloseArgs,
    rpc_client: Arc<RpcClient>,
    config: Config,
) -> Result<(), ReclaimError> {
    let network = config.network.cluster;
    let wallet = KeychainWallet::from_private_key(&args.keypair, rpc_client.clone())?;
    let owner = wallet.pubkey();
    let session = ReclaimSession::new(Arc::new(RpcLedger::new(rpc_client)), owner, config)?;

    println!("Scanning {owner} on {}...", network.display_name());
    let records = session.scan().await?;
    if records.is_empty() {
        println!("No empty token accounts found.");
        return Ok(());
    }

    if !args.accounts.is_empty() {
        let selected =
            args.accounts.iter().map(|address| parse_pubkey(address)).collect::<Result<Vec<_>, _>>()?;
        session.set_selection(&selected)?;
    }
    if let Some(percentage) = args.donation_percentage {
        session.set_donation_percentage(percentage)?;
    }

    let selection = session.selection();
    print_records(records.iter().filter(|record| selection.contains(&record.address)));
    print_breakdown(&session.fee_breakdown());

    if !args.execute {
        let plan = session.plan().await?;
        println!(
            "\nDry run: {} instructions, {} bytes. Re-run with --execute to submit.",
            plan.instruction_count(),
            plan.size
        );
        return Ok(());
    }

    let receipt = session.close_selected(&wallet).await?;
    println!("\nClosed {} accounts", receipt.closed.len());
    println!("Signature: {}", receipt.signature);
    println!("Explorer:  {}", network.explorer_tx_url(&receipt.signature.to_string()));
    Ok(())
}

fn parse_pubkey(address: &str) -> Result<Pubkey, ReclaimError> {
    Pubkey::from_str(address)
        .map_err(|e| ReclaimError::ValidationError(format!("Invalid address {address}: {e}")))
}

fn print_records<'a>(records: impl IntoIterator<Item = &'a EmptyAccountRecord>) {
    println!("{:<6} {:<44} {:>14}", "TOKEN", "ACCOUNT", "RENT (SOL)");
    for record in records {
        println!(
            "{:<6} {:<44} {:>14.9}",
            record.mint_label,
            record.address.to_string(),
            record.reclaimable_sol()
        );
    }
}

fn print_breakdown(breakdown: &FeeBreakdown) {
    println!("\nAccounts selected: {}", breakdown.account_count);
    println!("Total reclaimable: {:.9} SOL", breakdown.total_sol());
    println!(
        "Donation ({}%):     {:.9} SOL",
        breakdown.percentage,
        breakdown.donation_sol()
    );
    println!("You receive:       {:.9} SOL", breakdown.user_sol());
}
