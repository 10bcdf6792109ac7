mod args;
mod reclaim;

use args::{GlobalArgs, LoggingFormat};
use clap::{Parser, Subcommand};
use reclaim::{CloseArgs, ScanArgs};
use reclaim_lib::{rpc::get_rpc_client_for, Config, ReclaimError};

#[derive(Subcommand)]
enum Commands {
    /// List empty token accounts and the rent they lock
    Scan {
        #[command(flatten)]
        scan_args: ScanArgs,
    },
    /// Close empty token accounts and reclaim their rent in one transaction
    Close {
        #[command(flatten)]
        close_args: Box<CloseArgs>,
    },
}

#[derive(Parser)]
#[command(author, version, about = "Reclaim rent from empty Solana token accounts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[tokio::main]
async fn main() -> Result<(), ReclaimError> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(&cli.global_args.logging_format);

    let mut config = Config::load_or_default(&cli.global_args.config).unwrap_or_else(|e| {
        print_error(&format!("Failed to load config: {e}"));
        std::process::exit(1);
    });
    cli.global_args.apply_overrides(&mut config);
    log::debug!("Loaded configuration from {}", cli.global_args.config);
    if let Err(e) = config.validate() {
        print_error(&format!("Invalid configuration: {e}"));
        std::process::exit(1);
    }

    let rpc_client = get_rpc_client_for(&config.network);
    let network = config.network.cluster;

    let result = match cli.command {
        Some(Commands::Scan { scan_args }) => {
            reclaim::handle_scan(scan_args, rpc_client, config).await
        }
        Some(Commands::Close { close_args }) => {
            reclaim::handle_close(*close_args, rpc_client, config).await
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            println!("Available commands:");
            println!("  scan   - List empty token accounts for an owner");
            println!("  close  - Close empty token accounts and reclaim rent");
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        if let Some(signature) = e.signature() {
            eprintln!("Explorer: {}", network.explorer_tx_url(signature));
        }
        std::process::exit(1);
    }

    Ok(())
}

fn print_error(message: &str) {
    eprintln!("Error: {message}");
}

fn setup_logging(format: &LoggingFormat) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    match format {
        LoggingFormat::Standard => subscriber.init(),
        LoggingFormat::Json => subscriber.json().init(),
    }
}
