/*
[INPUT]:  CLI arguments, optional YAML configuration file, INJ_WALLET__* environment
[OUTPUT]: JSON results for token, price, address, session and grant commands
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or subcommands
*/

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use injective_wallet_cli::CliConfig;
use injective_wallet_cli::commands;
use injective_wallet_core::FileSessionStore;

#[derive(Parser, Debug)]
#[command(name = "injective-wallet-cli", version, about = "Injective wallet, auto-sign and token tooling")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve token metadata for one or more denoms
    Token {
        #[arg(required = true)]
        denoms: Vec<String>,
    },
    /// USD prices for CoinGecko ids
    Price {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show an address in both formats with its default subaccount
    Address { address: String },
    /// Derive a subaccount id
    Subaccount {
        address: String,
        #[arg(long, default_value_t = 0)]
        nonce: u32,
    },
    /// Inspect or clear stored auto-sign sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Auto-sign grant tooling
    Grants {
        #[command(subcommand)]
        action: GrantsAction,
    },
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    List,
    Show { granter: String },
    Clear { granter: String },
}

#[derive(Subcommand, Debug)]
enum GrantsAction {
    /// Print the MsgGrant batch an auto-sign connection would broadcast
    Plan {
        #[arg(long)]
        granter: String,
        #[arg(long)]
        grantee: String,
        /// Message type URL; defaults to the configured auto-sign types
        #[arg(long = "message-type")]
        message_types: Vec<String>,
        /// Contract execution grant as <contract>:<max_calls>
        #[arg(long = "contract")]
        contracts: Vec<String>,
        #[arg(long)]
        duration: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a default configuration file
    Init {
        #[arg(long, value_name = "PATH", default_value = "injective-wallet.yaml")]
        output: PathBuf,
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration and endpoints
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = CliConfig::load(args.config_path.as_deref()).context("load config")?;
    debug!(network = %config.network, session_dir = %config.session_dir.display(), "configuration loaded");

    match args.command {
        Command::Token { denoms } => {
            let service = commands::token_service(&config.endpoints())?;
            print_json(&commands::resolve_tokens(&service, &denoms).await?)
        }
        Command::Price { ids } => {
            let service = commands::price_service(&config.endpoints())?;
            print_json(&commands::usd_prices(&service, &ids).await)
        }
        Command::Address { address } => print_json(&commands::address_info(&address)?),
        Command::Subaccount { address, nonce } => {
            println!("{}", commands::subaccount(&address, nonce)?);
            Ok(())
        }
        Command::Session { action } => {
            let store = FileSessionStore::new(&config.session_dir);
            let now = Utc::now();
            match action {
                SessionAction::List => print_json(&commands::list_sessions(&store, now)?),
                SessionAction::Show { granter } => {
                    print_json(&commands::show_session(&store, &granter, now)?)
                }
                SessionAction::Clear { granter } => commands::clear_session(&store, &granter),
            }
        }
        Command::Grants {
            action:
                GrantsAction::Plan {
                    granter,
                    grantee,
                    message_types,
                    contracts,
                    duration,
                },
        } => {
            let message_types = if message_types.is_empty() {
                config.auto_sign.message_types.clone()
            } else {
                message_types
            };
            let msgs = commands::plan_grants(
                &granter,
                &grantee,
                &message_types,
                &contracts,
                duration.unwrap_or(config.auto_sign.duration_seconds),
                Utc::now(),
            )?;
            print_json(&msgs)
        }
        Command::Config { action } => match action {
            ConfigAction::Init { output, force } => {
                CliConfig::default().write_to(&output, force)?;
                info!(path = %output.display(), "configuration written");
                println!("Configuration written to: {}", output.display());
                Ok(())
            }
            ConfigAction::Show => print_json(&serde_json::json!({
                "config": config,
                "endpoints": config.endpoints(),
            })),
        },
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{rendered}");
    Ok(())
}
