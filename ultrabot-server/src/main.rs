use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use ultrabot_common::traits::repository_traits::AccountStore;
use ultrabot_core::platforms::discord::DiscordPlatform;
use ultrabot_core::repositories::JsonAccountStore;
use ultrabot_core::services::{AccountService, EventContext};

#[derive(Parser, Debug, Clone)]
#[command(name = "ultrabot")]
#[command(author, version, about = "UltraBot - shared game account tracker for Discord")]
struct Args {
    /// JSON file holding the account roster
    #[arg(long, default_value = "accounts.json")]
    accounts_file: PathBuf,

    /// Marker that starts a chat command, e.g. `!status`
    #[arg(long, default_value = "!", value_parser = parse_prefix)]
    prefix: String,
}

fn parse_prefix(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        return Err("command prefix must not be empty".into());
    }
    Ok(raw.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ultrabot=info"));
    fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let token = std::env::var("DISCORD_TOKEN").unwrap_or_default();

    let store = Arc::new(JsonAccountStore::new(&args.accounts_file));
    match store.load_accounts().await {
        Ok(accounts) => info!(
            "UltraBot starting; {} accounts in {}",
            accounts.len(),
            store.path().display()
        ),
        Err(e) => warn!("Account file not usable yet, commands will fail until it is => {e}"),
    }

    let ctx = Arc::new(EventContext::new(
        Arc::new(AccountService::new(store)),
        args.prefix.clone(),
    ));

    let mut discord = DiscordPlatform::new(token);
    discord.connect(&args.prefix).await?;
    info!("Connected to Discord; command prefix '{}'", args.prefix);

    tokio::select! {
        res = discord.run(ctx.clone()) => {
            if let Err(e) = res {
                error!("Dispatcher error: {e}");
            }
        }
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                error!("Failed to listen for Ctrl-C: {e}");
            }
            info!("Ctrl-C detected, shutting down...");
        }
    }

    discord.disconnect().await?;
    info!("UltraBot has finished. Goodbye!");
    Ok(())
}
