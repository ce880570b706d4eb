//! Vouch - claim verification service

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

use vouch::{config::Args, lifecycle::SystemClock, logging, server, AppState, VerificationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(&args.log_level, args.log_format);

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Vouch - claim verification service");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Mode: {}", if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" });
    info!(
        "Store: {}",
        args.store_url.as_deref().unwrap_or("in-memory")
    );
    info!("======================================");

    let store = args.build_store()?;
    if store.backend() == "memory" {
        warn!("Using in-memory record store - records are lost on restart");
    }

    let service = VerificationService::new(
        store,
        Arc::new(args.build_signer()),
        Arc::new(SystemClock),
    );

    let state = Arc::new(AppState::new(args, service));
    server::run(state).await?;

    Ok(())
}
