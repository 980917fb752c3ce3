//! Premium Access Bot - Main Entry Point
//!
//! Loads configuration and the persistent stores, wires up the spam guard
//! and keeps the snapshots flushed until shutdown. The messaging transport
//! plugs into the guard's `on_user_event` / `Notifier` seams.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use premium_access_bot::config::{BotConfig, SpamSettings};
use premium_access_bot::guard::SpamGuard;
use premium_access_bot::notify::LogNotifier;
use premium_access_bot::now_unix;
use premium_access_bot::storage::{GuardStore, StartMessageStore, UserDirectory};

/// Telegram membership bot with spam protection and UPI payments.
#[derive(Parser, Debug)]
#[command(name = "premium_bot")]
#[command(about = "Sell premium channel access via UPI QR payments")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Interval between periodic snapshot flushes, in seconds.
    #[arg(long, default_value_t = 60)]
    flush_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let config = BotConfig::from_env().context("Failed to load bot configuration")?;
    let spam_settings = SpamSettings::from_env_with_defaults();

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create data dir {}", config.data_dir.display()))?;

    // Load persistent stores
    let directory = Arc::new(Mutex::new(UserDirectory::load(config.users_data_path())));
    let start_message = StartMessageStore::load(config.start_message_path());
    info!(
        "Custom start message: {}",
        if start_message.get().is_some() { "set" } else { "not set" }
    );

    let mut guard_store = GuardStore::load(config.spam_data_path());
    // Backfill guard records for users imported before spam tracking existed.
    {
        let dir = directory.lock().await;
        for id in dir.ids() {
            guard_store.ensure(id);
        }
    }
    let guard_store = Arc::new(Mutex::new(guard_store));

    let guard = Arc::new(SpamGuard::new(
        spam_settings,
        Arc::clone(&guard_store),
        Arc::new(LogNotifier),
    ));

    info!("Admin ID: {}", config.admin_id);
    info!("UPI ID: {}", config.upi.upi_id);
    info!("Amount: ₹{}", config.upi.amount);
    info!(
        "Spam protection active (max {} requests in {}s)",
        spam_settings.max_count, spam_settings.window_secs
    );
    {
        let store = guard_store.lock().await;
        let dir = directory.lock().await;
        info!(
            "Tracking {} users, {} currently blocked",
            dir.len(),
            store.blocked_count(now_unix())
        );
    }

    // Periodic snapshot flush, decoupled from the event hot path.
    let flush_store = Arc::clone(&guard_store);
    let flush_directory = Arc::clone(&directory);
    let flush_handle = tokio::spawn(async move {
        let mut timer = tokio::time::interval(Duration::from_secs(args.flush_interval.max(1)));
        timer.tick().await; // first tick fires immediately
        loop {
            timer.tick().await;
            flush_store.lock().await.flush();
            flush_directory.lock().await.flush();
        }
    });

    info!("Bot is running. Use Ctrl+C to stop.");
    let _ = guard; // handed to the transport layer when one is attached

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    flush_handle.abort();

    // Final flush of everything before exit.
    guard_store.lock().await.flush();
    directory.lock().await.flush();

    info!("Shutdown complete");
    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
