//! CLI entry point for limone.
//!
//! This binary provides the `limone` command: the terminal menu client
//! (`run`), a development reset (`reset`), and a quick state summary
//! (`status`). It owns startup: configuration, tracing, opening and
//! migrating the database, and constructing the stores that the other
//! crates receive by injection.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use limone_session::SessionManager;
use limone_store::{Database, KvStore, MenuStore, SEEDED_STATE_KEY};

use config::Config;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// limone, a terminal restaurant-menu client.
#[derive(Parser)]
#[command(
    name = "limone",
    version,
    about = "limone — terminal restaurant-menu client",
    long_about = "A single-user menu browser with a local SQLite store: onboarding on \
                  first launch, then a searchable, category-filterable menu."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal UI.
    Run,

    /// Delete all menu data and clear the seeded flag (development reset).
    Reset,

    /// Print login state, item count, and the seeded flag.
    Status,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => cmd_run().await,
        Commands::Reset => cmd_reset().await,
        Commands::Status => cmd_status().await,
    }
}

// ---------------------------------------------------------------------------
// Subcommand: run
// ---------------------------------------------------------------------------

async fn cmd_run() -> Result<()> {
    let config = Config::load();
    std::fs::create_dir_all(&config.data_dir).context("failed to create data directory")?;

    // Log to a file: stderr would draw over the alternate screen.
    let file_appender = tracing_appender::rolling::never(&config.data_dir, "limone.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    info!("starting limone");

    // A migration failure here is fatal: every screen needs the store, and
    // the in-TUI retry path covers transient failures later on.
    let db = Database::open_and_migrate(config.db_path())
        .await
        .context("failed to open database")?;
    info!(path = %config.db_path().display(), "store initialized");

    let kv = KvStore::new(db.clone());
    let store = MenuStore::new(db.clone());
    let session = SessionManager::new(kv.clone());

    limone_tui::run_tui(db, kv, store, session)
        .await
        .context("terminal UI failed")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: reset
// ---------------------------------------------------------------------------

async fn cmd_reset() -> Result<()> {
    let config = Config::load();
    init_stderr_tracing(&config.log_filter);

    let db = Database::open_and_migrate(config.db_path())
        .await
        .context("failed to open database")?;
    let kv = KvStore::new(db.clone());
    let store = MenuStore::new(db);

    store
        .reset_all(&kv)
        .await
        .context("failed to reset menu data")?;

    println!("Menu data deleted and seeded flag cleared.");
    println!("The sample menu will be re-seeded on the next `limone run`.");
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: status
// ---------------------------------------------------------------------------

async fn cmd_status() -> Result<()> {
    let config = Config::load();
    init_stderr_tracing(&config.log_filter);

    let db = Database::open_and_migrate(config.db_path())
        .await
        .context("failed to open database")?;
    let kv = KvStore::new(db.clone());
    let store = MenuStore::new(db.clone());
    let session = SessionManager::new(kv.clone());

    let logged_in = session.is_logged_in().await?;
    let item_count = store.count().await?;
    let seeded = kv.get(SEEDED_STATE_KEY).await?.unwrap_or_default();

    println!("limone v{}", env!("CARGO_PKG_VERSION"));
    println!("  database:  {}", config.db_path().display());
    println!("  logged in: {logged_in}");
    println!("  items:     {item_count}");
    println!(
        "  seeded:    {}",
        if seeded == "true" { "yes" } else { "no" }
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Tracing to stderr for the non-TUI subcommands.
fn init_stderr_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
