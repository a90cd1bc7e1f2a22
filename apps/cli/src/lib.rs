//! # Grocify Terminal Application
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: warn,grocify=info, overridden with RUST_LOG              │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults → config.toml → GROCIFY_* variables                      │
//! │                                                                         │
//! │  3. Build Catalog ────────────────────────────────────────────────────► │
//! │     • built-in price list, or the configured catalog file               │
//! │                                                                         │
//! │  4. Run Console ──────────────────────────────────────────────────────► │
//! │     • stdin/stdout, receipts written to the receipt directory           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod receipt_writer;

use std::io;

use anyhow::Context;
use grocify_core::{CheckoutFlow, ReceiptFormatter};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ConfigState;
use console::Console;
use receipt_writer::FileReceiptSink;

/// Runs one checkout session on the terminal.
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Grocify POS");

    let config = ConfigState::load().context("Failed to load configuration")?;
    let catalog = config
        .load_catalog()
        .context("Failed to load the catalog")?;
    info!(
        categories = catalog.list_categories().len(),
        items = catalog.item_count(),
        "Catalog ready"
    );

    let mut flow = CheckoutFlow::new(catalog, ReceiptFormatter::new(config.receipt_layout()));
    let mut sink = FileReceiptSink::new(config.receipt_dir.clone());
    info!(receipt_dir = %sink.dir().display(), "Receipts will be saved here");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), config.currency_symbol.clone());
    console
        .run(&mut flow, &mut sink)
        .context("Terminal I/O failed")?;

    info!("Session ended");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every intent
/// - `RUST_LOG=grocify_cli=trace` - Trace the CLI only
/// - Default: warnings, plus INFO for grocify crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,grocify=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
