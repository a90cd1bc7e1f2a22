//! # Grocify Entry Point
//!
//! The actual setup lives in `lib.rs` so the console can be tested
//! without a terminal.

fn main() -> anyhow::Result<()> {
    grocify_cli::run()
}
