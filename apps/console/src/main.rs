//! # RigForge Console
//!
//! Interactive console for the shop ledger.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► tokenize ──► command dispatch ──► ledger operation      │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                      notification feed drained and                      │
//! │                      rendered after every command                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! # Start with an empty ledger
//! cargo run -p rigforge-console
//!
//! # Preload demo inventory
//! cargo run -p rigforge-console -- --seed
//! ```

mod repl;
mod seed;

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rigforge_ledger::LedgerState;
use rigforge_namegen::{ChatNameSource, NamegenConfig};

#[derive(Debug, Parser)]
#[command(name = "rigforge", about = "Inventory console for a custom PC shop")]
struct Cli {
    /// Preload demo products, serial numbers, and customers.
    #[arg(long)]
    seed: bool,

    /// Log filter directive (overridden by RUST_LOG).
    #[arg(long, default_value = "warn")]
    log: String,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log.clone())),
        )
        .with_target(false)
        .init();

    let state = LedgerState::new();
    if cli.seed {
        seed::seed_demo_inventory(&state);
        info!("demo inventory loaded");
    }

    let namegen_config = NamegenConfig::from_env();
    let name_source = ChatNameSource::new(namegen_config.clone());

    println!("RigForge console. Type 'help' for commands, 'quit' to exit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        repl::dispatch(&state, &name_source, &namegen_config, line).await;
        repl::drain_notifications(&state);
    }

    Ok(())
}
