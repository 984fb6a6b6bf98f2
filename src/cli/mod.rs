use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::application::LedgerService;
use crate::storage::DEFAULT_LEDGER_FILE;

mod menu;

pub use menu::*;

/// Budget Tracker - record income and expenses from an interactive menu
#[derive(Parser)]
#[command(name = "budget-tracker")]
#[command(about = "A local-first income and expense tracker")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, default_value = DEFAULT_LEDGER_FILE)]
    pub file: PathBuf,

    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_logging(self.verbose);

        let mut service = LedgerService::open(&self.file)?;
        tracing::debug!(
            path = %service.path().display(),
            transactions = service.transactions().len(),
            "ledger ready"
        );

        let stdin = io::stdin();
        let stdout = io::stdout();
        Session::new(&mut service, stdin.lock(), stdout.lock()).run()
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("budget_tracker={level}")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
