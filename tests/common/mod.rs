// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use budget_tracker::application::LedgerService;
use budget_tracker::cli::Session;
use tempfile::TempDir;

/// Helper to create a test service backed by a file in a temporary directory
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = LedgerService::open(ledger_path(&temp_dir))?;
    Ok((service, temp_dir))
}

/// Path of the ledger file inside a temporary directory
pub fn ledger_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("transactions.json")
}

/// Drive an interactive session with scripted input and return everything
/// it printed.
pub fn run_session(service: &mut LedgerService, input: &str) -> Result<String> {
    let mut output = Vec::new();
    Session::new(service, input.as_bytes(), &mut output).run()?;
    Ok(String::from_utf8(output)?)
}
