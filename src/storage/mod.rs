mod repository;

pub use repository::*;

/// Storage file used when no path is given on the command line.
pub const DEFAULT_LEDGER_FILE: &str = "transactions.json";
