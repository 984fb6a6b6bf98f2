use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ParseAmountError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseAmountError),

    #[error("Category cannot be empty")]
    EmptyCategory,

    #[error("Cannot read ledger file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}
