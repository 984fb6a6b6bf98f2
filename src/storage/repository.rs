use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::domain::Transaction;

/// Why a stored ledger could not be used.
#[derive(Debug)]
pub enum LoadFailure {
    /// Nothing has been saved yet
    Missing,
    /// The file exists but could not be read
    Unreadable(io::Error),
    /// The file was read but is not a list of valid transaction records
    Malformed(serde_json::Error),
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadFailure::Missing => write!(f, "file does not exist"),
            LoadFailure::Unreadable(e) => write!(f, "cannot read file: {}", e),
            LoadFailure::Malformed(e) => write!(f, "invalid ledger data: {}", e),
        }
    }
}

impl std::error::Error for LoadFailure {}

/// Repository for persisting the ledger as a JSON list in a single file.
///
/// The file is the only durable copy and is rewritten in full on every save.
/// It must not be shared between concurrently running processes.
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and strictly decode the stored transactions.
    pub fn try_load(&self) -> std::result::Result<Vec<Transaction>, LoadFailure> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadFailure::Missing),
            Err(e) => return Err(LoadFailure::Unreadable(e)),
        };

        serde_json::from_slice(&contents).map_err(LoadFailure::Malformed)
    }

    /// Load the stored transactions, falling back to an empty ledger when the
    /// file is missing or cannot be decoded.
    ///
    /// Any other I/O failure is returned: the file may hold real data, and
    /// the next save would replace it.
    pub fn load(&self) -> io::Result<Vec<Transaction>> {
        match self.try_load() {
            Ok(transactions) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = transactions.len(),
                    "loaded ledger"
                );
                Ok(transactions)
            }
            Err(LoadFailure::Missing) => {
                tracing::debug!(path = %self.path.display(), "no ledger file, starting empty");
                Ok(Vec::new())
            }
            Err(LoadFailure::Malformed(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "ignoring stored ledger (invalid ledger data: {}), starting empty",
                    e
                );
                Ok(Vec::new())
            }
            Err(LoadFailure::Unreadable(e)) => {
                tracing::error!(path = %self.path.display(), "cannot read ledger: {}", e);
                Err(e)
            }
        }
    }

    /// Overwrite the file with the full list of transactions.
    /// The data is written to a temporary file in the same directory and then
    /// renamed over the target, so readers never observe a half-written file.
    pub fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let dir = self.parent_dir();
        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

        write_pretty(&mut file, transactions)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        file.as_file()
            .sync_all()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "saved ledger"
        );
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

fn write_pretty<W: Write>(mut writer: W, transactions: &[Transaction]) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    transactions.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
