use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::{
    Cents, MAX_CENTS, ParseAmountError, TotalCents, Transaction, TransactionKind,
    compute_balance, expenses_by_category, parse_amount,
};
use crate::storage::Repository;

use super::AppError;

/// Application service owning the in-memory ledger and its backing file.
/// This is the primary interface for any client (interactive menu, tests, ...).
///
/// The ledger only grows; after every successful `record` the file holds
/// exactly the transactions held in memory.
pub struct LedgerService {
    repo: Repository,
    transactions: Vec<Transaction>,
}

impl LedgerService {
    /// Create a service around a repository and an already loaded ledger.
    pub fn new(repo: Repository, transactions: Vec<Transaction>) -> Self {
        Self { repo, transactions }
    }

    /// Load the ledger stored at the given path.
    /// A missing or undecodable file yields an empty ledger. A file that
    /// exists but cannot be read is an error, so it is never overwritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let repo = Repository::new(path);
        let transactions = repo.load().map_err(|source| AppError::Unreadable {
            path: repo.path().to_path_buf(),
            source,
        })?;
        Ok(Self::new(repo, transactions))
    }

    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// All recorded transactions, in order of entry.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new transaction stamped with the current local time and
    /// rewrite the storage file.
    ///
    /// If the write fails the transaction is kept in memory and
    /// `AppError::Storage` is returned; the file is brought back in sync by
    /// the next successful write.
    pub fn record(
        &mut self,
        kind: TransactionKind,
        category: &str,
        amount_cents: Cents,
    ) -> Result<Transaction, AppError> {
        if amount_cents < 0 {
            return Err(AppError::InvalidAmount(ParseAmountError::Negative));
        }
        if amount_cents > MAX_CENTS {
            return Err(AppError::InvalidAmount(ParseAmountError::Overflow));
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(AppError::EmptyCategory);
        }

        let transaction = Transaction::now(kind, category, amount_cents);
        tracing::debug!(
            kind = %transaction.kind,
            category = %transaction.category,
            amount_cents = transaction.amount_cents,
            "recording transaction"
        );
        self.transactions.push(transaction.clone());

        if let Err(e) = self.persist() {
            tracing::error!(path = %self.path().display(), "failed to save ledger: {}", e);
            return Err(e);
        }

        Ok(transaction)
    }

    /// Record a transaction from user-entered amount text.
    pub fn record_str(
        &mut self,
        kind: TransactionKind,
        category: &str,
        amount: &str,
    ) -> Result<Transaction, AppError> {
        let amount_cents = parse_amount(amount)?;
        self.record(kind, category, amount_cents)
    }

    pub fn record_income(
        &mut self,
        category: &str,
        amount_cents: Cents,
    ) -> Result<Transaction, AppError> {
        self.record(TransactionKind::Income, category, amount_cents)
    }

    pub fn record_expense(
        &mut self,
        category: &str,
        amount_cents: Cents,
    ) -> Result<Transaction, AppError> {
        self.record(TransactionKind::Expense, category, amount_cents)
    }

    /// Write the whole ledger to the storage file.
    pub fn persist(&self) -> Result<(), AppError> {
        self.repo.save(&self.transactions)?;
        Ok(())
    }

    // ========================
    // Aggregates
    // ========================

    /// Total income minus total expenses.
    pub fn balance(&self) -> TotalCents {
        compute_balance(&self.transactions)
    }

    /// Expense totals keyed by category.
    pub fn expenses_by_category(&self) -> BTreeMap<String, TotalCents> {
        expenses_by_category(&self.transactions)
    }
}
