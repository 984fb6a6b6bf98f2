use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use super::Cents;

/// Format used for the `date` field in the storage file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, ...)
    Income,
    /// Money going out (rent, groceries, ...)
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Capitalized label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded income or expense. Transactions are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Free-text label used for grouping expenses
    pub category: String,
    /// Amount in cents (never negative), stored on disk in currency units
    #[serde(rename = "amount", with = "amount_units")]
    pub amount_cents: Cents,
    /// Local wall-clock time of entry, second precision
    #[serde(rename = "date", with = "local_timestamp")]
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount_cents: Cents,
        timestamp: NaiveDateTime,
    ) -> Self {
        assert!(amount_cents >= 0, "Transaction amount cannot be negative");
        Self {
            kind,
            category: category.into(),
            amount_cents,
            timestamp: timestamp.trunc_subsecs(0),
        }
    }

    /// Create a transaction stamped with the current local time.
    pub fn now(kind: TransactionKind, category: impl Into<String>, amount_cents: Cents) -> Self {
        Self::new(kind, category, amount_cents, Local::now().naive_local())
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

mod amount_units {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::domain::{Cents, cents_from_units, cents_to_units};

    pub fn serialize<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(cents_to_units(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
        let units = f64::deserialize(deserializer)?;
        cents_from_units(units).map_err(|e| de::Error::custom(format!("invalid amount: {e}")))
    }
}

mod local_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        timestamp: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid date '{raw}': {e}")))
    }
}
