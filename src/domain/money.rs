use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so $50.00 = 5000 cents.
pub type Cents = i64;

/// Sums over many transactions are accumulated in a wider type, so no list
/// of in-range amounts can overflow them.
pub type TotalCents = i128;

/// Largest amount a single transaction may carry ($9,999,999,999,999.99).
/// Every amount up to this bound survives the trip through a JSON float
/// exactly (15 significant digits).
pub const MAX_CENTS: Cents = 999_999_999_999_999;

/// Format cents as a plain two-decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: impl Into<TotalCents>) -> String {
    let cents: TotalCents = cents.into();
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Format cents with the currency symbol, e.g. "$549.75" or "$-12.34".
pub fn format_currency(cents: impl Into<TotalCents>) -> String {
    format!("${}", format_cents(cents))
}

/// Parse a user-entered, non-negative decimal amount into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000, ".5" -> 50
///
/// Digits past the second decimal place are truncated. Amounts above
/// `MAX_CENTS` are rejected as `Overflow`.
pub fn parse_amount(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    if input.starts_with('-') {
        return Err(ParseAmountError::Negative);
    }

    let (units_str, decimal_str) = match input.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (input, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if !is_digits(units_str) || !is_digits(decimal_str) {
        return Err(ParseAmountError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseAmountError::Overflow)?
    };

    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        // "5" after the point means 50 cents
        1 => i64::from(digit(decimal_str, 0)) * 10,
        _ => i64::from(digit(decimal_str, 0)) * 10 + i64::from(digit(decimal_str, 1)),
    };

    units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(decimal_cents))
        .filter(|cents| *cents <= MAX_CENTS)
        .ok_or(ParseAmountError::Overflow)
}

/// Convert a stored currency-unit number (e.g. 50.25) into cents,
/// rounding to the nearest cent. Values above `MAX_CENTS` are rejected.
pub fn cents_from_units(units: f64) -> Result<Cents, ParseAmountError> {
    if !units.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if units < 0.0 {
        return Err(ParseAmountError::Negative);
    }
    let cents = (units * 100.0).round();
    if cents > MAX_CENTS as f64 {
        return Err(ParseAmountError::Overflow);
    }
    Ok(cents as Cents)
}

/// Convert cents back into currency units for storage.
pub fn cents_to_units(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

// Separators like "_" or a leading "+" are accepted by `str::parse`, so
// check the characters explicitly.
fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn digit(s: &str, index: usize) -> u8 {
    s.as_bytes()[index] - b'0'
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    Negative,
    Overflow,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "not a valid number"),
            ParseAmountError::Negative => write!(f, "amount cannot be negative"),
            ParseAmountError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
