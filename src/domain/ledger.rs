use std::collections::BTreeMap;

use super::{TotalCents, Transaction};

/// Compute the remaining budget from a list of transactions.
/// Balance = sum of income - sum of expenses
pub fn compute_balance(transactions: &[Transaction]) -> TotalCents {
    total_income(transactions) - total_expenses(transactions)
}

/// Sum of all income amounts.
pub fn total_income(transactions: &[Transaction]) -> TotalCents {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| TotalCents::from(t.amount_cents))
        .sum()
}

/// Sum of all expense amounts.
pub fn total_expenses(transactions: &[Transaction]) -> TotalCents {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| TotalCents::from(t.amount_cents))
        .sum()
}

/// Sum expense amounts per category.
/// Categories are grouped by their literal text, so "Food" and "food" stay apart.
pub fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<String, TotalCents> {
    let mut totals: BTreeMap<String, TotalCents> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(transaction.category.clone()).or_insert(0) +=
            TotalCents::from(transaction.amount_cents);
    }

    totals
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDateTime};

    use super::*;
    use crate::domain::{Cents, TransactionKind};

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn income(category: &str, amount: Cents) -> Transaction {
        Transaction::new(TransactionKind::Income, category, amount, now())
    }

    fn expense(category: &str, amount: Cents) -> Transaction {
        Transaction::new(TransactionKind::Expense, category, amount, now())
    }

    #[test]
    fn test_empty_ledger() {
        assert_eq!(compute_balance(&[]), 0);
        assert!(expenses_by_category(&[]).is_empty());
    }

    #[test]
    fn test_compute_balance_mixed() {
        let transactions = vec![
            income("Salary", 100000), // +1000.00
            expense("Rent", 40000),   // -400.00
            expense("Food", 5025),    // -50.25
        ];

        assert_eq!(compute_balance(&transactions), 54975);
        assert_eq!(total_income(&transactions), 100000);
        assert_eq!(total_expenses(&transactions), 45025);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let transactions = vec![income("Gift", 1000), expense("Dinner", 2234)];
        assert_eq!(compute_balance(&transactions), -1234);
    }

    #[test]
    fn test_balance_independent_of_order() {
        let mut transactions = vec![
            income("Salary", 250000),
            expense("Rent", 90000),
            income("Freelance", 12345),
            expense("Food", 4321),
            expense("Food", 999),
        ];
        let forward = compute_balance(&transactions);

        transactions.reverse();
        assert_eq!(compute_balance(&transactions), forward);

        transactions.rotate_left(2);
        assert_eq!(compute_balance(&transactions), forward);
    }

    #[test]
    fn test_expenses_by_category() {
        let transactions = vec![
            income("Salary", 100000),
            expense("Rent", 40000),
            expense("Food", 5025),
        ];

        let totals = expenses_by_category(&transactions);

        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("Rent"), Some(&40000));
        assert_eq!(totals.get("Food"), Some(&5025));
        assert_eq!(totals.get("Salary"), None);
    }

    #[test]
    fn test_same_category_accumulates() {
        let transactions = vec![expense("Food", 1000), expense("Food", 1000)];

        let totals = expenses_by_category(&transactions);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("Food"), Some(&2000));
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let transactions = vec![expense("Food", 500), expense("food", 700)];

        let totals = expenses_by_category(&transactions);

        assert_eq!(totals.get("Food"), Some(&500));
        assert_eq!(totals.get("food"), Some(&700));
    }

    #[test]
    fn test_category_totals_sum_to_total_expenses() {
        let transactions = vec![
            income("Salary", 300000),
            expense("Rent", 120000),
            expense("Food", 3333),
            expense("Transport", 1),
            expense("Food", 6667),
            income("Refund", 2500),
        ];

        let totals = expenses_by_category(&transactions);
        let sum: TotalCents = totals.values().sum();

        assert_eq!(sum, total_expenses(&transactions));
        assert_eq!(
            compute_balance(&transactions),
            total_income(&transactions) - sum
        );
    }

    #[test]
    fn test_totals_of_largest_amounts_do_not_overflow() {
        let transactions = vec![
            income("Jackpot", Cents::MAX),
            income("Jackpot", Cents::MAX),
            expense("Yacht", Cents::MAX),
            expense("Yacht", Cents::MAX),
            expense("Yacht", Cents::MAX),
        ];
        let max = TotalCents::from(Cents::MAX);

        assert_eq!(total_income(&transactions), 2 * max);
        assert_eq!(total_expenses(&transactions), 3 * max);
        assert_eq!(compute_balance(&transactions), -max);
        assert_eq!(expenses_by_category(&transactions).get("Yacht"), Some(&(3 * max)));
    }

    #[test]
    fn test_aggregates_do_not_mutate() {
        let transactions = vec![income("Salary", 100), expense("Food", 50)];
        let before = transactions.clone();

        compute_balance(&transactions);
        expenses_by_category(&transactions);

        assert_eq!(transactions, before);
    }
}
