use std::collections::BTreeMap;

use super::{Category, Cents, Transaction, TransactionType};

/// Balance = sum of income - sum of expenses.
pub fn compute_balance(transactions: &[Transaction]) -> Cents {
    transactions.iter().map(Transaction::signed_amount).sum()
}

/// Sum of amounts for a single transaction type.
pub fn total_for_type(kind: TransactionType, transactions: &[Transaction]) -> Cents {
    transactions
        .iter()
        .filter(|t| t.kind() == kind)
        .map(Transaction::amount_cents)
        .sum()
}

/// Sum of amounts for a single transaction type plus `extra`, or `None` if
/// the total no longer fits in `Cents`.
pub fn checked_total_with(
    kind: TransactionType,
    transactions: &[Transaction],
    extra: Cents,
) -> Option<Cents> {
    transactions
        .iter()
        .filter(|t| t.kind() == kind)
        .try_fold(extra, |total, t| total.checked_add(t.amount_cents()))
}

/// Expense totals per category. Categories without expenses are absent.
pub fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<Category, Cents> {
    let mut totals: BTreeMap<Category, Cents> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(transaction.category()).or_insert(0) += transaction.amount_cents();
    }

    totals
}

/// Number of expense transactions per category.
pub fn expense_counts_by_category(transactions: &[Transaction]) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        *counts.entry(transaction.category()).or_insert(0) += 1;
    }

    counts
}

/// Sort newest first. The sort is stable, so transactions sharing a date
/// keep their insertion order.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date().cmp(&a.date()));
}
