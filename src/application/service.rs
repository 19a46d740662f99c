use std::collections::BTreeMap;

use crate::domain::{
    checked_total_with, compute_balance, expense_counts_by_category, expenses_by_category,
    sort_newest_first, total_for_type, Category, Cents, Clock, SystemClock, Transaction,
    TransactionId, TransactionType,
};

use super::{AppError, CategoryReport, CategorySummary, IncomeExpenseTotals};

/// Application service owning one in-memory ledger.
/// This is the primary interface for any client (the console loop, tests, exporters).
pub struct LedgerService {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    clock: Box<dyn Clock>,
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerService {
    /// Create an empty ledger dated by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty ledger that takes "today" from the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 0,
            clock: Box::new(clock),
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new transaction dated today.
    ///
    /// Rejected input leaves the ledger untouched and does not consume an id.
    pub fn record_transaction(
        &mut self,
        kind: TransactionType,
        amount_cents: Cents,
        category: Option<Category>,
        description: impl Into<String>,
    ) -> Result<Transaction, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::invalid_input("amount must be positive"));
        }
        let category = category.ok_or_else(|| AppError::invalid_input("category is required"))?;
        // Per-type totals bound the balance and every category total.
        if checked_total_with(kind, &self.transactions, amount_cents).is_none() {
            return Err(AppError::invalid_input(
                "amount would push the ledger total out of range",
            ));
        }

        let id = self.next_id;
        let transaction = Transaction::new(
            id,
            kind,
            amount_cents,
            category,
            self.clock.today(),
            description,
        );
        self.next_id += 1;
        self.transactions.push(transaction.clone());

        tracing::debug!(
            id,
            kind = %transaction.kind(),
            category = %transaction.category(),
            amount_cents,
            "recorded transaction"
        );
        Ok(transaction)
    }

    /// Delete a transaction by id. Returns whether anything was removed.
    pub fn delete_transaction(&mut self, id: TransactionId) -> bool {
        match self.transactions.iter().position(|t| t.id() == id) {
            Some(index) => {
                self.transactions.remove(index);
                tracing::debug!(id, "deleted transaction");
                true
            }
            None => {
                tracing::debug!(id, "no transaction to delete");
                false
            }
        }
    }

    // ========================
    // Queries
    // ========================

    /// All transactions, newest first. Same-day transactions keep insertion order.
    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.sorted(|_| true)
    }

    /// Transactions of one type, newest first.
    pub fn list_by_type(&self, kind: TransactionType) -> Vec<Transaction> {
        self.sorted(|t| t.kind() == kind)
    }

    /// Transactions in one category, newest first.
    pub fn list_by_category(&self, category: Category) -> Vec<Transaction> {
        self.sorted(|t| t.category() == category)
    }

    pub fn get_transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Total income minus total expense.
    pub fn balance(&self) -> Cents {
        compute_balance(&self.transactions)
    }

    /// Expense totals per category; categories without expenses are absent.
    pub fn expenses_by_category(&self) -> BTreeMap<Category, Cents> {
        expenses_by_category(&self.transactions)
    }

    pub fn income_expense_totals(&self) -> IncomeExpenseTotals {
        let total_income = total_for_type(TransactionType::Income, &self.transactions);
        let total_expense = total_for_type(TransactionType::Expense, &self.transactions);
        IncomeExpenseTotals {
            total_income,
            total_expense,
            net: total_income - total_expense,
        }
    }

    /// Expense summary with counts and shares, largest category first.
    pub fn expense_report(&self) -> CategoryReport {
        let totals = self.expenses_by_category();
        let counts = expense_counts_by_category(&self.transactions);
        let total: Cents = totals.values().sum();

        let mut categories: Vec<CategorySummary> = totals
            .into_iter()
            .map(|(category, category_total)| CategorySummary {
                category,
                total: category_total,
                count: counts.get(&category).copied().unwrap_or(0),
                percentage: if total > 0 {
                    category_total as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));

        CategoryReport { categories, total }
    }

    fn sorted(&self, keep: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
        let mut result: Vec<Transaction> =
            self.transactions.iter().filter(|t| keep(t)).cloned().collect();
        sort_newest_first(&mut result);
        result
    }
}
