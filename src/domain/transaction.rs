use chrono::NaiveDate;
use serde::Serialize;

use super::{Category, Cents, TransactionType};

pub type TransactionId = u64;

/// One recorded income or expense event.
/// Transactions are immutable once recorded; the ledger only adds and removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    description: String,
    /// Amount in cents (always positive)
    amount_cents: Cents,
    date: NaiveDate,
    category: Category,
    #[serde(rename = "type")]
    kind: TransactionType,
}

impl Transaction {
    /// Create a transaction. The id is assigned by the ledger that stores it.
    pub(crate) fn new(
        id: TransactionId,
        kind: TransactionType,
        amount_cents: Cents,
        category: Category,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        debug_assert!(amount_cents > 0, "Transaction amount must be positive");
        Self {
            id,
            description: description.into(),
            amount_cents,
            date,
            category,
            kind,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount_cents(&self) -> Cents {
        self.amount_cents
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign it contributes to the balance.
    pub fn signed_amount(&self) -> Cents {
        match self.kind {
            TransactionType::Income => self.amount_cents,
            TransactionType::Expense => -self.amount_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_transaction() {
        let tx = Transaction::new(
            3,
            TransactionType::Expense,
            1500,
            Category::Transport,
            date(2024, 3, 1),
            "Taxi",
        );

        assert_eq!(tx.id(), 3);
        assert_eq!(tx.kind(), TransactionType::Expense);
        assert_eq!(tx.amount_cents(), 1500);
        assert_eq!(tx.category(), Category::Transport);
        assert_eq!(tx.date(), date(2024, 3, 1));
        assert_eq!(tx.description(), "Taxi");
        assert!(tx.is_expense());
        assert!(!tx.is_income());
    }

    #[test]
    fn test_signed_amount() {
        let income = Transaction::new(
            0,
            TransactionType::Income,
            100000,
            Category::Salary,
            date(2024, 1, 1),
            "",
        );
        let expense = Transaction::new(
            1,
            TransactionType::Expense,
            20050,
            Category::Goods,
            date(2024, 1, 1),
            "",
        );

        assert_eq!(income.signed_amount(), 100000);
        assert_eq!(expense.signed_amount(), -20050);
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let tx = Transaction::new(
            7,
            TransactionType::Income,
            500,
            Category::Salary,
            date(2024, 5, 17),
            "Bonus",
        );
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "INCOME");
        assert_eq!(json["category"], "SALARY");
        assert_eq!(json["date"], "2024-05-17");
        assert_eq!(json["amount_cents"], 500);
    }
}
