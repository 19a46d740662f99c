use serde::{Deserialize, Serialize};

use crate::domain::{Category, Cents};

/// Expense breakdown across categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
    /// Share of the report total, 0.0 to 100.0
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeExpenseTotals {
    pub total_income: Cents,
    pub total_expense: Cents,
    pub net: Cents,
}

impl CategoryReport {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
