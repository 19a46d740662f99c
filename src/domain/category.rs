use serde::{Deserialize, Serialize};

/// Fixed classification tag for what a transaction was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Goods,
    Transport,
    Salary,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Goods,
        Category::Transport,
        Category::Salary,
        Category::Entertainment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Goods => "GOODS",
            Category::Transport => "TRANSPORT",
            Category::Salary => "SALARY",
            Category::Entertainment => "ENTERTAINMENT",
        }
    }

    /// Case-insensitive lookup; `None` for anything outside the fixed set.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GOODS" => Some(Category::Goods),
            "TRANSPORT" => Some(Category::Transport),
            "SALARY" => Some(Category::Salary),
            "ENTERTAINMENT" => Some(Category::Entertainment),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a transaction: money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INCOME" => Some(TransactionType::Income),
            "EXPENSE" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
