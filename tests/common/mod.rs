// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::NaiveDate;
use fintrack::application::LedgerService;
use fintrack::domain::{Category, Transaction, TransactionType};

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Clock whose date the test can move forward or backward.
#[derive(Clone)]
pub struct TestClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl TestClock {
    pub fn new(date_str: &str) -> Self {
        Self {
            today: Arc::new(Mutex::new(parse_date(date_str))),
        }
    }

    pub fn set(&self, date_str: &str) {
        *self.today.lock().unwrap() = parse_date(date_str);
    }
}

impl fintrack::domain::Clock for TestClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}

/// Helper to create a service dated by a controllable clock
pub fn test_service(date_str: &str) -> (LedgerService, TestClock) {
    let clock = TestClock::new(date_str);
    (LedgerService::with_clock(clock.clone()), clock)
}

/// Test fixture: the salary + groceries ledger most scenarios start from
pub struct StandardLedger {
    pub income: Transaction,
    pub expense: Transaction,
}

impl StandardLedger {
    /// INCOME 1000.00 SALARY and EXPENSE 200.50 GOODS
    pub fn create(service: &mut LedgerService) -> Result<Self> {
        let income = service.record_transaction(
            TransactionType::Income,
            100000,
            Some(Category::Salary),
            "Monthly salary",
        )?;
        let expense = service.record_transaction(
            TransactionType::Expense,
            20050,
            Some(Category::Goods),
            "Groceries",
        )?;
        Ok(Self { income, expense })
    }
}

pub fn ids(transactions: &[Transaction]) -> Vec<u64> {
    transactions.iter().map(Transaction::id).collect()
}
