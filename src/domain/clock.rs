use chrono::{Local, NaiveDate};

/// Source of "today" for newly recorded transactions.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDate + Send + Sync,
{
    fn today(&self) -> NaiveDate {
        self()
    }
}
