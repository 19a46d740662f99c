use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::{format_cents, Transaction};

/// Point-in-time copy of the ledger for JSON export
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Exporter for writing the ledger out in a portable format
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        match format {
            ExportFormat::Csv => self.export_csv(writer),
            ExportFormat::Json => self.export_json(writer),
        }
    }

    /// Export transactions to CSV, newest first
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let transactions = self.service.list_transactions();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "type", "category", "amount", "description"])?;

        for transaction in &transactions {
            csv_writer.write_record([
                transaction.id().to_string(),
                transaction.date().format("%Y-%m-%d").to_string(),
                transaction.kind().to_string(),
                transaction.category().to_string(),
                format_cents(transaction.amount_cents()),
                transaction.description().to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(transactions.len())
    }

    /// Export the whole ledger as a pretty-printed JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            transactions: self.service.list_transactions(),
        };

        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(snapshot.transactions.len())
    }
}
