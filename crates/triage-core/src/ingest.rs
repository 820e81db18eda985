//! Multi-source ingestion
//!
//! Each source is an already-parsed workbook of named tables. Only the table
//! carrying the canonical label contributes rows; a source without it is
//! skipped with a warning, and ingestion fails only when no source is usable.

use crate::error::{Error, Result};
use crate::schema::ColumnMapping;
use crate::table::Table;
use crate::types::Dataset;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default label of the canonical table in each source
pub const DEFAULT_TABLE_LABEL: &str = "Report 1";

/// A parsed source with its named tables
#[derive(Debug, Clone, Default)]
pub struct SourceWorkbook {
    /// Source name, recorded on every row as its source file
    pub name: String,

    /// Tables keyed by label, in workbook order
    pub tables: Vec<(String, Table)>,
}

impl SourceWorkbook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    /// Add a labelled table
    pub fn with_table(mut self, label: impl Into<String>, table: Table) -> Self {
        self.tables.push((label.into(), table));
        self
    }

    /// Find a table by exact label
    pub fn table(&self, label: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, table)| table)
    }
}

/// Which sources contributed rows and which were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Sources that supplied the canonical table, with row counts
    pub used: Vec<(String, usize)>,

    /// Sources lacking the canonical table
    pub skipped: Vec<String>,
}

/// Combine every source's canonical table into one dataset
pub fn ingest(
    sources: &[SourceWorkbook],
    label: &str,
    mapping: &ColumnMapping,
) -> Result<(Dataset, IngestReport)> {
    let mut dataset = Dataset::default();
    let mut report = IngestReport::default();

    for source in sources {
        let Some(table) = source.table(label) else {
            warn!(source = %source.name, table = %label, "Source has no canonical table, skipping");
            report.skipped.push(source.name.clone());
            continue;
        };

        let missing = mapping.missing_columns(table);
        if !missing.is_empty() {
            warn!(
                source = %source.name,
                columns = ?missing,
                "Mapped columns absent from source; values default to empty"
            );
        }

        let headers = table.unique_headers();
        if headers != table.headers {
            warn!(
                source = %source.name,
                headers = ?headers,
                "Repeated column names suffixed to keep every column"
            );
        }

        for header in &headers {
            if !dataset.columns.contains(header) {
                dataset.columns.push(header.clone());
            }
        }

        dataset.records.extend(
            table
                .rows
                .iter()
                .map(|row| mapping.record_from_row(&headers, row, &source.name)),
        );

        debug!(source = %source.name, rows = table.len(), "Ingested source");
        report.used.push((source.name.clone(), table.len()));
    }

    if report.used.is_empty() {
        return Err(Error::NoValidData);
    }

    info!(
        sources = report.used.len(),
        skipped = report.skipped.len(),
        rows = dataset.len(),
        "Ingestion complete"
    );

    Ok((dataset, report))
}
