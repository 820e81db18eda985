//! Filtered and sorted views over any table, with column statistics

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use triage_core::{Result, Table};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Keep rows whose cell contains `value`, ignoring case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    #[serde(default)]
    pub order: SortOrder,
}

/// Filter then sort; either step may be omitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub filter: Option<ColumnFilter>,
    pub sort: Option<SortSpec>,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter = Some(ColumnFilter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn sort(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(SortSpec {
            column: column.into(),
            order,
        });
        self
    }

    /// Produce the viewed table; unknown columns are errors
    pub fn apply(&self, table: &Table) -> Result<Table> {
        let mut rows: Vec<&Vec<String>> = table.rows.iter().collect();

        if let Some(filter) = &self.filter {
            let idx = table.require_column(&filter.column)?;
            // An empty filter value keeps every row
            if !filter.value.is_empty() {
                let needle = filter.value.to_lowercase();
                rows.retain(|row| cell(row, idx).to_lowercase().contains(&needle));
            }
        }

        if let Some(sort) = &self.sort {
            let idx = table.require_column(&sort.column)?;
            rows.sort_by(|a, b| compare_cells(cell(a, idx), cell(b, idx), sort.order));
        }

        Ok(Table {
            headers: table.headers.clone(),
            rows: rows.into_iter().cloned().collect(),
        })
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

/// Empty cells sort last in either order; numbers compare numerically
fn compare_cells(a: &str, b: &str, order: SortOrder) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let ordering = match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    };

    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

/// Row count and sums of numeric columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    pub rows: usize,

    /// Columns whose non-empty cells all parse as numbers, with their sums
    pub column_sums: Vec<(String, f64)>,
}

impl TableStats {
    /// A column of only empty cells sums to zero; a table without rows has no sums
    pub fn compute(table: &Table) -> Self {
        if table.is_empty() {
            return Self::default();
        }

        let column_sums = table
            .headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| {
                let mut sum = 0.0;
                for row in &table.rows {
                    let value = cell(row, idx).trim();
                    if value.is_empty() {
                        continue;
                    }
                    sum += value.parse::<f64>().ok()?;
                }
                Some((header.clone(), sum))
            })
            .collect();

        Self {
            rows: table.len(),
            column_sums,
        }
    }

    pub fn sum(&self, column: &str) -> Option<f64> {
        self.column_sums
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, sum)| *sum)
    }
}
