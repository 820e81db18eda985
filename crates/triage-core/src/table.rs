//! Tabular datasets with CSV input and output
//!
//! A [`Table`] is the exchange format between every stage: sources arrive as
//! tables, and the classified dataset and all summaries leave as tables.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

/// A rectangular table of string cells with a header row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column names, in order
    pub headers: Vec<String>,

    /// Data rows; every row has exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a column, or a report error naming the missing column
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| Error::report(format!("unknown column '{}'", name)))
    }

    /// Headers with repeats suffixed `_2`, `_3`, ... so every column has its own name
    ///
    /// The first occurrence keeps its name. A suffix already used by another
    /// header is skipped.
    pub fn unique_headers(&self) -> Vec<String> {
        let mut used: HashSet<String> = self.headers.iter().cloned().collect();
        let mut seen: HashSet<&str> = HashSet::new();

        self.headers
            .iter()
            .map(|header| {
                if seen.insert(header.as_str()) {
                    return header.clone();
                }
                let mut n = 2;
                loop {
                    let candidate = format!("{}_{}", header, n);
                    if used.insert(candidate.clone()) {
                        return candidate;
                    }
                    n += 1;
                }
            })
            .collect()
    }

    /// Cell value at `row` for the named column
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Read a table from CSV with a header row
    ///
    /// Short rows are padded with empty cells; long rows are truncated.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Self {
            headers,
            rows: Vec::new(),
        };

        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter());
        }

        Ok(table)
    }

    /// Read a table from a CSV file
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    /// Write the table as CSV, header row first
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        if !self.headers.is_empty() {
            writer.write_record(&self.headers)?;
        }
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the table to a CSV file, creating parent directories
    pub fn write_csv_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        self.write_csv(std::io::BufWriter::new(file))
    }

    /// Render the table as a CSV string
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| Error::internal(format!("csv output is not utf-8: {}", e)))
    }
}
