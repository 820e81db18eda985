//! Column mapping from input headers to canonical record fields

use crate::table::Table;
use crate::types::Record;
use serde::{Deserialize, Serialize};

/// Input column names for each canonical field
///
/// Historical exports name the event key differently ("Product Event ID",
/// "PE - PLI #", "PE PLI #"). Exactly one column is configured per field;
/// no fallback between variants is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub event_key: String,
    pub sub_event_key: String,
    pub communication: String,
    pub rfr_code: String,
    pub country: String,
    pub reportability: String,
    pub source_system: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            event_key: "Product Event ID".to_string(),
            sub_event_key: "PE - PLI #".to_string(),
            communication: "Communication".to_string(),
            rfr_code: "RFR Code".to_string(),
            country: "Country".to_string(),
            reportability: "Reportability".to_string(),
            source_system: "Source System".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Mapped columns absent from a table's headers
    pub fn missing_columns<'a>(&'a self, table: &Table) -> Vec<&'a str> {
        self.columns()
            .into_iter()
            .filter(|column| table.column_index(column).is_none())
            .collect()
    }

    /// Convert one table row into a record from `source_file`
    ///
    /// `headers` must be unique; see [`Table::unique_headers`].
    pub fn record_from_row(&self, headers: &[String], row: &[String], source_file: &str) -> Record {
        let raw = headers
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .collect::<std::collections::HashMap<_, _>>();

        let field = |column: &str| raw.get(column).cloned().unwrap_or_default();

        Record {
            event_key: field(&self.event_key),
            sub_event_key: field(&self.sub_event_key),
            communication: field(&self.communication),
            rfr_code: field(&self.rfr_code),
            country: field(&self.country),
            reportability: field(&self.reportability),
            source_file: source_file.to_string(),
            source_system: field(&self.source_system),
            raw,
        }
    }

    fn columns(&self) -> [&str; 7] {
        [
            self.event_key.as_str(),
            self.sub_event_key.as_str(),
            self.communication.as_str(),
            self.rfr_code.as_str(),
            self.country.as_str(),
            self.reportability.as_str(),
            self.source_system.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mapping = ColumnMapping::from_yaml("event_key: \"PE PLI #\"\n").unwrap();
        assert_eq!(mapping.event_key, "PE PLI #");
        assert_eq!(mapping.country, "Country");
    }

    #[test]
    fn test_record_from_row_defaults_missing_to_empty() {
        let mapping = ColumnMapping::default();
        let headers: Vec<String> = ["Product Event ID", "Country", "Lot"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let row = vec!["PE-1".to_string(), "Japan".to_string(), "L42".to_string()];

        let record = mapping.record_from_row(&headers, &row, "site-a");
        assert_eq!(record.event_key, "PE-1");
        assert_eq!(record.country, "Japan");
        assert_eq!(record.rfr_code, "");
        assert_eq!(record.source_file, "site-a");
        assert_eq!(record.raw_value("Lot"), "L42");
    }

    #[test]
    fn test_missing_columns() {
        let mapping = ColumnMapping::default();
        let table = Table::new(["Product Event ID", "Country"]);
        let missing = mapping.missing_columns(&table);
        assert_eq!(missing.len(), 5);
        assert!(missing.contains(&"RFR Code"));
    }
}
