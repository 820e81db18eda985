//! Grouped workflow summaries
//!
//! Both summaries group by (workflow, source file, source system). The event
//! summary first reduces the dataset to one representative row per event key;
//! the row summary counts every row.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;
use triage_core::{ClassifiedRecord, Table, Workflow};

/// Grouping key shared by both summaries
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SummaryKey {
    pub workflow: Workflow,
    pub source_file: String,
    pub source_system: String,
}

impl SummaryKey {
    fn of(record: &ClassifiedRecord) -> Self {
        Self {
            workflow: record.workflow,
            source_file: record.record.source_file.clone(),
            source_system: record.record.source_system.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummaryRow {
    pub key: SummaryKey,
    pub distinct_events: usize,
    pub gfe_events: usize,
}

/// Distinct events and GFE-tainted events per group, sorted by key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub rows: Vec<EventSummaryRow>,
}

impl EventSummary {
    pub const HEADERS: [&'static str; 5] = [
        "Workflow",
        "Source_File",
        "Source_System",
        "Distinct_Product_Events",
        "GFE_Product_Events",
    ];

    /// Deduplicate to the first row of each event, then group
    pub fn build(records: &[ClassifiedRecord]) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut groups: BTreeMap<SummaryKey, (usize, usize)> = BTreeMap::new();

        for record in records {
            if !seen.insert(record.record.event_key.as_str()) {
                continue;
            }
            let entry = groups.entry(SummaryKey::of(record)).or_insert((0, 0));
            entry.0 += 1;
            if record.event_is_gfe {
                entry.1 += 1;
            }
        }

        debug!(events = seen.len(), groups = groups.len(), "Built event summary");

        Self {
            rows: groups
                .into_iter()
                .map(|(key, (distinct_events, gfe_events))| EventSummaryRow {
                    key,
                    distinct_events,
                    gfe_events,
                })
                .collect(),
        }
    }

    /// Sum of distinct events over all groups
    pub fn total_events(&self) -> usize {
        self.rows.iter().map(|r| r.distinct_events).sum()
    }

    /// Sum of GFE-tainted events over all groups
    pub fn total_gfe_events(&self) -> usize {
        self.rows.iter().map(|r| r.gfe_events).sum()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new(Self::HEADERS);
        for row in &self.rows {
            table.push_row([
                row.key.workflow.to_string(),
                row.key.source_file.clone(),
                row.key.source_system.clone(),
                row.distinct_events.to_string(),
                row.gfe_events.to_string(),
            ]);
        }
        table
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSummaryRow {
    pub key: SummaryKey,
    pub gfe_rows: usize,
    pub total_rows: usize,
}

/// GFE rows and total rows per group, without deduplication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSummary {
    pub rows: Vec<RowSummaryRow>,
}

impl RowSummary {
    pub const HEADERS: [&'static str; 5] = [
        "Workflow",
        "Source_File",
        "Source_System",
        "GFE_Rows",
        "Total_Rows",
    ];

    pub fn build(records: &[ClassifiedRecord]) -> Self {
        let mut groups: BTreeMap<SummaryKey, (usize, usize)> = BTreeMap::new();
        for record in records {
            let entry = groups.entry(SummaryKey::of(record)).or_insert((0, 0));
            if record.is_gfe {
                entry.0 += 1;
            }
            entry.1 += 1;
        }

        Self {
            rows: groups
                .into_iter()
                .map(|(key, (gfe_rows, total_rows))| RowSummaryRow {
                    key,
                    gfe_rows,
                    total_rows,
                })
                .collect(),
        }
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new(Self::HEADERS);
        for row in &self.rows {
            table.push_row([
                row.key.workflow.to_string(),
                row.key.source_file.clone(),
                row.key.source_system.clone(),
                row.gfe_rows.to_string(),
                row.total_rows.to_string(),
            ]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{KnowledgeClass, Record};

    fn classified(
        event: &str,
        system: &str,
        workflow: Workflow,
        is_gfe: bool,
        event_is_gfe: bool,
    ) -> ClassifiedRecord {
        ClassifiedRecord {
            record: Record::new(event, "site-a").with_source_system(system),
            is_gfe,
            knowledge_class: KnowledgeClass::WellUnderstood,
            event_knowledge_class: KnowledgeClass::WellUnderstood,
            event_is_gfe,
            workflow,
        }
    }

    #[test]
    fn test_event_summary_deduplicates() {
        let records = vec![
            classified("PE-1", "SAP", Workflow::OusOther, false, true),
            classified("PE-1", "SAP", Workflow::OusOther, true, true),
            classified("PE-2", "SAP", Workflow::OusOther, false, false),
            classified("PE-3", "TrackWise", Workflow::JapanGreaterChina, false, false),
        ];

        let summary = EventSummary::build(&records);
        assert_eq!(summary.rows.len(), 2);

        let first = &summary.rows[0];
        assert_eq!(first.key.workflow, Workflow::OusOther);
        assert_eq!(first.distinct_events, 2);
        assert_eq!(first.gfe_events, 1);
        assert_eq!(summary.total_events(), 3);
        assert_eq!(summary.total_gfe_events(), 1);
    }

    #[test]
    fn test_row_summary_counts_every_row() {
        let records = vec![
            classified("PE-1", "SAP", Workflow::OusOther, false, true),
            classified("PE-1", "SAP", Workflow::OusOther, true, true),
        ];

        let summary = RowSummary::build(&records);
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].gfe_rows, 1);
        assert_eq!(summary.rows[0].total_rows, 2);
    }

    #[test]
    fn test_event_summary_table() {
        let records = vec![classified("PE-1", "SAP", Workflow::UsNonReportable, false, false)];
        let table = EventSummary::build(&records).to_table();

        assert_eq!(
            table.to_csv_string().unwrap(),
            "Workflow,Source_File,Source_System,Distinct_Product_Events,GFE_Product_Events\n\
             1,site-a,SAP,1,0\n"
        );
    }

    #[test]
    fn test_groups_sorted_by_workflow_then_source() {
        let records = vec![
            classified("PE-1", "B", Workflow::JapanGreaterChina, false, false),
            classified("PE-2", "A", Workflow::JapanGreaterChina, false, false),
            classified("PE-3", "A", Workflow::UsNonReportable, false, false),
        ];
        let summary = EventSummary::build(&records);
        let keys: Vec<(u8, &str)> = summary
            .rows
            .iter()
            .map(|r| (r.key.workflow.code(), r.key.source_system.as_str()))
            .collect();
        assert_eq!(keys, vec![(1, "A"), (5, "A"), (5, "B")]);
    }
}
