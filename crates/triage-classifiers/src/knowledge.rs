//! Knowledge classification from reason-for-report codes
//!
//! Two signals decide whether a row is well understood: how many distinct
//! RFR codes its group carries, and how common the row's own code is across
//! the whole combined dataset. Both are computed over every record before any
//! filtering.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use triage_core::{KnowledgeClass, Record};

/// Default global frequency a code needs to count as well understood
pub const DEFAULT_WELL_UNDERSTOOD_THRESHOLD: usize = 50;

/// Occurrence count of every RFR code in the combined dataset
///
/// Built once per run and passed to the classifier unchanged. An empty code
/// is counted like any other value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RfrFrequency {
    counts: HashMap<String, usize>,
}

impl RfrFrequency {
    pub fn from_records(records: &[Record]) -> Self {
        let mut counts = HashMap::new();
        for record in records {
            *counts.entry(record.rfr_code.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Occurrences of a code; zero when never seen
    pub fn count(&self, rfr_code: &str) -> usize {
        self.counts.get(rfr_code).copied().unwrap_or(0)
    }

    pub fn distinct_codes(&self) -> usize {
        self.counts.len()
    }
}

/// Key that knowledge diversity is measured over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeGrouping {
    /// The product event key
    #[default]
    Event,
    /// Product event plus line item
    SubEvent,
}

/// Row-level knowledge classifier
#[derive(Debug, Clone)]
pub struct KnowledgeClassifier {
    threshold: usize,
    grouping: KnowledgeGrouping,
}

impl KnowledgeClassifier {
    pub fn new(threshold: usize, grouping: KnowledgeGrouping) -> Self {
        Self { threshold, grouping }
    }

    pub fn grouping(&self) -> KnowledgeGrouping {
        self.grouping
    }

    /// Classify every record, in order
    pub fn classify(&self, records: &[Record], frequency: &RfrFrequency) -> Vec<KnowledgeClass> {
        let mut codes_per_group: HashMap<(&str, &str), HashSet<&str>> = HashMap::new();
        for record in records {
            codes_per_group
                .entry(self.group_key(record))
                .or_default()
                .insert(record.rfr_code.as_str());
        }

        debug!(
            groups = codes_per_group.len(),
            grouping = ?self.grouping,
            "Computed RFR code diversity"
        );

        records
            .iter()
            .map(|record| {
                let distinct = codes_per_group
                    .get(&self.group_key(record))
                    .map(HashSet::len)
                    .unwrap_or(0);
                self.classify_row(distinct, frequency.count(&record.rfr_code))
            })
            .collect()
    }

    /// Decide from a group's code diversity and the row code's global count
    pub fn classify_row(
        &self,
        distinct_codes_in_group: usize,
        global_count: usize,
    ) -> KnowledgeClass {
        if distinct_codes_in_group > 1 || global_count < self.threshold {
            KnowledgeClass::NotWellUnderstood
        } else {
            KnowledgeClass::WellUnderstood
        }
    }

    fn group_key<'a>(&self, record: &'a Record) -> (&'a str, &'a str) {
        match self.grouping {
            KnowledgeGrouping::Event => (record.event_key.as_str(), ""),
            KnowledgeGrouping::SubEvent => {
                (record.event_key.as_str(), record.sub_event_key.as_str())
            }
        }
    }
}

impl Default for KnowledgeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_WELL_UNDERSTOOD_THRESHOLD, KnowledgeGrouping::Event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(event: &str, code: &str, n: usize) -> Vec<Record> {
        (0..n).map(|_| Record::new(event, "src").with_rfr_code(code)).collect()
    }

    #[test]
    fn test_frequency_counts_empty_codes() {
        let mut records = rows("PE-1", "A01", 3);
        records.extend(rows("PE-2", "", 2));

        let frequency = RfrFrequency::from_records(&records);
        assert_eq!(frequency.count("A01"), 3);
        assert_eq!(frequency.count(""), 2);
        assert_eq!(frequency.count("ZZZ"), 0);
        assert_eq!(frequency.distinct_codes(), 2);
    }

    #[test]
    fn test_common_single_code_is_understood() {
        let records = rows("PE-1", "A01", 50);
        let frequency = RfrFrequency::from_records(&records);

        let classes = KnowledgeClassifier::default().classify(&records, &frequency);
        assert!(classes.iter().all(|c| *c == KnowledgeClass::WellUnderstood));
    }

    #[test]
    fn test_rare_code_is_not_understood() {
        let records = rows("PE-1", "A01", 49);
        let frequency = RfrFrequency::from_records(&records);

        let classes = KnowledgeClassifier::default().classify(&records, &frequency);
        assert!(classes.iter().all(|c| *c == KnowledgeClass::NotWellUnderstood));
    }

    #[test]
    fn test_frequency_is_global_not_per_group() {
        // One row for PE-1, but its code appears 60 times across the dataset
        let mut records = rows("PE-1", "A01", 1);
        records.extend(rows("PE-2", "A01", 59));
        let frequency = RfrFrequency::from_records(&records);

        let classes = KnowledgeClassifier::default().classify(&records, &frequency);
        assert_eq!(classes[0], KnowledgeClass::WellUnderstood);
    }

    #[test]
    fn test_diverse_group_is_not_understood() {
        let mut records = rows("PE-1", "A01", 60);
        records.push(Record::new("PE-1", "src").with_rfr_code("B02"));
        let frequency = RfrFrequency::from_records(&records);

        let classes = KnowledgeClassifier::default().classify(&records, &frequency);
        assert!(classes.iter().all(|c| *c == KnowledgeClass::NotWellUnderstood));
    }

    #[test]
    fn test_sub_event_grouping_is_finer() {
        let mut records: Vec<Record> = (0..60)
            .map(|_| Record::new("PE-1", "src").with_sub_event_key("1").with_rfr_code("A01"))
            .collect();
        records.extend((0..60).map(|_| {
            Record::new("PE-1", "src").with_sub_event_key("2").with_rfr_code("B02")
        }));
        let frequency = RfrFrequency::from_records(&records);

        let by_event =
            KnowledgeClassifier::new(50, KnowledgeGrouping::Event).classify(&records, &frequency);
        assert!(by_event.iter().all(|c| *c == KnowledgeClass::NotWellUnderstood));

        let by_sub_event = KnowledgeClassifier::new(50, KnowledgeGrouping::SubEvent)
            .classify(&records, &frequency);
        assert!(by_sub_event.iter().all(|c| *c == KnowledgeClass::WellUnderstood));
    }
}
