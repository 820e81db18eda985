//! Classification pipeline
//!
//! Runs the fixed sequence of stages over a combined dataset:
//! - GFE flag per row
//! - global RFR frequency, computed once
//! - row-level knowledge class
//! - event-level escalation of knowledge and GFE
//! - region and reportability facts, then workflow resolution

use crate::config::ClassifierConfig;
use crate::escalation::EventRollup;
use crate::gfe::GfeDetector;
use crate::knowledge::{KnowledgeClassifier, RfrFrequency};
use crate::region::{is_fda_reportable, region_facts};
use std::collections::{BTreeMap, HashSet};
use std::time::Instant;
use tracing::{debug, info, warn};
use triage_core::{ClassifiedRecord, Dataset, KnowledgeClass, Record, Result, Table, Workflow};
use triage_policy::{RuleFacts, WorkflowResolver};

/// Derived output columns appended after the input columns
pub const DERIVED_COLUMNS: [&str; 6] = [
    "Source_File",
    "Is_GFE",
    "Knowledge_Class",
    "Event_Knowledge_Class",
    "Event_Is_GFE",
    "Workflow",
];

/// Stateless pipeline; each run works only on its own dataset
pub struct ClassificationPipeline {
    gfe: GfeDetector,
    knowledge: KnowledgeClassifier,
    resolver: WorkflowResolver,
}

impl ClassificationPipeline {
    /// Build a pipeline from configuration and a workflow resolver
    pub fn new(config: &ClassifierConfig, resolver: WorkflowResolver) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            gfe: GfeDetector::new(&config.gfe_keywords, config.gfe_case_insensitive)?,
            knowledge: KnowledgeClassifier::new(
                config.well_understood_threshold,
                config.knowledge_grouping,
            ),
            resolver,
        })
    }

    /// Pipeline with default settings and the standard routing
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ClassifierConfig::default(), WorkflowResolver::standard())
    }

    /// Facts a workflow rule sees for one record
    pub fn facts(record: &Record, event_knowledge: KnowledgeClass) -> RuleFacts {
        RuleFacts {
            region: region_facts(&record.country),
            fda_reportable: is_fda_reportable(&record.reportability),
            well_understood: event_knowledge.is_understood(),
        }
    }

    /// Classify every record of the dataset
    pub fn run(&self, dataset: &Dataset) -> Result<ClassifiedDataset> {
        let start = Instant::now();
        let records = &dataset.records;

        let gfe: Vec<bool> = records.iter().map(|r| self.gfe.is_gfe(&r.communication)).collect();

        let frequency = RfrFrequency::from_records(records);
        let knowledge = self.knowledge.classify(records, &frequency);
        debug!(codes = frequency.distinct_codes(), "Row knowledge classified");

        let rollup = EventRollup::build(records, &knowledge, &gfe)?;

        let classified: Vec<ClassifiedRecord> = records
            .iter()
            .zip(knowledge)
            .zip(gfe)
            .map(|((record, knowledge_class), is_gfe)| {
                let event_knowledge_class = rollup.event_knowledge(&record.event_key);
                let workflow = self
                    .resolver
                    .workflow(&Self::facts(record, event_knowledge_class));

                ClassifiedRecord {
                    record: record.clone(),
                    is_gfe,
                    knowledge_class,
                    event_knowledge_class,
                    event_is_gfe: rollup.event_is_gfe(&record.event_key),
                    workflow,
                }
            })
            .collect();

        let stats = PipelineStats {
            rows: classified.len(),
            events: rollup.event_count(),
            gfe_rows: classified.iter().filter(|r| r.is_gfe).count(),
            gfe_events: rollup.gfe_event_count(),
            elapsed_us: start.elapsed().as_micros() as u64,
        };

        let result = ClassifiedDataset {
            columns: dataset.columns.clone(),
            records: classified,
            stats,
        };

        let unmatched = result.unmatched_count();
        if unmatched > 0 {
            warn!(rows = unmatched, "Records matched no workflow rule");
        }

        info!(
            rows = stats.rows,
            events = stats.events,
            gfe_events = stats.gfe_events,
            latency_us = stats.elapsed_us,
            "Classification complete"
        );

        Ok(result)
    }
}

/// Counts from a single pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub rows: usize,
    pub events: usize,
    pub gfe_rows: usize,
    pub gfe_events: usize,
    pub elapsed_us: u64,
}

/// Output of a pipeline run, one classified record per input record
#[derive(Debug, Clone)]
pub struct ClassifiedDataset {
    /// Pass-through input columns
    pub columns: Vec<String>,

    pub records: Vec<ClassifiedRecord>,

    pub stats: PipelineStats,
}

impl ClassifiedDataset {
    /// Rows per workflow, including workflows with no rows
    pub fn workflow_counts(&self) -> BTreeMap<Workflow, usize> {
        let mut counts: BTreeMap<Workflow, usize> =
            Workflow::ALL.iter().map(|w| (*w, 0)).collect();
        for record in &self.records {
            *counts.entry(record.workflow).or_insert(0) += 1;
        }
        counts
    }

    /// Rows no rule matched
    pub fn unmatched_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.workflow == Workflow::Unmatched)
            .count()
    }

    /// Row-level output: input columns followed by the derived columns
    ///
    /// An input column named like a derived column is kept as `Input_<name>`.
    pub fn to_table(&self) -> Table {
        let headers = self
            .input_headers()
            .into_iter()
            .chain(DERIVED_COLUMNS.iter().map(|c| c.to_string()));
        let mut table = Table::new(headers);

        for classified in &self.records {
            let record = &classified.record;
            let cells = self
                .columns
                .iter()
                .map(|column| record.raw_value(column).to_string())
                .chain([
                    record.source_file.clone(),
                    classified.is_gfe.to_string(),
                    classified.knowledge_class.to_string(),
                    classified.event_knowledge_class.to_string(),
                    classified.event_is_gfe.to_string(),
                    classified.workflow.to_string(),
                ]);
            table.push_row(cells);
        }

        table
    }

    fn input_headers(&self) -> Vec<String> {
        let mut used: HashSet<String> = self.columns.iter().cloned().collect();
        used.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

        self.columns
            .iter()
            .map(|column| {
                if !DERIVED_COLUMNS.contains(&column.as_str()) {
                    return column.clone();
                }
                let mut renamed = format!("Input_{}", column);
                while !used.insert(renamed.clone()) {
                    renamed.insert_str(0, "Input_");
                }
                warn!(
                    column = %column,
                    renamed = %renamed,
                    "Input column renamed to avoid a derived column"
                );
                renamed
            })
            .collect()
    }
}
