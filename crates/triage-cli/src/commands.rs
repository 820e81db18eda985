//! Subcommand handlers

use crate::cli::{ClassifyArgs, ViewArgs};
use crate::config::AppConfig;
use crate::inputs;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use triage_classifiers::{ClassificationPipeline, ClassifiedDataset};
use triage_core::{ingest, Table};
use triage_policy::WorkflowResolver;
use triage_report::{EventSummary, GfePivot, RowSummary, SortOrder, TableStats, TableView};
use triage_telemetry::{MetricsCollector, MetricsSnapshot};

pub const CLASSIFIED_FILE: &str = "classified.csv";
pub const EVENT_SUMMARY_FILE: &str = "event_summary.csv";
pub const ROW_SUMMARY_FILE: &str = "row_summary.csv";
pub const PIVOT_FILE: &str = "pivot.csv";

/// Classify every input and write the reports
pub fn classify(args: &ClassifyArgs) -> Result<MetricsSnapshot> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_overrides(args);

    let sources = inputs::load_sources(&args.inputs)?;
    let (dataset, report) = ingest(&sources, &config.sheet, &config.columns)?;

    let resolver = match &config.rules_path {
        Some(path) => WorkflowResolver::from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => WorkflowResolver::standard(),
    };
    info!(rules = %resolver.rule_set().name, "Workflow rules loaded");

    let pipeline = ClassificationPipeline::new(&config.classifier, resolver)?;
    let result = pipeline.run(&dataset)?;

    let metrics = MetricsCollector::new();
    metrics.record_sources(report.used.len() as u64, report.skipped.len() as u64);
    record_result(&metrics, &result);

    write_reports(&config, &result)?;

    let snapshot = metrics.snapshot();
    snapshot.log();
    Ok(snapshot)
}

fn record_result(metrics: &MetricsCollector, result: &ClassifiedDataset) {
    metrics.record_rows(result.records.len() as u64);
    metrics.record_gfe(result.stats.gfe_rows as u64, result.stats.gfe_events as u64);
    for (workflow, count) in result.workflow_counts() {
        metrics.record_workflow(workflow, count as u64);
    }
}

fn write_reports(config: &AppConfig, result: &ClassifiedDataset) -> Result<()> {
    let out = &config.output_dir;

    write_table(&result.to_table(), &out.join(CLASSIFIED_FILE))?;

    let events = EventSummary::build(&result.records);
    write_table(&events.to_table(), &out.join(EVENT_SUMMARY_FILE))?;

    if config.row_summary {
        let rows = RowSummary::build(&result.records);
        write_table(&rows.to_table(), &out.join(ROW_SUMMARY_FILE))?;
    }

    if config.pivot {
        let pivot = GfePivot::from_summary(&events);
        write_table(&pivot.to_table(), &out.join(PIVOT_FILE))?;
    }

    Ok(())
}

fn write_table(table: &Table, path: &Path) -> Result<()> {
    table
        .write_csv_path(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), rows = table.len(), "Report written");
    Ok(())
}

/// Filter and sort a table, write it out, and print column statistics
pub fn view(args: &ViewArgs) -> Result<TableStats> {
    let table = Table::from_csv_path(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let mut view = TableView::new();
    if let (Some(column), Some(value)) = (&args.filter_column, &args.filter_value) {
        view = view.filter(column, value);
    }
    if let Some(column) = &args.sort_by {
        let order = if args.descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        view = view.sort(column, order);
    }

    let result = view.apply(&table)?;
    match &args.output {
        Some(path) => write_table(&result, path)?,
        None => result.write_csv(std::io::stdout().lock())?,
    }

    let stats = TableStats::compute(&result);
    eprintln!("Rows: {}", stats.rows);
    for (column, sum) in &stats.column_sums {
        eprintln!("Sum of {column}: {sum}");
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use triage_core::Workflow;

    const REPORT: &str = "\
Product Event ID,PE - PLI #,Communication,RFR Code,Country,Reportability,Source System
PE-1,1,Follow Up for Information,A01,Japan,,SAP
PE-1,2,,A01,Japan,,SAP
PE-2,1,,B02,Brazil,,TrackWise
PE-3,1,,C03,France,,TrackWise
";

    fn source_dir(root: &Path) -> PathBuf {
        let dir = root.join("site-a");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("Report 1.csv"), REPORT).unwrap();
        dir
    }

    #[test]
    fn test_classify_writes_reports() {
        let root = tempfile::tempdir().unwrap();
        let input = source_dir(root.path());
        let out_dir = root.path().join("out");

        let snapshot = classify(&ClassifyArgs {
            inputs: vec![input],
            out_dir: Some(out_dir.clone()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(snapshot.rows_classified, 4);
        assert_eq!(snapshot.sources_used, 1);
        assert_eq!(snapshot.gfe_rows, 1);
        assert_eq!(snapshot.gfe_events, 1);
        assert_eq!(snapshot.workflows[Workflow::JapanGreaterChina.code() as usize], 2);
        assert_eq!(snapshot.workflows[Workflow::OusOther.code() as usize], 1);
        assert_eq!(snapshot.workflows[Workflow::NotUnderstoodRegulated.code() as usize], 1);

        let classified = Table::from_csv_path(out_dir.join(CLASSIFIED_FILE)).unwrap();
        assert_eq!(classified.len(), 4);
        assert_eq!(classified.get(0, "Source_File"), Some("site-a"));
        assert_eq!(classified.get(1, "Event_Is_GFE"), Some("true"));
        assert_eq!(classified.get(3, "Workflow"), Some("3"));

        let pivot = fs::read_to_string(out_dir.join(PIVOT_FILE)).unwrap();
        assert_eq!(pivot, "Workflow,SAP,TrackWise\n3,0,0\n4,0,0\n5,1,0\n");
        assert!(out_dir.join(EVENT_SUMMARY_FILE).exists());
        assert!(out_dir.join(ROW_SUMMARY_FILE).exists());
    }

    #[test]
    fn test_classify_optional_reports() {
        let root = tempfile::tempdir().unwrap();
        let input = source_dir(root.path());
        let out_dir = root.path().join("out");

        classify(&ClassifyArgs {
            inputs: vec![input],
            out_dir: Some(out_dir.clone()),
            no_row_summary: true,
            no_pivot: true,
            ..Default::default()
        })
        .unwrap();

        assert!(out_dir.join(CLASSIFIED_FILE).exists());
        assert!(!out_dir.join(ROW_SUMMARY_FILE).exists());
        assert!(!out_dir.join(PIVOT_FILE).exists());
    }

    #[test]
    fn test_classify_without_canonical_table() {
        let root = tempfile::tempdir().unwrap();
        let input = source_dir(root.path());

        let err = classify(&ClassifyArgs {
            inputs: vec![input],
            sheet: Some("Report 2".to_string()),
            out_dir: Some(root.path().join("out")),
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<triage_core::Error>(),
            Some(triage_core::Error::NoValidData)
        ));
    }

    #[test]
    fn test_view_filters_and_sorts() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("summary.csv");
        fs::write(&input, "System,Events\nSAP,3\nTrackWise,10\nsap-eu,7\n").unwrap();
        let output = root.path().join("view.csv");

        let stats = view(&ViewArgs {
            input,
            filter_column: Some("System".to_string()),
            filter_value: Some("SAP".to_string()),
            sort_by: Some("Events".to_string()),
            descending: true,
            output: Some(output.clone()),
        })
        .unwrap();

        assert_eq!(stats.rows, 2);
        assert_eq!(stats.sum("Events"), Some(10.0));
        let written = fs::read_to_string(output).unwrap();
        assert_eq!(written, "System,Events\nsap-eu,7\nSAP,3\n");
    }

    #[test]
    fn test_view_unknown_column() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("summary.csv");
        fs::write(&input, "System,Events\nSAP,3\n").unwrap();

        let result = view(&ViewArgs {
            input,
            sort_by: Some("Missing".to_string()),
            output: Some(root.path().join("view.csv")),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
