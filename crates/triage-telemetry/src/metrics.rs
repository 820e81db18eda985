//! Metrics collection and reporting

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use triage_core::Workflow;

/// Metrics collector for classification runs
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    rows_classified: AtomicU64,
    sources_used: AtomicU64,
    sources_skipped: AtomicU64,
    gfe_rows: AtomicU64,
    gfe_events: AtomicU64,
    workflows: [AtomicU64; 6],
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                rows_classified: AtomicU64::new(0),
                sources_used: AtomicU64::new(0),
                sources_skipped: AtomicU64::new(0),
                gfe_rows: AtomicU64::new(0),
                gfe_events: AtomicU64::new(0),
                workflows: Default::default(),
            }),
        }
    }

    /// Record ingestion outcome
    pub fn record_sources(&self, used: u64, skipped: u64) {
        self.inner.sources_used.fetch_add(used, Ordering::Relaxed);
        self.inner.sources_skipped.fetch_add(skipped, Ordering::Relaxed);
        metrics::counter!("triage_sources_skipped_total").increment(skipped);
    }

    /// Record classified rows
    pub fn record_rows(&self, count: u64) {
        self.inner.rows_classified.fetch_add(count, Ordering::Relaxed);
        metrics::counter!("triage_rows_classified_total").increment(count);
    }

    /// Record GFE rows and GFE-tainted events
    pub fn record_gfe(&self, rows: u64, events: u64) {
        self.inner.gfe_rows.fetch_add(rows, Ordering::Relaxed);
        self.inner.gfe_events.fetch_add(events, Ordering::Relaxed);
        metrics::counter!("triage_gfe_events_total").increment(events);
    }

    /// Record rows assigned to a workflow
    pub fn record_workflow(&self, workflow: Workflow, count: u64) {
        self.inner.workflows[workflow.code() as usize].fetch_add(count, Ordering::Relaxed);
        metrics::counter!("triage_workflow_total", "workflow" => workflow.to_string())
            .increment(count);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut workflows = [0u64; 6];
        for (slot, counter) in workflows.iter_mut().zip(&self.inner.workflows) {
            *slot = counter.load(Ordering::Relaxed);
        }

        MetricsSnapshot {
            rows_classified: self.inner.rows_classified.load(Ordering::Relaxed),
            sources_used: self.inner.sources_used.load(Ordering::Relaxed),
            sources_skipped: self.inner.sources_skipped.load(Ordering::Relaxed),
            gfe_rows: self.inner.gfe_rows.load(Ordering::Relaxed),
            gfe_events: self.inner.gfe_events.load(Ordering::Relaxed),
            workflows,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub rows_classified: u64,
    pub sources_used: u64,
    pub sources_skipped: u64,
    pub gfe_rows: u64,
    pub gfe_events: u64,
    /// Rows per workflow code
    pub workflows: [u64; 6],
}

impl MetricsSnapshot {
    /// Rows no workflow rule matched
    pub fn unmatched(&self) -> u64 {
        self.workflows[Workflow::Unmatched.code() as usize]
    }

    /// Share of classified rows assigned to a workflow
    pub fn workflow_share(&self, workflow: Workflow) -> f64 {
        if self.rows_classified == 0 {
            0.0
        } else {
            self.workflows[workflow.code() as usize] as f64 / self.rows_classified as f64
        }
    }

    /// Log the snapshot at info level
    pub fn log(&self) {
        info!(
            rows = self.rows_classified,
            sources = self.sources_used,
            skipped = self.sources_skipped,
            gfe_rows = self.gfe_rows,
            gfe_events = self.gfe_events,
            unmatched = self.unmatched(),
            "Run metrics"
        );
        for workflow in Workflow::ALL {
            info!(
                workflow = workflow.code(),
                rows = self.workflows[workflow.code() as usize],
                share = format!("{:.1}%", self.workflow_share(workflow) * 100.0),
                "Workflow volume"
            );
        }
    }
}
