//! GFE event pivot: workflows down, source systems across

use crate::summary::EventSummary;
use std::collections::{BTreeMap, BTreeSet};
use triage_core::{Table, Workflow};

/// GFE-tainted event counts by workflow and source system
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GfePivot {
    systems: Vec<String>,
    cells: BTreeMap<Workflow, BTreeMap<String, usize>>,
}

impl GfePivot {
    /// Reshape an event summary, summing GFE events over source files
    pub fn from_summary(summary: &EventSummary) -> Self {
        let mut systems = BTreeSet::new();
        let mut cells: BTreeMap<Workflow, BTreeMap<String, usize>> = BTreeMap::new();

        for row in &summary.rows {
            systems.insert(row.key.source_system.clone());
            *cells
                .entry(row.key.workflow)
                .or_default()
                .entry(row.key.source_system.clone())
                .or_insert(0) += row.gfe_events;
        }

        Self {
            systems: systems.into_iter().collect(),
            cells,
        }
    }

    /// Column axis, sorted
    pub fn systems(&self) -> &[String] {
        &self.systems
    }

    /// Row axis: workflows present in the summary, ascending
    pub fn workflows(&self) -> Vec<Workflow> {
        self.cells.keys().copied().collect()
    }

    /// Cell value; absent combinations are zero
    pub fn get(&self, workflow: Workflow, system: &str) -> usize {
        self.cells
            .get(&workflow)
            .and_then(|row| row.get(system))
            .copied()
            .unwrap_or(0)
    }

    pub fn to_table(&self) -> Table {
        let headers = std::iter::once("Workflow".to_string()).chain(self.systems.iter().cloned());
        let mut table = Table::new(headers);

        for workflow in self.workflows() {
            let cells = std::iter::once(workflow.to_string())
                .chain(self.systems.iter().map(|system| self.get(workflow, system).to_string()));
            table.push_row(cells);
        }

        table
    }
}
