//! Event-level escalation
//!
//! Row flags are folded per event key into a separate mapping and then read
//! back for every row, so no row is mutated while its group is traversed.
//! A single not-understood row, or a single GFE row, taints its whole event.

use std::collections::HashMap;
use triage_core::{Error, KnowledgeClass, Record, Result};

/// Escalated knowledge and GFE state per event key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRollup {
    events: HashMap<String, EventState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EventState {
    knowledge: KnowledgeClass,
    is_gfe: bool,
}

impl EventRollup {
    /// Fold row-level results; slices are parallel to `records`
    pub fn build(records: &[Record], knowledge: &[KnowledgeClass], gfe: &[bool]) -> Result<Self> {
        if knowledge.len() != records.len() || gfe.len() != records.len() {
            return Err(Error::internal(format!(
                "escalation inputs differ in length: {} records, {} knowledge, {} gfe",
                records.len(),
                knowledge.len(),
                gfe.len()
            )));
        }

        let mut events: HashMap<String, EventState> = HashMap::new();
        for ((record, class), is_gfe) in records.iter().zip(knowledge).zip(gfe) {
            let state = events.entry(record.event_key.clone()).or_insert(EventState {
                knowledge: KnowledgeClass::WellUnderstood,
                is_gfe: false,
            });

            if *class == KnowledgeClass::NotWellUnderstood {
                state.knowledge = KnowledgeClass::NotWellUnderstood;
            }
            state.is_gfe |= *is_gfe;
        }

        Ok(Self { events })
    }

    /// Escalated knowledge for an event; unknown events are not understood
    pub fn event_knowledge(&self, event_key: &str) -> KnowledgeClass {
        self.events
            .get(event_key)
            .map(|s| s.knowledge)
            .unwrap_or(KnowledgeClass::NotWellUnderstood)
    }

    /// Whether any row of the event is GFE
    pub fn event_is_gfe(&self, event_key: &str) -> bool {
        self.events.get(event_key).map(|s| s.is_gfe).unwrap_or(false)
    }

    /// Number of distinct events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of events with at least one GFE row
    pub fn gfe_event_count(&self) -> usize {
        self.events.values().filter(|s| s.is_gfe).count()
    }
}
