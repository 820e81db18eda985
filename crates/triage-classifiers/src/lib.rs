//! Triage Classifiers
//!
//! Row and event classifiers for product event triage.
//!
//! Classification runs as a strict sequence over an in-memory dataset:
//! - GFE detection: keyword match on the communication text
//! - Knowledge: RFR code diversity per group plus global code frequency
//! - Escalation: any not-understood or GFE row taints its whole event
//! - Region and reportability facts, then first-match-wins workflow routing
//!
//! Every run is synchronous and self-contained; nothing is shared between runs.

pub mod config;
pub mod escalation;
pub mod gfe;
pub mod knowledge;
pub mod pipeline;
pub mod region;

pub use config::ClassifierConfig;
pub use escalation::EventRollup;
pub use gfe::GfeDetector;
pub use knowledge::{KnowledgeClassifier, KnowledgeGrouping, RfrFrequency};
pub use pipeline::{ClassificationPipeline, ClassifiedDataset, PipelineStats, DERIVED_COLUMNS};
pub use region::{is_fda_reportable, normalize_country, region_facts};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::ClassifierConfig;
    pub use crate::pipeline::{ClassificationPipeline, ClassifiedDataset};
    pub use crate::region::{is_fda_reportable, region_facts};
}
