//! Triage Core
//!
//! Core types, traits, and utilities shared across triage components.
//!
//! This crate provides:
//! - The record, dataset and derived-attribute types of the workflow engine
//! - Error types and result handling
//! - A string-cell [`Table`] with CSV input and output
//! - Column mapping and multi-source ingestion

pub mod error;
pub mod ingest;
pub mod schema;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use ingest::{ingest, IngestReport, SourceWorkbook, DEFAULT_TABLE_LABEL};
pub use schema::ColumnMapping;
pub use table::Table;
pub use types::{ClassifiedRecord, Dataset, KnowledgeClass, Record, RegionFacts, Workflow};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::table::Table;
    pub use crate::types::{
        ClassifiedRecord, Dataset, KnowledgeClass, Record, RegionFacts, Workflow,
    };
}
