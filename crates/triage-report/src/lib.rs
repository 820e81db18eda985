//! Triage Reporting
//!
//! Turns classified records into the tables handed to export:
//! - Event summary: one row per (workflow, source file, source system) with
//!   distinct and GFE-tainted event counts
//! - Row summary: the same grouping without event deduplication
//! - GFE pivot: workflows down, source systems across
//! - Table views: filter, sort and column statistics over any table

pub mod pivot;
pub mod summary;
pub mod view;

pub use pivot::GfePivot;
pub use summary::{EventSummary, EventSummaryRow, RowSummary, RowSummaryRow, SummaryKey};
pub use view::{ColumnFilter, SortOrder, SortSpec, TableStats, TableView};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::pivot::GfePivot;
    pub use crate::summary::{EventSummary, RowSummary};
    pub use crate::view::{SortOrder, TableStats, TableView};
}
