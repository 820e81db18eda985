//! Core types for triage

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One input row with its canonical fields extracted
///
/// Missing cells are stored as empty strings. `raw` keeps every original
/// cell so that non-canonical columns pass through to the output untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Logical grouping key identifying the same product event across rows
    pub event_key: String,

    /// Finer line-item key, used only when knowledge is grouped by sub-event
    pub sub_event_key: String,

    /// Free-text communication; a GFE keyword here flags the row
    pub communication: String,

    /// Reason-for-report code
    pub rfr_code: String,

    /// Raw country or region name
    pub country: String,

    /// Free-text reportability determinations
    pub reportability: String,

    /// Name of the source dataset the row came from
    pub source_file: String,

    /// Originating system identifier
    pub source_system: String,

    /// Every original cell keyed by column name
    #[serde(default)]
    pub raw: HashMap<String, String>,
}

impl Record {
    /// Create a record for an event in a source, all other fields empty
    pub fn new(event_key: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            event_key: event_key.into(),
            source_file: source_file.into(),
            ..Self::default()
        }
    }

    pub fn with_communication(mut self, communication: impl Into<String>) -> Self {
        self.communication = communication.into();
        self
    }

    pub fn with_rfr_code(mut self, rfr_code: impl Into<String>) -> Self {
        self.rfr_code = rfr_code.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_reportability(mut self, reportability: impl Into<String>) -> Self {
        self.reportability = reportability.into();
        self
    }

    pub fn with_source_system(mut self, source_system: impl Into<String>) -> Self {
        self.source_system = source_system.into();
        self
    }

    pub fn with_sub_event_key(mut self, sub_event_key: impl Into<String>) -> Self {
        self.sub_event_key = sub_event_key.into();
        self
    }

    /// Original cell for a column, empty when absent
    pub fn raw_value(&self, column: &str) -> &str {
        self.raw.get(column).map(String::as_str).unwrap_or("")
    }
}

/// The combined dataset from every usable source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Union of source headers in first-seen order
    pub columns: Vec<String>,

    /// All records, in source order
    pub records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from records with no pass-through columns
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            columns: Vec::new(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whether an event's reason-for-report pattern is well understood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnowledgeClass {
    #[serde(rename = "Well Understood")]
    WellUnderstood,
    #[serde(rename = "Not Well Understood")]
    NotWellUnderstood,
}

impl KnowledgeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WellUnderstood => "Well Understood",
            Self::NotWellUnderstood => "Not Well Understood",
        }
    }

    pub fn is_understood(&self) -> bool {
        matches!(self, Self::WellUnderstood)
    }
}

impl fmt::Display for KnowledgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Region memberships of a country; at most one flag is ever set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFacts {
    pub is_us: bool,
    pub is_eu: bool,
    pub is_canada: bool,
    pub is_japan: bool,
    pub is_greater_china: bool,
}

impl RegionFacts {
    /// Outside the US and outside every other named region
    pub fn is_ous_other(&self) -> bool {
        !self.is_us && !self.is_eu && !self.is_canada && !self.is_japan && !self.is_greater_china
    }

    /// Number of memberships that hold
    pub fn membership_count(&self) -> usize {
        [
            self.is_us,
            self.is_eu,
            self.is_canada,
            self.is_japan,
            self.is_greater_china,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }
}

/// Regulatory workflow assigned to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Workflow {
    /// No rule matched; surfaced for data-quality follow-up
    Unmatched,
    /// US domestic, well understood, not FDA reportable
    UsNonReportable,
    /// Well understood and either US FDA reportable, EU or Canada
    UnderstoodRegulated,
    /// US, EU or Canada and not well understood
    NotUnderstoodRegulated,
    /// Outside the US and every other named region
    OusOther,
    /// Japan or Greater China
    JapanGreaterChina,
}

impl Workflow {
    /// All workflows in code order
    pub const ALL: [Workflow; 6] = [
        Self::Unmatched,
        Self::UsNonReportable,
        Self::UnderstoodRegulated,
        Self::NotUnderstoodRegulated,
        Self::OusOther,
        Self::JapanGreaterChina,
    ];

    /// Integer workflow code, 0 through 5
    pub fn code(&self) -> u8 {
        match self {
            Self::Unmatched => 0,
            Self::UsNonReportable => 1,
            Self::UnderstoodRegulated => 2,
            Self::NotUnderstoodRegulated => 3,
            Self::OusOther => 4,
            Self::JapanGreaterChina => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

impl TryFrom<u8> for Workflow {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("workflow code must be 0-5, got {}", code))
    }
}

impl From<Workflow> for u8 {
    fn from(workflow: Workflow) -> Self {
        workflow.code()
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A record decorated with every derived attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub record: Record,

    /// Row carries a GFE keyword
    pub is_gfe: bool,

    /// Row-level knowledge, before escalation
    pub knowledge_class: KnowledgeClass,

    /// Knowledge after escalation; uniform within an event
    pub event_knowledge_class: KnowledgeClass,

    /// Any row of the event is GFE; uniform within an event
    pub event_is_gfe: bool,

    pub workflow: Workflow,
}
