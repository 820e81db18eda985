//! Configuration for the classification pipeline

use crate::knowledge::{KnowledgeGrouping, DEFAULT_WELL_UNDERSTOOD_THRESHOLD};
use serde::{Deserialize, Serialize};
use triage_core::{Error, Result};

/// Classifier settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Substrings of the communication text that flag a row GFE
    #[serde(default = "default_gfe_keywords")]
    pub gfe_keywords: Vec<String>,

    /// Match GFE keywords ignoring ASCII case
    #[serde(default)]
    pub gfe_case_insensitive: bool,

    /// Minimum global RFR code frequency for "Well Understood"
    #[serde(default = "default_threshold")]
    pub well_understood_threshold: usize,

    /// Key that RFR code diversity is measured over
    #[serde(default)]
    pub knowledge_grouping: KnowledgeGrouping,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            gfe_keywords: default_gfe_keywords(),
            gfe_case_insensitive: false,
            well_understood_threshold: default_threshold(),
            knowledge_grouping: KnowledgeGrouping::Event,
        }
    }
}

impl ClassifierConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Reject settings with no usable GFE keyword or a zero threshold
    pub fn validate(&self) -> Result<()> {
        if self.gfe_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(Error::config("at least one non-empty GFE keyword is required"));
        }
        if self.well_understood_threshold == 0 {
            return Err(Error::config("well_understood_threshold must be at least 1"));
        }
        Ok(())
    }
}

fn default_gfe_keywords() -> Vec<String> {
    vec!["Follow Up for Information".to_string()]
}

fn default_threshold() -> usize {
    DEFAULT_WELL_UNDERSTOOD_THRESHOLD
}
