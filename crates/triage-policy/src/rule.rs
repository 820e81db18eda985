//! Workflow rule sets

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use triage_core::{Error, Result, Workflow};

use crate::condition::{Condition, RegionName};

/// An ordered list of workflow rules
///
/// Order is significant: the first enabled rule whose condition matches
/// decides the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rule set name
    pub name: String,

    /// Description of the routing this set implements
    #[serde(default)]
    pub description: String,

    /// Version of the rule set
    #[serde(default)]
    pub version: String,

    /// Regulatory framework this set supports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<String>,

    /// Rules, highest priority first
    pub rules: Vec<WorkflowRule>,
}

impl RuleSet {
    /// Load a rule set from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let rule_set: Self = serde_yaml::from_str(yaml)?;
        rule_set.validate()?;
        Ok(rule_set)
    }

    /// Load a rule set from a file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::rule(format!("failed to read rule set {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Reject empty sets and duplicate rule names
    pub fn validate(&self) -> Result<()> {
        if !self.rules.iter().any(|r| r.enabled) {
            return Err(Error::rule(format!("rule set '{}' has no enabled rules", self.name)));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(Error::rule(format!(
                    "rule set '{}' defines rule '{}' more than once",
                    self.name, rule.name
                )));
            }
        }

        Ok(())
    }

    /// The standard post-market routing
    ///
    /// 1. US, well understood, not FDA reportable
    /// 2. Well understood and US FDA reportable, EU or Canada
    /// 3. US, EU or Canada and not well understood
    /// 4. Outside every named region
    /// 5. Japan or Greater China
    pub fn standard() -> Self {
        use RegionName::*;

        Self {
            name: "standard-routing".to_string(),
            description: "Post-market product event routing by region, reportability and knowledge"
                .to_string(),
            version: "1.0".to_string(),
            regulation: Some("21 CFR 803".to_string()),
            rules: vec![
                WorkflowRule::new(
                    "us-non-reportable",
                    "US domestic, well understood, not FDA reportable",
                    Condition::all(vec![
                        Condition::region(Us),
                        Condition::not(Condition::FdaReportable),
                        Condition::WellUnderstood,
                    ]),
                    Workflow::UsNonReportable,
                ),
                WorkflowRule::new(
                    "understood-regulated",
                    "Well understood and US FDA reportable, EU or Canada",
                    Condition::all(vec![
                        Condition::WellUnderstood,
                        Condition::any(vec![
                            Condition::all(vec![Condition::region(Us), Condition::FdaReportable]),
                            Condition::region(Eu),
                            Condition::region(Canada),
                        ]),
                    ]),
                    Workflow::UnderstoodRegulated,
                ),
                WorkflowRule::new(
                    "not-understood-regulated",
                    "US, EU or Canada and not well understood",
                    Condition::all(vec![
                        Condition::any(vec![
                            Condition::region(Us),
                            Condition::region(Eu),
                            Condition::region(Canada),
                        ]),
                        Condition::not(Condition::WellUnderstood),
                    ]),
                    Workflow::NotUnderstoodRegulated,
                ),
                WorkflowRule::new(
                    "ous-other",
                    "Outside the US and every other named region",
                    Condition::region(OusOther),
                    Workflow::OusOther,
                ),
                WorkflowRule::new(
                    "japan-greater-china",
                    "Japan or Greater China",
                    Condition::any(vec![Condition::region(Japan), Condition::region(GreaterChina)]),
                    Workflow::JapanGreaterChina,
                ),
            ],
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// A single rule within a rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRule {
    /// Rule identifier
    pub name: String,

    /// Description of what this rule routes
    #[serde(default)]
    pub description: String,

    /// Condition the record's facts must satisfy
    pub condition: Condition,

    /// Workflow assigned on match
    pub workflow: Workflow,

    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl WorkflowRule {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        condition: Condition,
        workflow: Workflow,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            condition,
            workflow,
            enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}
