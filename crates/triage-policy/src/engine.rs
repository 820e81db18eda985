//! Workflow resolution engine

use std::path::Path;
use tracing::debug;
use triage_core::{Result, Workflow};

use crate::condition::RuleFacts;
use crate::rule::RuleSet;

/// Resolves a workflow from record facts, first match wins
#[derive(Debug, Clone)]
pub struct WorkflowResolver {
    rule_set: RuleSet,
}

impl WorkflowResolver {
    /// Create a resolver over a validated rule set
    pub fn new(rule_set: RuleSet) -> Result<Self> {
        rule_set.validate()?;
        Ok(Self { rule_set })
    }

    /// Resolver using the standard routing
    pub fn standard() -> Self {
        Self {
            rule_set: RuleSet::standard(),
        }
    }

    /// Load a rule set from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(RuleSet::from_file(path)?)
    }

    /// Evaluate rules top to bottom and stop at the first match
    ///
    /// Falls back to [`Workflow::Unmatched`] when no rule applies.
    pub fn resolve(&self, facts: &RuleFacts) -> Resolution {
        for rule in self.rule_set.rules.iter().filter(|r| r.enabled) {
            if rule.condition.matches(facts) {
                return Resolution {
                    workflow: rule.workflow,
                    rule_name: Some(rule.name.clone()),
                };
            }
        }

        debug!(rule_set = %self.rule_set.name, ?facts, "No workflow rule matched");
        Resolution::unmatched()
    }

    /// Workflow only
    pub fn workflow(&self, facts: &RuleFacts) -> Workflow {
        self.resolve(facts).workflow
    }

    /// Get the active rule set
    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }
}

impl Default for WorkflowResolver {
    fn default() -> Self {
        Self::standard()
    }
}

/// Outcome of resolving one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Assigned workflow
    pub workflow: Workflow,

    /// Name of the rule that matched, if any
    pub rule_name: Option<String>,
}

impl Resolution {
    pub fn unmatched() -> Self {
        Self {
            workflow: Workflow::Unmatched,
            rule_name: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.rule_name.is_some()
    }
}
