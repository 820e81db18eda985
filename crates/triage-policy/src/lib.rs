//! Triage Policy Engine
//!
//! Declarative workflow routing for product events.
//!
//! A rule set is an ordered list of rules, each pairing a condition over
//! region membership, FDA reportability and knowledge class with a workflow.
//! Rules are evaluated top to bottom and the first match wins, so rules may
//! overlap and be disambiguated purely by order. The standard routing is
//! built in; alternative sets can be loaded from YAML.

pub mod condition;
pub mod engine;
pub mod rule;

pub use condition::{CompositeOperator, Condition, RegionName, RuleFacts};
pub use engine::{Resolution, WorkflowResolver};
pub use rule::{RuleSet, WorkflowRule};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::condition::{Condition, RegionName, RuleFacts};
    pub use crate::engine::{Resolution, WorkflowResolver};
    pub use crate::rule::{RuleSet, WorkflowRule};
}
