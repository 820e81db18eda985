//! Workflow rule conditions

use serde::{Deserialize, Serialize};
use triage_core::RegionFacts;

/// Facts a workflow rule is evaluated against
///
/// Derived only from country, escalated knowledge class and reportability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleFacts {
    pub region: RegionFacts,
    pub fda_reportable: bool,
    pub well_understood: bool,
}

/// Region membership a condition can test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionName {
    Us,
    Eu,
    Canada,
    Japan,
    GreaterChina,
    /// None of the named regions
    OusOther,
}

impl RegionName {
    fn holds(&self, region: &RegionFacts) -> bool {
        match self {
            Self::Us => region.is_us,
            Self::Eu => region.is_eu,
            Self::Canada => region.is_canada,
            Self::Japan => region.is_japan,
            Self::GreaterChina => region.is_greater_china,
            Self::OusOther => region.is_ous_other(),
        }
    }
}

/// Condition for a workflow rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Country belongs to a region
    Region { region: RegionName },

    /// Reportability text carries the US FDA malfunction-reportable marker
    FdaReportable,

    /// Escalated knowledge class is "Well Understood"
    WellUnderstood,

    /// Negation
    Not { condition: Box<Condition> },

    /// Composite condition (AND/OR logic)
    Composite {
        operator: CompositeOperator,
        conditions: Vec<Condition>,
    },

    /// Matches every record
    Always,
}

/// Operator for composite conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeOperator {
    And,
    Or,
}

impl Condition {
    pub fn region(region: RegionName) -> Self {
        Self::Region { region }
    }

    pub fn not(condition: Condition) -> Self {
        Self::Not {
            condition: Box::new(condition),
        }
    }

    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::Composite {
            operator: CompositeOperator::And,
            conditions,
        }
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::Composite {
            operator: CompositeOperator::Or,
            conditions,
        }
    }

    /// Evaluate against a record's facts
    pub fn matches(&self, facts: &RuleFacts) -> bool {
        match self {
            Self::Region { region } => region.holds(&facts.region),
            Self::FdaReportable => facts.fda_reportable,
            Self::WellUnderstood => facts.well_understood,
            Self::Not { condition } => !condition.matches(facts),
            Self::Composite {
                operator: CompositeOperator::And,
                conditions,
            } => conditions.iter().all(|c| c.matches(facts)),
            Self::Composite {
                operator: CompositeOperator::Or,
                conditions,
            } => conditions.iter().any(|c| c.matches(facts)),
            Self::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us_facts(fda_reportable: bool, well_understood: bool) -> RuleFacts {
        RuleFacts {
            region: RegionFacts {
                is_us: true,
                ..Default::default()
            },
            fda_reportable,
            well_understood,
        }
    }

    #[test]
    fn test_region_condition_json() {
        let json = r#"{"type": "region", "region": "greater_china"}"#;
        let condition: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(condition, Condition::region(RegionName::GreaterChina));
    }

    #[test]
    fn test_unit_condition_json() {
        let condition: Condition = serde_json::from_str(r#"{"type": "fda_reportable"}"#).unwrap();
        assert_eq!(condition, Condition::FdaReportable);
    }

    #[test]
    fn test_composite_logic() {
        let condition = Condition::all(vec![
            Condition::region(RegionName::Us),
            Condition::not(Condition::FdaReportable),
        ]);

        assert!(condition.matches(&us_facts(false, true)));
        assert!(!condition.matches(&us_facts(true, true)));

        let either = Condition::any(vec![Condition::FdaReportable, Condition::WellUnderstood]);
        assert!(either.matches(&us_facts(false, true)));
        assert!(!either.matches(&us_facts(false, false)));
    }

    #[test]
    fn test_empty_composites() {
        let facts = RuleFacts::default();
        assert!(Condition::all(vec![]).matches(&facts));
        assert!(!Condition::any(vec![]).matches(&facts));
    }

    #[test]
    fn test_ous_other_region() {
        let facts = RuleFacts::default();
        assert!(Condition::region(RegionName::OusOther).matches(&facts));
        assert!(!Condition::region(RegionName::OusOther).matches(&us_facts(false, false)));
    }
}
