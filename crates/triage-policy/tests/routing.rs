//! Routing properties of the standard rule set

use proptest::prelude::*;
use triage_core::{RegionFacts, Workflow};
use triage_policy::{RuleFacts, RuleSet, WorkflowResolver};

fn arb_region() -> impl Strategy<Value = RegionFacts> {
    (0usize..6).prop_map(|slot| {
        let mut region = RegionFacts::default();
        match slot {
            0 => region.is_us = true,
            1 => region.is_eu = true,
            2 => region.is_canada = true,
            3 => region.is_japan = true,
            4 => region.is_greater_china = true,
            _ => {}
        }
        region
    })
}

fn arb_facts() -> impl Strategy<Value = RuleFacts> {
    (arb_region(), any::<bool>(), any::<bool>()).prop_map(
        |(region, fda_reportable, well_understood)| RuleFacts {
            region,
            fda_reportable,
            well_understood,
        },
    )
}

proptest! {
    #[test]
    fn every_single_region_record_is_routed(facts in arb_facts()) {
        let resolution = WorkflowResolver::standard().resolve(&facts);
        prop_assert!(resolution.is_matched());
        prop_assert_ne!(resolution.workflow, Workflow::Unmatched);
    }

    #[test]
    fn regulated_regions_split_on_knowledge(facts in arb_facts()) {
        let region = facts.region;
        prop_assume!(region.is_us || region.is_eu || region.is_canada);

        let workflow = WorkflowResolver::standard().workflow(&facts);
        if facts.well_understood {
            prop_assert!(matches!(
                workflow,
                Workflow::UsNonReportable | Workflow::UnderstoodRegulated
            ));
        } else {
            prop_assert_eq!(workflow, Workflow::NotUnderstoodRegulated);
        }
    }

    #[test]
    fn workflow_code_is_in_range(facts in arb_facts()) {
        let code = WorkflowResolver::standard().workflow(&facts).code();
        prop_assert!(code <= 5);
    }
}

#[test]
fn us_reportable_falls_through_to_second_rule() {
    let facts = RuleFacts {
        region: RegionFacts {
            is_us: true,
            ..Default::default()
        },
        fda_reportable: true,
        well_understood: true,
    };

    let resolution = WorkflowResolver::standard().resolve(&facts);
    assert_eq!(resolution.workflow, Workflow::UnderstoodRegulated);
    assert_eq!(resolution.rule_name.as_deref(), Some("understood-regulated"));
}

#[test]
fn resolver_loads_rule_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.yaml");
    std::fs::write(
        &path,
        r#"
name: catch-all
rules:
  - name: japan
    condition:
      type: region
      region: japan
    workflow: 5
  - name: everything-else
    condition:
      type: always
    workflow: 4
"#,
    )
    .unwrap();

    let resolver = WorkflowResolver::from_file(&path).unwrap();
    assert_eq!(resolver.rule_set().name, "catch-all");
    assert_eq!(resolver.workflow(&RuleFacts::default()), Workflow::OusOther);
}

#[test]
fn missing_rule_file_is_a_rule_error() {
    let result = RuleSet::from_file("/nonexistent/rules.yaml");
    assert!(matches!(result, Err(triage_core::Error::Rule(_))));
}

#[test]
fn demo_rule_file_matches_standard_rules() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/rules/standard.yaml");
    let rule_set = RuleSet::from_file(path).unwrap();
    assert_eq!(rule_set, RuleSet::standard());
}
