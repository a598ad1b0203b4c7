//! Blocks world integration tests.
//!
//! Two problem-spaces, three rules, constants and mixed operators.

use delta_core::PrimKind;
use delta_tests::prelude::*;

mod shape {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("blocks_shape")
            .fixture("blocks_world.delta")
            .expect(|a| {
                a.contexts(2)
                    .context_names(&["blocks", "counting"])
                    .rules(3)
                    .prims(8)
                    .unresolved(0)
            })
    }

    #[test]
    fn test_contexts_rules_and_prims() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_prims_follow_rule_and_condition_order() {
        Scenario::new("blocks_prim_order")
            .fixture("blocks_world.delta")
            .expect(|a| {
                a.assert_fn(|compiled| {
                    let kinds: Vec<PrimKind> =
                        compiled.container.prims().iter().map(|p| p.kind).collect();
                    kinds
                        == vec![
                            PrimKind::Existence,
                            PrimKind::Equality,
                            PrimKind::Inequality,
                            PrimKind::Negation,
                            PrimKind::GreaterEqual,
                            PrimKind::LessThan,
                            PrimKind::LessEqual,
                            PrimKind::GreaterThan,
                        ]
                })
            })
            .run()
            .unwrap();
    }
}

mod bindings {
    use super::*;

    #[test]
    fn test_chained_reference_paths() {
        Scenario::new("blocks_paths")
            .fixture("blocks_world.delta")
            .expect(|a| {
                a.binds("blocks", "stack-clear", "<b>", "S1.top-state.block")
                    .binds("blocks", "stack-clear", "<under>", "S1.top-state.block.on")
                    .binds("counting", "count-up", "<n>", "S1.counter")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_rules_share_first_occurrence() {
        Scenario::new("blocks_shared")
            .fixture("blocks_world.delta")
            .expect(|a| a.shared("blocks", ("stack-clear", "<b>"), ("unstack", "<b>")))
            .run()
            .unwrap();
    }

    #[test]
    fn test_second_occurrence_branches_at_head_segment() {
        // GIVEN: unstack declares two addresses starting with top-state
        // WHEN: the tree only holds one top-state branch
        // THEN: the excess address gets a new top-state sibling
        Scenario::new("blocks_branch")
            .fixture("blocks_world.delta")
            .expect(|a| {
                a.distinct("blocks", ("unstack", "<b>"), ("unstack", "<c>"))
                    .binds("blocks", "unstack", "<c>", "S1.top-state.block")
                    .children("blocks", "S1", "top-state", 2)
                    .children("blocks", "S1.top-state", "block", 1)
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_constant_tables() {
        Scenario::new("blocks_consts")
            .fixture("blocks_world.delta")
            .expect(|a| {
                a.consts("blocks", "stack-clear", &["red"])
                    .consts("blocks", "unstack", &[])
                    .consts("counting", "count-up", &["10", "100"])
            })
            .run()
            .unwrap();
    }
}

mod output {
    use super::*;

    #[test]
    fn test_rendered_sections() {
        Scenario::new("blocks_output")
            .fixture("blocks_world.delta")
            .expect(|a| {
                a.output_contains("###\r\n# BLOCKS\r\n###\r\n")
                    .output_contains("###\r\n# COUNTING\r\n###\r\n")
                    .output_contains("(<drule-1> ^op-name |stack|\r\n\t^description |stack a clear block|")
                    .output_contains("\t^prop-type greater_equal\r\n")
                    .output_contains("\t^0 10\r\n\t^1 100) \r\n")
                    .output_contains("(<prop-C8> ^name |_PC8|")
            })
            .run()
            .unwrap();
    }
}
