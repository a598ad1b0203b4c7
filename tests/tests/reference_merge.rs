//! Reference-graph merge integration tests.

use delta_compiler::Target;
use delta_tests::prelude::*;

mod multi_attribute {
    use super::*;

    #[test]
    fn test_positional_reuse_across_rules() {
        // GIVEN: one, two and three cart.item references in successive rules
        // WHEN: the context is merged
        // THEN: each rule reuses existing branches first and only adds the excess
        Scenario::new("multi_attribute")
            .fixture("multi_attribute.delta")
            .expect(|a| {
                a.children("shopping", "S1", "cart", 3)
                    .shared("shopping", ("pick-one", "<i>"), ("compare-two", "<a>"))
                    .shared("shopping", ("pick-one", "<i>"), ("compare-three", "<x>"))
                    .shared("shopping", ("compare-two", "<b>"), ("compare-three", "<y>"))
                    .distinct("shopping", ("compare-two", "<a>"), ("compare-two", "<b>"))
                    .distinct("shopping", ("compare-three", "<y>"), ("compare-three", "<z>"))
                    .binds("shopping", "compare-three", "<z>", "S1.cart.item")
                    .prims(3)
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_head_grouping_is_selected_by_config() {
        // GIVEN: a nested item chain declared by one rule
        // WHEN: candidates are grouped by first segment only
        // THEN: the nested address is paired at the root as a second item
        let source = "(problem-space p (ins r (operator o) \
                        (ref (S1 item <a>) (<a> item <b>)) \
                        (condition (? <b> x))))";

        Scenario::new("head_grouping")
            .source(source)
            .config(DeltaConfig::default().with_grouping(CandidateGrouping::Head))
            .expect(|a| {
                a.children("p", "S1", "item", 2)
                    .binds("p", "r", "<b>", "S1.item")
                    .distinct("p", ("r", "<a>"), ("r", "<b>"))
            })
            .run()
            .unwrap();

        Scenario::new("source_grouping")
            .source(source)
            .expect(|a| {
                a.children("p", "S1", "item", 1)
                    .binds("p", "r", "<b>", "S1.item.item")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_same_variable_twice_is_one_node() {
        Scenario::new("same_variable")
            .source(
                "(problem-space p (ins r (operator o) \
                   (ref (S1 item <a>) (S1 item <a>)) \
                   (condition (== <a> x <a> y))))",
            )
            .expect(|a| {
                a.children("p", "S1", "item", 1).assert_fn(|compiled| {
                    let prim = &compiled.container.prims()[0];
                    prim.second.as_ref().map(|s| s.target) == Some(prim.first.target)
                })
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_same_head_from_different_sources() {
        Scenario::new("different_sources")
            .source(
                "(problem-space p (ins r (operator o) \
                   (ref (S1 left <l>) (S1 right <r>) (<l> item <a>) (<r> item <b>))))",
            )
            .expect(|a| {
                a.binds("p", "r", "<a>", "S1.left.item")
                    .binds("p", "r", "<b>", "S1.right.item")
            })
            .run()
            .unwrap();
    }
}

mod ordering {
    use super::*;

    #[test]
    fn test_source_declared_after_use() {
        Scenario::new("out_of_order")
            .fixture("out_of_order.delta")
            .expect(|a| {
                a.binds("navigation", "go-north", "<room>", "S1.location.room")
                    .binds("navigation", "go-north", "<door>", "S1.location.room.exit.north")
                    .binds(
                        "navigation",
                        "go-north",
                        "<s>",
                        "S1.location.room.exit.north.state",
                    )
                    .consts("navigation", "go-north", &["open"])
                    .prims(2)
                    .unresolved(0)
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_constant_operand_targets_rule_table() {
        Scenario::new("const_target")
            .fixture("out_of_order.delta")
            .expect(|a| {
                a.assert_fn(|compiled| {
                    let prim = &compiled.container.prims()[0];
                    prim.second.as_ref().map(|s| (s.target, s.attr.as_str()))
                        == Some((Target::Constants, "0"))
                })
            })
            .run()
            .unwrap();
    }
}

mod single_chain {
    use super::*;

    #[test]
    fn test_minimal_input_yields_exact_tree() {
        Scenario::new("minimal")
            .source(
                "(instruct-elabs (problem-space p (ins r (operator o) \
                   (ref (S1 foo.bar <y>)) (condition (? <y> z)))))",
            )
            .expect(|a| {
                a.contexts(1)
                    .prims(1)
                    .binds("p", "r", "<y>", "S1.foo.bar")
                    .output_contains(
                        "### WM-SPACE ###\r\n\
                         (<wm-1> ^attribute S1\r\n\t^child <wm-2>) \r\n\
                         (<wm-2> ^attribute foo\r\n\t^child <wm-3>) \r\n\
                         (<wm-3> ^attribute bar) \r\n\
                         ### RULES ###\r\n",
                    )
                    .assert_fn(|compiled| compiled.output.matches("^elab-context-name").count() == 1)
            })
            .run()
            .unwrap();
    }
}
