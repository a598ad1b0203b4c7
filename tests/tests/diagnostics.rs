//! Error reporting integration tests.

use delta_tests::prelude::*;

mod syntax {
    use super::*;

    #[test]
    fn test_unclosed_list() {
        Scenario::new("unclosed")
            .source("(problem-space p\n  (ins r)")
            .expect(|a| a.error_kind(ErrorKind::Syntax).error("unbalanced parentheses"))
            .run()
            .unwrap();
    }

    #[test]
    fn test_stray_close() {
        Scenario::new("stray_close")
            .source("(problem-space p))")
            .expect(|a| a.error_kind(ErrorKind::Syntax).error("unexpected ')'"))
            .run()
            .unwrap();
    }

    #[test]
    fn test_unterminated_quote() {
        Scenario::new("unterminated_quote")
            .source("(problem-space p (ins r (description \"never closed)))")
            .expect(|a| a.error_kind(ErrorKind::Syntax).error("malformed quoted atom"))
            .run()
            .unwrap();
    }
}

mod structural {
    use super::*;

    #[test]
    fn test_unknown_command_names_scopes() {
        Scenario::new("unknown_command")
            .source("(problem-space blocks\n  (ins stack\n    (wme foo)))")
            .expect(|a| {
                a.error_kind(ErrorKind::Structural)
                    .error_matches(r"^unknown command at line 3 \(problem-space: blocks, rule: stack\)")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_top_level_error_names_none() {
        Scenario::new("top_level")
            .source("(ins orphan)")
            .expect(|a| {
                a.error_kind(ErrorKind::Structural)
                    .error("problem-space: none, rule: none")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_binary_operator_with_two_elements() {
        Scenario::new("short_binary")
            .source("(problem-space p (ins r (condition (== a.b))))")
            .expect(|a| a.error_kind(ErrorKind::Structural).error("wrong argument count"))
            .run()
            .unwrap();
    }

    #[test]
    fn test_unary_operator_with_extra_element() {
        Scenario::new("long_unary")
            .source("(problem-space p (ins r (condition (? <a> x y))))")
            .expect(|a| a.error_kind(ErrorKind::Structural).error("wrong argument count"))
            .run()
            .unwrap();
    }

    #[test]
    fn test_nested_problem_space() {
        Scenario::new("nested")
            .source("(problem-space outer (problem-space inner))")
            .expect(|a| {
                a.error_kind(ErrorKind::Structural)
                    .error("illegal nesting")
                    .error_matches(r"problem-space: outer, rule: none")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_conflicting_binding() {
        Scenario::new("conflict")
            .source("(problem-space p (ins r (ref (S1 a <x>) (S1 b <x>))))")
            .expect(|a| a.error_kind(ErrorKind::Structural).error("duplicate binding"))
            .run()
            .unwrap();
    }
}

mod resolution {
    use super::*;

    #[test]
    fn test_condition_on_unbound_variable() {
        Scenario::new("unbound")
            .source("(problem-space p (ins r (ref (S1 a <x>)) (condition (? <z> q))))")
            .expect(|a| {
                a.error_kind(ErrorKind::Resolution)
                    .error("Unbound variable '<z>' in rule 'r'")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_unary_const_operand_is_unbound() {
        Scenario::new("unary_const")
            .source("(problem-space p (ins r (operator o) (ref (S1 x <x>)) (condition (? const red))))")
            .expect(|a| {
                a.error_kind(ErrorKind::Resolution)
                    .error("Unbound variable 'const' in rule 'r'")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_leading_const_operand_links_to_constant_block() {
        Scenario::new("leading_const")
            .source("(problem-space p (ins r (operator o) (ref (S1 x <x>)) (condition (== const red <x> color))))")
            .expect(|a| {
                a.consts("p", "r", &["red"])
                    .prims(1)
                    .output_contains("^const <Q1>")
                    .output_contains("(<Q1>")
                    .output_contains("^address1 <Q1>")
                    .output_contains("^address2 <wm-2>")
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_unreachable_address_dropped_by_default() {
        Scenario::new("unreachable_dropped")
            .fixture("unreachable.delta")
            .expect(|a| a.unresolved(1).prims(1).binds("haunted", "wander", "<h>", "S1.hall"))
            .run()
            .unwrap();
    }

    #[test]
    fn test_unreachable_address_with_error_policy() {
        Scenario::new("unreachable_error")
            .fixture("unreachable.delta")
            .config(DeltaConfig::default().with_unresolved(UnresolvedPolicy::ErrorUnresolved))
            .expect(|a| {
                a.error_kind(ErrorKind::Resolution)
                    .error("source variable '<ghost>' is never bound")
            })
            .run()
            .unwrap();
    }
}

mod reader {
    use super::*;

    #[test]
    fn test_comment_line_ignored_with_parentheses() {
        Scenario::new("comment")
            .source("; (problem-space ignored (\n(problem-space kept)")
            .expect(|a| a.context_names(&["kept"]))
            .run()
            .unwrap();
    }

    #[test]
    fn test_quoted_description_kept_verbatim() {
        Scenario::new("quoted")
            .source("(problem-space p (ins r (operator o) (description \"multi word text\")))")
            .expect(|a| {
                a.output_contains("^description |multi word text|")
                    .assert_fn(|compiled| {
                        compiled.container.contexts()[0].rules[0].description == "multi word text"
                    })
            })
            .run()
            .unwrap();
    }

    #[test]
    fn test_accepted_operators_are_configurable() {
        Scenario::new("absent_operator")
            .source("(problem-space p (ins r (ref (S1 a <x>)) (condition (!= <x> v <x> w))))")
            .config(DeltaConfig::default().with_condition_operators(vec![OperatorSymbol::Absent]))
            .expect(|a| a.prims(1).output_contains("^prop-type inexistence"))
            .run()
            .unwrap();
    }
}
