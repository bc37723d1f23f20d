//! Checkers for function-semantics features.

use std::collections::HashSet;

use crate::analysis::nodes::{child_of_kind, descendants_of_kind, field, has_child_of_kind, text};
use crate::analysis::{capture_site, AnalysisContext, FeatureSite, Pattern, Visit};
use crate::check::{check_kind, check_pattern, run_visitor};

/// Functions declaring more than one return value.
pub fn check_returning_multiple_value(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("function_definition", |node, _| {
            child_of_kind(node, "return_type_definition")
                .map(|returns| descendants_of_kind(returns, "parameter").len() > 1)
                .unwrap_or(false)
        }),
    )
}

/// A direct call, inside a function body, to the enclosing function's
/// own name. The identifier must be the callee itself, so member
/// properties that happen to share the name (e.g. `super.f()` inside
/// `f`) do not count.
pub fn check_recursion(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().within(
            "function_definition",
            Pattern::new().within(
                "call_expression",
                Pattern::new().test("identifier", move |node, m| {
                    let (Some(def), Some(call)) = (
                        m.ancestor("function_definition"),
                        m.ancestor("call_expression"),
                    ) else {
                        return false;
                    };
                    field(call, "function").map(|f| f.id()) == Some(node.id())
                        && field(def, "name")
                            .map(|name| text(name, code) == text(node, code))
                            .unwrap_or(false)
                }),
            ),
        ),
    )
}

/// Function-typed values (function types as first-class citizens).
pub fn check_first_class_function(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "function_type")
}

fn mutability_checker<'p>(ctx: &AnalysisContext<'p>, keyword: &'static str) -> Pattern<'p> {
    let code = ctx.code();
    Pattern::new().test("function_definition", move |node, _| {
        child_of_kind(node, "state_mutability")
            .map(|m| text(m, code) == keyword)
            .unwrap_or(false)
    })
}

pub fn check_pure_function(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let pattern = mutability_checker(ctx, "pure");
    check_pattern(ctx, pattern)
}

pub fn check_view_function(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let pattern = mutability_checker(ctx, "view");
    check_pattern(ctx, pattern)
}

/// Pre-0.5 `constant` functions, kept for historic sources.
pub fn check_constant_function(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let pattern = mutability_checker(ctx, "constant");
    check_pattern(ctx, pattern)
}

/// Every modifier definition.
pub fn check_function_modifier(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "modifier_definition")
}

/// Calls passing arguments by name: `f({b: 2, a: 1})`.
pub fn check_named_call(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("call_expression", |node, _| {
            descendants_of_kind(node, "call_argument")
                .iter()
                .any(|arg| !descendants_of_kind(*arg, "struct_field_assignment").is_empty())
        }),
    )
}

/// Functions defined at file level, outside any contract, interface, or
/// library body.
///
/// The pattern language has no absence-of-ancestor construct, so this
/// checker drives the primitive traversal directly.
pub fn check_free_function(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    const CONTAINERS: &[&str] = &[
        "contract_declaration",
        "interface_declaration",
        "library_declaration",
    ];

    struct FreeFunctionScan<'c, 'p> {
        ctx: &'c AnalysisContext<'p>,
        container_depth: usize,
        sites: Vec<FeatureSite>,
    }

    impl<'c, 'p> Visit<'p> for FreeFunctionScan<'c, 'p> {
        fn enter(&mut self, node: tree_sitter::Node<'p>) {
            let kind = node.kind();
            if CONTAINERS.contains(&kind) {
                self.container_depth += 1;
            } else if kind == "function_definition" && self.container_depth == 0 {
                self.sites.push(capture_site(self.ctx, node));
            }
        }

        fn exit(&mut self, node: tree_sitter::Node<'p>) {
            if CONTAINERS.contains(&node.kind()) {
                self.container_depth -= 1;
            }
        }
    }

    let mut scan = FreeFunctionScan {
        ctx,
        container_depth: 0,
        sites: Vec::new(),
    };
    run_visitor(ctx, &mut scan);
    Ok(scan.sites)
}

/// Functions naming their return values: `returns (uint a)`.
pub fn check_return_variable(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("function_definition", |node, _| {
            child_of_kind(node, "return_type_definition")
                .map(|returns| {
                    descendants_of_kind(returns, "parameter")
                        .iter()
                        .any(|p| field(*p, "name").is_some())
                })
                .unwrap_or(false)
        }),
    )
}

/// Fallback functions (`fallback () external { … }`).
pub fn check_fallback_function(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().test("fallback_receive_definition", move |node, _| {
            !text(node, code).trim_start().starts_with("receive")
        }),
    )
}

/// Receive-ether functions (`receive () external payable { … }`).
pub fn check_receive_ether_function(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().test("fallback_receive_definition", move |node, _| {
            text(node, code).trim_start().starts_with("receive")
        }),
    )
}

/// A function name defined more than once within one contract.
///
/// De-duplication state lives for the duration of this call only: the
/// first definition of each (contract, name) pair is remembered, every
/// later one is a match.
pub fn check_function_overloading(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    let mut seen: HashSet<String> = HashSet::new();
    check_pattern(
        ctx,
        Pattern::new().within(
            "contract_declaration",
            Pattern::new().test("function_definition", move |node, m| {
                let Some(contract) = m.ancestor("contract_declaration") else {
                    return false;
                };
                let (Some(contract_name), Some(function_name)) =
                    (field(contract, "name"), field(node, "name"))
                else {
                    return false;
                };
                let qualified =
                    format!("{}.{}", text(contract_name, code), text(function_name, code));
                !seen.insert(qualified)
            }),
        ),
    )
}

/// Functions carrying an explicit visibility (anything but the default).
pub fn check_function_visibility(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("function_definition", |node, _| {
            has_child_of_kind(node, "visibility")
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, SourceFile};

    fn run(
        checker: fn(&AnalysisContext) -> anyhow::Result<Vec<FeatureSite>>,
        code: &str,
    ) -> Vec<FeatureSite> {
        let parsed = parse(&SourceFile::new("test.sol", code)).unwrap();
        let ctx = AnalysisContext::new(&parsed);
        checker(&ctx).unwrap()
    }

    #[test]
    fn recursion_matches_self_call_only() {
        let sites = run(
            check_recursion,
            "contract C { function f() public { f(); g(); } function g() public {} }",
        );
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].literal.as_deref(), Some("f"));
    }

    #[test]
    fn no_recursion_in_plain_calls() {
        let sites = run(
            check_recursion,
            "contract C { function f() public { g(); } function g() public {} }",
        );
        assert!(sites.is_empty());
    }

    #[test]
    fn multiple_return_values() {
        let sites = run(
            check_returning_multiple_value,
            "contract C { function f() public returns (uint, uint) { return (1, 2); } }",
        );
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn single_return_value_does_not_match() {
        let sites = run(
            check_returning_multiple_value,
            "contract C { function f() public returns (uint) { return 1; } }",
        );
        assert!(sites.is_empty());
    }

    #[test]
    fn pure_and_view_are_distinguished() {
        let code = "contract C { uint s; \
                    function p(uint a) public pure returns (uint) { return a; } \
                    function v() public view returns (uint) { return s; } }";
        assert_eq!(run(check_pure_function, code).len(), 1);
        assert_eq!(run(check_view_function, code).len(), 1);
    }

    #[test]
    fn named_return_variable() {
        let sites = run(
            check_return_variable,
            "contract C { function f() public returns (uint a) { a = 1; } }",
        );
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn free_function_outside_contract() {
        let sites = run(
            check_free_function,
            "contract C { function inside() public {} } function outside(uint a) pure returns (uint) { return a; }",
        );
        assert_eq!(sites.len(), 1);
        assert!(sites[0].literal.as_deref().unwrap().contains("outside"));
    }

    #[test]
    fn overloading_detects_second_definition() {
        let sites = run(
            check_function_overloading,
            "contract C { function f(uint a) public {} function f(uint a, uint b) public {} }",
        );
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn same_name_in_different_contracts_is_not_overloading() {
        let sites = run(
            check_function_overloading,
            "contract C { function f() public {} } contract D { function f() public {} }",
        );
        assert!(sites.is_empty());
    }

    #[test]
    fn explicit_visibility() {
        let sites = run(check_function_visibility, "contract C { function f() public {} }");
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].literal.as_deref(), Some("function f() public {}"));
    }

    #[test]
    fn receive_and_fallback() {
        let code = "contract C { uint a; receive() external payable { a += 1; } \
                    fallback() external { a += 2; } }";
        let receive = run(check_receive_ether_function, code);
        assert_eq!(receive.len(), 1);
        assert!(receive[0].literal.as_deref().unwrap().starts_with("receive"));
        let fallback = run(check_fallback_function, code);
        assert_eq!(fallback.len(), 1);
        assert!(fallback[0].literal.as_deref().unwrap().starts_with("fallback"));
    }

    #[test]
    fn modifier_definition() {
        let sites = run(check_function_modifier, "contract C { modifier m() { _; } }");
        assert_eq!(sites.len(), 1);
    }
}
