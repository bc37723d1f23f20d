//! Checkers for inheritance and other object-oriented features.

use crate::analysis::nodes::{
    count_descendants_of_kind, field, has_child_of_kind, text,
};
use crate::analysis::{AnalysisContext, FeatureSite, Pattern};
use crate::check::{check_kind, check_pattern};

/// Contracts with exactly one base contract.
pub fn check_single_inheritance(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("contract_declaration", |node, _| {
            count_descendants_of_kind(node, "inheritance_specifier") == 1
        }),
    )
}

/// Contracts with more than one base contract.
pub fn check_multiple_inheritance(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("contract_declaration", |node, _| {
            count_descendants_of_kind(node, "inheritance_specifier") > 1
        }),
    )
}

/// Calls dispatched through `super`.
pub fn check_super_virtual_method_lookup(
    ctx: &AnalysisContext,
) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().within(
            "call_expression",
            Pattern::new().test("member_expression", move |member, _| {
                field(member, "object")
                    .map(|object| text(object, code) == "super")
                    .unwrap_or(false)
            }),
        ),
    )
}

/// Functions carrying an `override` specifier.
pub fn check_function_overriding(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("function_definition", |node, _| {
            has_child_of_kind(node, "override_specifier")
        }),
    )
}

/// Modifiers carrying an `override` specifier.
pub fn check_function_modifier_overriding(
    ctx: &AnalysisContext,
) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("modifier_definition", |node, _| {
            has_child_of_kind(node, "override_specifier")
        }),
    )
}

/// `abstract contract` declarations.
pub fn check_abstract_contract(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().test("contract_declaration", move |node, _| {
            text(node, code).trim_start().starts_with("abstract")
        }),
    )
}

/// Interface declarations.
pub fn check_interface(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "interface_declaration")
}

/// Library declarations.
pub fn check_library(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "library_declaration")
}

/// State variables carrying an explicit visibility.
pub fn check_state_variable_visibility(
    ctx: &AnalysisContext,
) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("state_variable_declaration", |node, _| {
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
    fn single_vs_multiple_inheritance() {
        let code = "contract A {} contract B {} \
                    contract One is A {} contract Many is A, B {}";
        let single = run(check_single_inheritance, code);
        assert_eq!(single.len(), 1);
        assert!(single[0].literal.as_deref().unwrap().contains("One"));
        let multiple = run(check_multiple_inheritance, code);
        assert_eq!(multiple.len(), 1);
        assert!(multiple[0].literal.as_deref().unwrap().contains("Many"));
    }

    #[test]
    fn super_lookup() {
        let sites = run(
            check_super_virtual_method_lookup,
            "contract A { function f() public virtual {} } \
             contract B is A { function f() public virtual override { super.f(); } }",
        );
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].literal.as_deref(), Some("super.f"));
    }

    #[test]
    fn overriding_function_and_modifier() {
        let code = "contract A { function f() public virtual {} } \
                    contract B is A { function f() public override {} }";
        assert_eq!(run(check_function_overriding, code).len(), 1);
        assert!(run(check_function_modifier_overriding, code).is_empty());
    }

    #[test]
    fn abstract_contract() {
        let code = "abstract contract A { function f() public virtual; } contract B {}";
        let sites = run(check_abstract_contract, code);
        assert_eq!(sites.len(), 1);
        assert!(sites[0].literal.as_deref().unwrap().starts_with("abstract"));
    }

    #[test]
    fn interface_and_library() {
        let code = "interface I { function f() external; } library L {}";
        assert_eq!(run(check_interface, code).len(), 1);
        assert_eq!(run(check_library, code).len(), 1);
    }

    #[test]
    fn state_variable_visibility() {
        let code = "contract C { uint public a; uint b; }";
        let sites = run(check_state_variable_visibility, code);
        assert_eq!(sites.len(), 1);
        assert!(sites[0].literal.as_deref().unwrap().contains("public"));
    }
}
