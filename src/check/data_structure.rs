//! Checkers for data-structure features.

use crate::analysis::nodes::{field, has_descendant_of_kind, has_token_child};
use crate::analysis::{AnalysisContext, FeatureSite, Pattern};
use crate::check::{check_kind, check_pattern};

fn declares_array_type(node: tree_sitter::Node) -> bool {
    field(node, "type")
        .map(|ty| ty.kind() == "array_type" || has_descendant_of_kind(ty, "array_type"))
        .unwrap_or(false)
}

/// Variable and state-variable declarations of array type.
pub fn check_array(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new()
            .test("state_variable_declaration", |node, _| {
                declares_array_type(node)
            })
            .test("variable_declaration", |node, _| declares_array_type(node)),
    )
}

/// Struct declarations.
pub fn check_struct(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "struct_declaration")
}

/// Arrays of arrays, arrays of user-defined types, and struct members of
/// user-defined type.
pub fn check_nested_array_or_struct(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new()
            .test("array_type", |node, _| {
                has_descendant_of_kind(node, "array_type")
                    || has_descendant_of_kind(node, "user_defined_type")
            })
            .within(
                "struct_declaration",
                Pattern::new().test("struct_member", |node, _| {
                    field(node, "type")
                        .map(|ty| {
                            ty.kind() == "user_defined_type"
                                || has_descendant_of_kind(ty, "user_defined_type")
                        })
                        .unwrap_or(false)
                }),
            ),
    )
}

/// Enum declarations.
pub fn check_enum(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "enum_declaration")
}

/// Event definitions.
pub fn check_event(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "event_definition")
}

/// `constant` / `immutable` state variables and file-level constants.
/// The keywords surface as anonymous token children of the declaration.
pub fn check_constant_and_immutable_state_variable(
    ctx: &AnalysisContext,
) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new()
            .capture("constant_variable_declaration")
            .test("state_variable_declaration", |node, _| {
                has_token_child(node, "constant") || has_token_child(node, "immutable")
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
    fn array_state_variable() {
        let sites = run(check_array, "contract C { uint[] xs; uint y; }");
        assert_eq!(sites.len(), 1);
        assert!(sites[0].literal.as_deref().unwrap().contains("xs"));
    }

    #[test]
    fn struct_and_enum_and_event() {
        let code = "contract C { struct S { uint x; } enum E { A, B } event Ping(uint v); }";
        assert_eq!(run(check_struct, code).len(), 1);
        assert_eq!(run(check_enum, code).len(), 1);
        assert_eq!(run(check_event, code).len(), 1);
    }

    #[test]
    fn nested_array() {
        let sites = run(check_nested_array_or_struct, "contract C { uint[][] m; }");
        assert!(!sites.is_empty());
    }

    #[test]
    fn struct_member_of_user_defined_type() {
        let sites = run(
            check_nested_array_or_struct,
            "contract C { struct Inner { uint x; } struct Outer { Inner i; } }",
        );
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn flat_types_are_not_nested() {
        let sites = run(
            check_nested_array_or_struct,
            "contract C { uint[] xs; struct S { uint x; } }",
        );
        assert!(sites.is_empty());
    }

    #[test]
    fn constant_and_immutable_state_variables() {
        let sites = run(
            check_constant_and_immutable_state_variable,
            "contract C { uint constant A = 1; uint immutable b; uint c; }",
        );
        assert_eq!(sites.len(), 2);
    }
}
