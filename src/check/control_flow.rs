//! Checkers for control-flow features: loops, external calls, value
//! transfer, and exceptions.

use crate::analysis::nodes::{field, has_descendant_of_kind, text};
use crate::analysis::{AnalysisContext, FeatureSite, Pattern};
use crate::check::{check_kind, check_kinds, check_pattern};

const LOW_LEVEL_CALLS: &[&str] = &["call", "delegatecall", "staticcall"];
const CALL_PRIMITIVES: &[&str] = &[
    "call",
    "delegatecall",
    "staticcall",
    "send",
    "transfer",
    "gas",
    "value",
];

/// Any loop statement form.
pub fn check_loop(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kinds(
        ctx,
        &["for_statement", "while_statement", "do_while_statement"],
    )
}

/// True when `member` is the callee of `call`.
fn is_callee(call: tree_sitter::Node, member: tree_sitter::Node) -> bool {
    field(call, "function").map(|f| f.id()) == Some(member.id())
}

/// High-level calls into another contract: `d.g()` where the receiver is
/// neither `super`, `this`, nor the enclosing contract, and the member is
/// not one of the low-level call primitives.
pub fn check_cross_contract_invocation_high_level(
    ctx: &AnalysisContext,
) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().within(
            "contract_declaration",
            Pattern::new().within(
                "call_expression",
                Pattern::new().test("member_expression", move |member, m| {
                    let (Some(contract), Some(call)) = (
                        m.ancestor("contract_declaration"),
                        m.ancestor("call_expression"),
                    ) else {
                        return false;
                    };
                    if !is_callee(call, member) {
                        return false;
                    }
                    let Some(object) = field(member, "object") else {
                        return false;
                    };
                    if object.kind() != "identifier" {
                        return false;
                    }
                    let receiver = text(object, code);
                    let own_name = field(contract, "name")
                        .map(|n| text(n, code))
                        .unwrap_or("");
                    let property = field(member, "property")
                        .map(|p| text(p, code))
                        .unwrap_or("");
                    receiver != "super"
                        && receiver != "this"
                        && receiver != own_name
                        && !CALL_PRIMITIVES.contains(&property)
                }),
            ),
        ),
    )
}

/// Low-level calls: `.call`, `.delegatecall`, `.staticcall`, in both the
/// plain form and the `{value: …}` specifier form. Two branches share the
/// `member_expression` leaf; a node satisfying both is captured once.
pub fn check_cross_contract_invocation_low_level(
    ctx: &AnalysisContext,
) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new()
            .within(
                "call_expression",
                Pattern::new().test("member_expression", move |member, m| {
                    let Some(call) = m.ancestor("call_expression") else {
                        return false;
                    };
                    let property = field(member, "property")
                        .map(|p| text(p, code))
                        .unwrap_or("");
                    is_callee(call, member) && LOW_LEVEL_CALLS.contains(&property)
                }),
            )
            .within(
                "struct_expression",
                Pattern::new().test("member_expression", move |member, m| {
                    let Some(wrapper) = m.ancestor("struct_expression") else {
                        return false;
                    };
                    let is_base = wrapper.named_child(0).map(|n| n.id()) == Some(member.id());
                    let property = field(member, "property")
                        .map(|p| text(p, code))
                        .unwrap_or("");
                    is_base && LOW_LEVEL_CALLS.contains(&property)
                }),
            ),
    )
}

fn member_call_checker<'p>(ctx: &AnalysisContext<'p>, name: &'static str) -> Pattern<'p> {
    let code = ctx.code();
    Pattern::new().within(
        "call_expression",
        Pattern::new().test("member_expression", move |member, m| {
            let Some(call) = m.ancestor("call_expression") else {
                return false;
            };
            let property = field(member, "property")
                .map(|p| text(p, code))
                .unwrap_or("");
            is_callee(call, member) && property == name
        }),
    )
}

/// `addr.send(…)`.
pub fn check_send(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let pattern = member_call_checker(ctx, "send");
    check_pattern(ctx, pattern)
}

/// `addr.transfer(…)`.
pub fn check_transfer(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let pattern = member_call_checker(ctx, "transfer");
    check_pattern(ctx, pattern)
}

/// `new D(…)` where the created type is user defined (contract creation,
/// as opposed to `new uint[](n)`).
pub fn check_creating_contract_via_new(
    ctx: &AnalysisContext,
) -> anyhow::Result<Vec<FeatureSite>> {
    check_pattern(
        ctx,
        Pattern::new().test("new_expression", |node, _| {
            has_descendant_of_kind(node, "user_defined_type")
        }),
    )
}

/// `require(…)`, `assert(…)`, `revert(…)` calls and revert statements.
pub fn check_exception_require_assert_revert_throw(
    ctx: &AnalysisContext,
) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new()
            .test("call_expression", move |node, _| {
                field(node, "function")
                    .filter(|callee| callee.kind() == "identifier")
                    .map(|callee| {
                        matches!(text(callee, code), "require" | "assert" | "revert")
                    })
                    .unwrap_or(false)
            })
            .capture("revert_statement"),
    )
}

/// `try … catch` blocks.
pub fn check_exception_try_catch(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "try_statement")
}
