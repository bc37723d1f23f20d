//! Checkers for special-mechanism features: assembly, gas control,
//! literal forms, and denominated numbers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::nodes::{field, text};
use crate::analysis::{AnalysisContext, FeatureSite, Pattern};
use crate::check::{check_kind, check_lexical, check_pattern};

static UNICODE_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"unicode["']"#).unwrap());

const ETHER_UNITS: &[&str] = &["wei", "szabo", "finney", "gwei", "ether"];
const TIME_UNITS: &[&str] = &["seconds", "minutes", "hours", "days", "weeks", "years"];

/// `pragma experimental SMTChecker;`.
pub fn check_pragma_smt_checker(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().test("pragma_directive", move |node, _| {
            let body = text(node, code);
            body.split_whitespace().nth(1) == Some("experimental") && body.contains("SMTChecker")
        }),
    )
}

/// Explicit gas control: `f{gas: x}(…)` specifiers and old-style
/// `.gas(x)` member calls. Two pattern branches, one per form.
pub fn check_manual_gas_control(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new()
            .within(
                "struct_expression",
                Pattern::new().test("struct_field_assignment", move |node, _| {
                    field(node, "name")
                        .or_else(|| node.named_child(0))
                        .map(|name| text(name, code) == "gas")
                        .unwrap_or(false)
                }),
            )
            .within(
                "call_expression",
                Pattern::new().test("member_expression", move |member, m| {
                    let Some(call) = m.ancestor("call_expression") else {
                        return false;
                    };
                    field(call, "function").map(|f| f.id()) == Some(member.id())
                        && field(member, "property")
                            .map(|p| text(p, code) == "gas")
                            .unwrap_or(false)
                }),
            ),
    )
}

/// Inline assembly blocks.
pub fn check_inline_assembly(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "assembly_statement")
}

/// `unicode"…"` string literals (lexical; the marker itself is matched).
pub fn check_unicode_literal(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_lexical(ctx, &UNICODE_LITERAL)
}

/// `hex"…"` literals.
pub fn check_hexadecimal_literal(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_kind(ctx, "hex_string_literal")
}

fn denominated_checker<'p>(ctx: &AnalysisContext<'p>, units: &'static [&'static str]) -> Pattern<'p> {
    let code = ctx.code();
    Pattern::new().test("number_literal", move |node, _| {
        text(node, code)
            .split_whitespace()
            .last()
            .map(|word| units.contains(&word))
            .unwrap_or(false)
    })
}

/// Number literals denominated in ether units (`1 ether`, `2 gwei`, …).
pub fn check_ether_unit(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let pattern = denominated_checker(ctx, ETHER_UNITS);
    check_pattern(ctx, pattern)
}

/// Number literals denominated in time units (`3 days`, `1 hours`, …).
pub fn check_time_unit(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let pattern = denominated_checker(ctx, TIME_UNITS);
    check_pattern(ctx, pattern)
}
