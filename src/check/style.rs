//! Checkers for code-style features. Comment-level features are not
//! tree-representable and use lexical matching against the raw source.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::nodes::text;
use crate::analysis::{AnalysisContext, FeatureSite, Pattern};
use crate::check::{check_lexical, check_pattern};

static SPDX_LICENSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//\s*SPDX-License-Identifier:").unwrap());

static NATSPEC: Lazy<Regex> = Lazy::new(|| Regex::new(r"///|/\*\*").unwrap());

/// `// SPDX-License-Identifier: …` comment markers.
pub fn check_spdx_license_identifier(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_lexical(ctx, &SPDX_LICENSE)
}

/// NatSpec comment markers (`///` or `/**`).
pub fn check_natspec_comment(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    check_lexical(ctx, &NATSPEC)
}

/// Imports that rename, via `import "x" as y` or `import {a as b} from "x"`.
pub fn check_import_renaming(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().test("import_directive", move |node, _| {
            text(node, code).split_whitespace().any(|word| word == "as")
        }),
    )
}

/// `pragma solidity …` directives.
pub fn check_pragma_solidity_version(ctx: &AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> {
    let code = ctx.code();
    check_pattern(
        ctx,
        Pattern::new().test("pragma_directive", move |node, _| {
            text(node, code).split_whitespace().nth(1) == Some("solidity")
        }),
    )
}
