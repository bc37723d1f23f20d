//! The checker protocol and the feature-checker library.
//!
//! A checker is a named function reporting occurrences of one language
//! feature for one parsed file. The concrete checkers are thin declarative
//! specs over the matching engine in [`crate::analysis`]; they differ only
//! in which node kinds and predicates they name. See [`catalog`] for the
//! default bundle.

pub mod catalog;
pub mod control_flow;
pub mod data_structure;
pub mod function;
pub mod inheritance;
pub mod special;
pub mod style;

use regex::Regex;

use crate::analysis::{
    capture_site, compile, walk_tree, AnalysisContext, FeatureSite, Pattern, Visit,
};

/// The check function of one feature checker.
///
/// Checkers are synchronous: every traversal resolves once the walk
/// finishes, so there is no suspension point to model. Errors propagate
/// and abort the whole engine call.
pub type CheckFn =
    Box<dyn Fn(&AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> + Send + Sync>;

/// A named feature checker.
///
/// Stateless across invocations; a checker that needs de-duplication
/// state (e.g. tracking names seen so far) creates it fresh inside each
/// call.
pub struct FeatureChecker {
    pub name: String,
    pub check: CheckFn,
}

impl FeatureChecker {
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&AnalysisContext) -> anyhow::Result<Vec<FeatureSite>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

impl std::fmt::Debug for FeatureChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureChecker")
            .field("name", &self.name)
            .finish()
    }
}

/// Capture every node of one kind, unconditionally.
pub fn check_kind(ctx: &AnalysisContext, kind: &'static str) -> anyhow::Result<Vec<FeatureSite>> {
    check_kinds(ctx, &[kind])
}

/// Capture every node whose kind is in the list, in document order.
/// Used when a feature is the union of several syntactic forms.
pub fn check_kinds(ctx: &AnalysisContext, kinds: &[&str]) -> anyhow::Result<Vec<FeatureSite>> {
    struct Collector<'c, 'p, 'k> {
        ctx: &'c AnalysisContext<'p>,
        kinds: &'k [&'k str],
        sites: Vec<FeatureSite>,
    }
    impl<'c, 'p, 'k> Visit<'p> for Collector<'c, 'p, 'k> {
        fn enter(&mut self, node: tree_sitter::Node<'p>) {
            if self.kinds.contains(&node.kind()) {
                self.sites.push(capture_site(self.ctx, node));
            }
        }
    }

    let mut collector = Collector {
        ctx,
        kinds,
        sites: Vec::new(),
    };
    walk_tree(ctx.root(), &mut collector);
    Ok(collector.sites)
}

/// Compile a structured pattern and run it over the context's tree.
pub fn check_pattern<'p>(
    ctx: &AnalysisContext<'p>,
    pattern: Pattern<'p>,
) -> anyhow::Result<Vec<FeatureSite>> {
    Ok(compile(pattern).run(ctx))
}

/// Scan the raw source text with a regular expression, for features that
/// are not tree-representable. Each match yields a site with only
/// `literal` and `index` populated. `find_iter` advances past every
/// match, so the scan always terminates.
pub fn check_lexical(ctx: &AnalysisContext, regex: &Regex) -> anyhow::Result<Vec<FeatureSite>> {
    Ok(regex
        .find_iter(ctx.code())
        .map(|m| FeatureSite::lexical(m.as_str(), m.start()))
        .collect())
}

/// Drive a hand-written visitor over the context's tree: the primitive
/// traversal, for checkers that need traversal-order state the pattern
/// language cannot express.
pub fn run_visitor<'p>(ctx: &AnalysisContext<'p>, visitor: &mut dyn Visit<'p>) {
    walk_tree(ctx.root(), visitor);
}
