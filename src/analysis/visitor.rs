//! The pattern-matching engine: structured visitors compiled into a
//! single-pass enter/exit tree walk.
//!
//! A [`Pattern`] is a nested specification of node-kind constraints. Each
//! root-to-leaf path through the pattern is one ancestor-chain constraint
//! ending in one boolean predicate. Compilation records those paths once;
//! a single depth-first traversal then evaluates every path against the
//! live ancestor context, capturing one site per matching node.
//!
//! Many independent and overlapping patterns may name the same node kinds;
//! paths ending at the same leaf kind are evaluated in declaration order
//! and the first true verdict wins, so a node occurrence is captured at
//! most once.

use std::collections::{HashMap, HashSet};

use tree_sitter::Node;

use crate::analysis::context::AnalysisContext;
use crate::analysis::site::{capture_site, FeatureSite};

/// Depth-first enter/exit visitor over a parsed tree.
///
/// Implement this directly for checkers that need traversal-order
/// state the declarative pattern language cannot express (there is no
/// absence-of-ancestor construct).
pub trait Visit<'p> {
    fn enter(&mut self, node: Node<'p>);
    fn exit(&mut self, _node: Node<'p>) {}
}

/// Drive a visitor over every node of the subtree rooted at `root`,
/// anonymous tokens included, calling `enter` in document order and
/// `exit` once each node's subtree is done.
pub fn walk_tree<'p>(root: Node<'p>, visitor: &mut dyn Visit<'p>) {
    let mut cursor = root.walk();
    loop {
        visitor.enter(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            visitor.exit(cursor.node());
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Leaf predicate: the candidate node plus the live ancestor context.
pub type Predicate<'p> = Box<dyn FnMut(Node<'p>, &MatchContext<'_, 'p>) -> bool + 'p>;

/// One entry of a pattern, tagged at construction time.
///
/// The tag replaces any runtime shape probing: an entry either constrains
/// descendants (`Within`) or renders a verdict (`Test`), and the pattern's
/// static shape is fully known when it is built.
pub enum PatternHandler<'p> {
    /// Intermediate: what must match among this node's descendants.
    Within(Pattern<'p>),
    /// Final: a leaf predicate over the node.
    Test(Predicate<'p>),
}

/// A nested, declarative node-kind specification.
///
/// Entries are kept in declaration order; that order is the documented
/// evaluation order for overlapping paths sharing a leaf kind.
#[derive(Default)]
pub struct Pattern<'p> {
    entries: Vec<(&'static str, PatternHandler<'p>)>,
}

impl<'p> Pattern<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an intermediate entry: nodes of `kind` constrain what must
    /// match among their descendants.
    pub fn within(mut self, kind: &'static str, inner: Pattern<'p>) -> Self {
        self.entries.push((kind, PatternHandler::Within(inner)));
        self
    }

    /// Add a leaf entry with a predicate.
    pub fn test<F>(mut self, kind: &'static str, predicate: F) -> Self
    where
        F: FnMut(Node<'p>, &MatchContext<'_, 'p>) -> bool + 'p,
    {
        self.entries
            .push((kind, PatternHandler::Test(Box::new(predicate))));
        self
    }

    /// Add a leaf entry that matches every node of `kind`.
    pub fn capture(self, kind: &'static str) -> Self {
        self.test(kind, |_, _| true)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-traversal ancestor state: node kind to the most recently entered
/// node of that kind.
///
/// Not a true stack: re-entering a kind while nested replaces the previous
/// entry, and exiting clears the kind to absent. A chain containing the
/// same kind twice therefore resolves to the innermost active instance
/// only; compiled paths cannot name "the outer one specifically". Created
/// at traversal start and discarded at traversal end.
#[derive(Default)]
pub struct TraversalContext<'p> {
    active: HashMap<&'static str, Node<'p>>,
}

impl<'p> TraversalContext<'p> {
    fn record(&mut self, kind: &'static str, node: Node<'p>) {
        self.active.insert(kind, node);
    }

    fn clear(&mut self, kind: &str) {
        self.active.remove(kind);
    }

    fn get(&self, kind: &str) -> Option<Node<'p>> {
        self.active.get(kind).copied()
    }
}

/// What a leaf predicate sees besides the candidate node: the currently
/// active ancestor instances, resolved from the live traversal state.
pub struct MatchContext<'a, 'p> {
    active: &'a TraversalContext<'p>,
}

impl<'a, 'p> MatchContext<'a, 'p> {
    /// The active ancestor of a kind named by the pattern, if any.
    pub fn ancestor(&self, kind: &str) -> Option<Node<'p>> {
        self.active.get(kind)
    }
}

/// One root-to-leaf path recorded at compile time.
struct CompiledPath<'p> {
    ancestors: Vec<&'static str>,
    predicate: Predicate<'p>,
}

/// A pattern compiled into a primitive single-pass visitor.
pub struct CompiledVisitor<'p> {
    /// Kinds appearing as intermediates anywhere in the pattern; their
    /// enter/exit tracking is installed once even when a kind recurs in
    /// several branches.
    tracked: HashSet<&'static str>,
    /// Leaf kind to the paths ending there, in declaration order.
    leaf_paths: HashMap<&'static str, Vec<usize>>,
    paths: Vec<CompiledPath<'p>>,
}

/// Compile a pattern by walking it once, recording one path per leaf.
pub fn compile<'p>(pattern: Pattern<'p>) -> CompiledVisitor<'p> {
    let mut compiled = CompiledVisitor {
        tracked: HashSet::new(),
        leaf_paths: HashMap::new(),
        paths: Vec::new(),
    };
    let mut stack: Vec<&'static str> = Vec::new();
    flatten(pattern, &mut stack, &mut compiled);
    compiled
}

fn flatten<'p>(
    pattern: Pattern<'p>,
    stack: &mut Vec<&'static str>,
    compiled: &mut CompiledVisitor<'p>,
) {
    for (kind, handler) in pattern.entries {
        match handler {
            PatternHandler::Test(predicate) => {
                let id = compiled.paths.len();
                compiled.paths.push(CompiledPath {
                    ancestors: stack.clone(),
                    predicate,
                });
                compiled.leaf_paths.entry(kind).or_default().push(id);
            }
            PatternHandler::Within(inner) => {
                compiled.tracked.insert(kind);
                stack.push(kind);
                flatten(inner, stack, compiled);
                stack.pop();
            }
        }
    }
}

impl<'p> CompiledVisitor<'p> {
    /// Run the compiled visitor over the context's tree and return the
    /// captured sites, in document order.
    pub fn run(&mut self, ctx: &AnalysisContext<'p>) -> Vec<FeatureSite> {
        let mut runner = Runner {
            ctx,
            tracked: &self.tracked,
            leaf_paths: &self.leaf_paths,
            paths: &mut self.paths,
            active: TraversalContext::default(),
            sites: Vec::new(),
        };
        walk_tree(ctx.root(), &mut runner);
        runner.sites
    }
}

struct Runner<'c, 'p> {
    ctx: &'c AnalysisContext<'p>,
    tracked: &'c HashSet<&'static str>,
    leaf_paths: &'c HashMap<&'static str, Vec<usize>>,
    paths: &'c mut Vec<CompiledPath<'p>>,
    active: TraversalContext<'p>,
    sites: Vec<FeatureSite>,
}

impl<'c, 'p> Visit<'p> for Runner<'c, 'p> {
    fn enter(&mut self, node: Node<'p>) {
        let kind = node.kind();

        // Leaf evaluation happens before this node is recorded as context,
        // so a kind serving as both leaf and intermediate never matches
        // against itself.
        if let Some(path_ids) = self.leaf_paths.get(kind) {
            for &id in path_ids {
                let path = &mut self.paths[id];
                if !path
                    .ancestors
                    .iter()
                    .all(|ancestor| self.active.get(ancestor).is_some())
                {
                    continue;
                }
                let matched = {
                    let m = MatchContext {
                        active: &self.active,
                    };
                    (path.predicate)(node, &m)
                };
                if matched {
                    self.sites.push(capture_site(self.ctx, node));
                    break;
                }
            }
        }

        if self.tracked.contains(kind) {
            self.active.record(kind, node);
        }
    }

    fn exit(&mut self, node: Node<'p>) {
        let kind = node.kind();
        if self.tracked.contains(kind) {
            self.active.clear(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::nodes::{field, text};
    use crate::parser::{parse, SourceFile};

    fn parsed(code: &str) -> crate::parser::ParsedFile {
        parse(&SourceFile::new("test.sol", code)).unwrap()
    }

    #[test]
    fn unconstrained_leaf_captures_every_node_of_kind() {
        let file = parsed("contract A {} contract B {}");
        let ctx = AnalysisContext::new(&file);
        let mut visitor = compile(Pattern::new().capture("contract_declaration"));
        let sites = visitor.run(&ctx);
        assert_eq!(sites.len(), 2);
        assert!(sites[0].literal.as_deref().unwrap().contains('A'));
        assert!(sites[1].literal.as_deref().unwrap().contains('B'));
    }

    #[test]
    fn path_is_inapplicable_without_active_ancestor() {
        let file = parsed("contract C { uint x; } function free() {}");
        let ctx = AnalysisContext::new(&file);
        // Only identifiers inside a contract body match.
        let mut visitor = compile(Pattern::new().within(
            "contract_declaration",
            Pattern::new().capture("identifier"),
        ));
        let sites = visitor.run(&ctx);
        assert!(!sites.is_empty());
        for site in &sites {
            assert_ne!(site.literal.as_deref(), Some("free"));
        }
    }

    #[test]
    fn ancestor_resolves_to_current_instance() {
        // Two sibling functions; the predicate compares against the
        // enclosing function's name and must see each instance in turn.
        let file = parsed("contract C { function a() { a(); } function b() { b(); } }");
        let code = "contract C { function a() { a(); } function b() { b(); } }";
        let ctx = AnalysisContext::new(&file);
        let mut visitor = compile(Pattern::new().within(
            "function_definition",
            Pattern::new().within(
                "call_expression",
                Pattern::new().test("identifier", move |node, m| {
                    let Some(def) = m.ancestor("function_definition") else {
                        return false;
                    };
                    field(def, "name")
                        .map(|name| text(name, code) == text(node, code))
                        .unwrap_or(false)
                }),
            ),
        ));
        let sites = visitor.run(&ctx);
        let literals: Vec<_> = sites.iter().filter_map(|s| s.literal.as_deref()).collect();
        assert_eq!(literals, vec!["a", "b"]);
    }

    #[test]
    fn overlapping_paths_capture_at_most_once_per_node() {
        let file = parsed("contract C { function f() { f(); } }");
        let ctx = AnalysisContext::new(&file);
        // Two branches end at the same leaf kind and both chains are
        // satisfiable for the same identifier node; first match wins.
        let mut visitor = compile(
            Pattern::new()
                .within(
                    "contract_declaration",
                    Pattern::new().test("identifier", |_, _| true),
                )
                .within(
                    "function_definition",
                    Pattern::new().test("identifier", |_, _| true),
                ),
        );
        let sites = visitor.run(&ctx);
        // C, f (definition name), f (call): three identifier nodes, each
        // captured exactly once despite two applicable paths.
        assert_eq!(sites.len(), 3);
    }

    #[test]
    fn context_is_cleared_on_exit() {
        let file = parsed("contract C { uint x; } enum E { A }");
        let ctx = AnalysisContext::new(&file);
        // enum members are outside the contract; the chain must not leak.
        let mut visitor = compile(Pattern::new().within(
            "contract_declaration",
            Pattern::new().capture("enum_declaration"),
        ));
        let sites = visitor.run(&ctx);
        assert!(sites.is_empty());
    }

    #[test]
    fn declaration_order_decides_between_competing_leaves() {
        let file = parsed("contract C { uint x; }");
        let ctx = AnalysisContext::new(&file);
        let mut visitor = compile(
            Pattern::new()
                .test("contract_declaration", |_, _| true)
                .test("contract_declaration", |_, _| {
                    panic!("second path must not be evaluated after a match")
                }),
        );
        let sites = visitor.run(&ctx);
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn stateful_predicate_is_scoped_to_one_run() {
        let file = parsed("contract C { function f() {} function f() {} }");
        let ctx = AnalysisContext::new(&file);
        let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
        let code = "contract C { function f() {} function f() {} }";
        let mut visitor = compile(Pattern::new().test("function_definition", move |node, _| {
            let name = field(node, "name")
                .map(|n| text(n, code).to_string())
                .unwrap_or_default();
            !seen.insert(name)
        }));
        let sites = visitor.run(&ctx);
        // Only the second definition of the repeated name matches.
        assert_eq!(sites.len(), 1);
    }
}
