//! Small node-inspection helpers shared by checker predicates.

use tree_sitter::Node;

/// Source text of a node.
pub fn text<'p>(node: Node<'p>, code: &'p str) -> &'p str {
    node.utf8_text(code.as_bytes()).unwrap_or("")
}

/// Named child under a grammar field, e.g. `name` or `function`.
pub fn field<'p>(node: Node<'p>, name: &str) -> Option<Node<'p>> {
    node.child_by_field_name(name)
}

/// First direct named child of a given kind.
pub fn child_of_kind<'p>(node: Node<'p>, kind: &str) -> Option<Node<'p>> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .find(|child| child.kind() == kind)
}

pub fn has_child_of_kind(node: Node, kind: &str) -> bool {
    child_of_kind(node, kind).is_some()
}

/// All named descendants of a given kind (excluding the node itself),
/// in source order.
pub fn descendants_of_kind<'p>(node: Node<'p>, kind: &str) -> Vec<Node<'p>> {
    let mut out = Vec::new();
    let mut stack: Vec<Node<'p>> = (0..node.named_child_count())
        .rev()
        .filter_map(|i| node.named_child(i))
        .collect();
    while let Some(current) = stack.pop() {
        if current.kind() == kind {
            out.push(current);
        }
        for i in (0..current.named_child_count()).rev() {
            if let Some(child) = current.named_child(i) {
                stack.push(child);
            }
        }
    }
    out
}

pub fn has_descendant_of_kind(node: Node, kind: &str) -> bool {
    let mut stack: Vec<Node> = (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .collect();
    while let Some(current) = stack.pop() {
        if current.kind() == kind {
            return true;
        }
        stack.extend((0..current.named_child_count()).filter_map(|i| current.named_child(i)));
    }
    false
}

pub fn count_descendants_of_kind(node: Node, kind: &str) -> usize {
    descendants_of_kind(node, kind).len()
}

/// True when any direct child, anonymous tokens included, has the given
/// kind. Keywords such as `constant` surface as anonymous nodes whose
/// kind is the keyword itself.
pub fn has_token_child(node: Node, kind: &str) -> bool {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .any(|child| child.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, SourceFile};

    #[test]
    fn descendants_are_in_source_order() {
        let source = SourceFile::new(
            "a.sol",
            "contract A {} contract B {} contract C {}",
        );
        let parsed = parse(&source).unwrap();
        let contracts = descendants_of_kind(parsed.root(), "contract_declaration");
        assert_eq!(contracts.len(), 3);
        let names: Vec<_> = contracts
            .iter()
            .filter_map(|c| field(*c, "name"))
            .map(|n| parsed.node_text(n).to_string())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn descendants_exclude_self() {
        let source = SourceFile::new("a.sol", "contract A {}");
        let parsed = parse(&source).unwrap();
        let contracts = descendants_of_kind(parsed.root(), "source_file");
        assert!(contracts.is_empty());
    }
}
