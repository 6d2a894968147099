// AST (Abstract Syntax Tree) definitions and the tree builder used by the parser

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Unique identifier for AST nodes. Ids are handed out in creation order,
/// starting at 0, and double as indices into the node table.
pub type NodeId = usize;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Node kinds of the TINY syntax tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    // Statements
    If,
    Repeat,
    Assign,
    Read,
    Write,
    // Expressions
    Op,
    Const,
    Id,
}

/// Rendering hint: statements are drawn as boxes, expressions as circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeShape {
    Statement,
    Expression,
}

impl NodeKind {
    pub fn shape(self) -> NodeShape {
        match self {
            NodeKind::If
            | NodeKind::Repeat
            | NodeKind::Assign
            | NodeKind::Read
            | NodeKind::Write => NodeShape::Statement,
            NodeKind::Op | NodeKind::Const | NodeKind::Id => NodeShape::Expression,
        }
    }

    pub fn is_statement(self) -> bool {
        self.shape() == NodeShape::Statement
    }

    /// Lower-case name shown in tree listings.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::If => "if",
            NodeKind::Repeat => "repeat",
            NodeKind::Assign => "assign",
            NodeKind::Read => "read",
            NodeKind::Write => "write",
            NodeKind::Op => "op",
            NodeKind::Const => "const",
            NodeKind::Id => "id",
        }
    }
}

/// A single tree node. `children` keeps source order and only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Identifier for `Assign`/`Read`, literal for `Const`/`Id`, symbol for
    /// `Op`; `None` for `If`, `Repeat` and `Write`.
    pub label: Option<String>,
    /// Where the token that introduced this node starts
    pub location: SourceLocation,
    pub children: Vec<NodeId>,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({})", self.kind.name(), label),
            None => f.write_str(self.kind.name()),
        }
    }
}

/// Incremental tree construction. Owned by one parse session.
///
/// All operations take and return [`NodeId`]s, never references, so the
/// parser can hold on to handles while the node table grows.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    same_level: Vec<(NodeId, NodeId)>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    /// Allocate the next id and store a childless node under it.
    pub fn make_node(
        &mut self,
        kind: NodeKind,
        label: Option<String>,
        location: SourceLocation,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            kind,
            label,
            location,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` to `parent`'s children. Call order is child order.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(child < self.nodes.len(), "child {} was never created", child);
        self.nodes[parent].children.push(child);
    }

    /// Record that `a` and `b` sit at the same level for layout purposes.
    /// Has no effect on the parent/child structure.
    pub fn mark_same_level(&mut self, a: NodeId, b: NodeId) {
        self.same_level.push((a, b));
    }

    /// Number of nodes created so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Close the session and hand out the finished tree rooted at `root`.
    pub fn finalize(self, root: NodeId) -> SyntaxTree {
        let next_in_sequence = self.same_level.iter().copied().collect();
        SyntaxTree {
            root,
            nodes: self.nodes,
            same_level: self.same_level,
            next_in_sequence,
        }
    }
}

/// One line of a tree outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineRow {
    pub id: NodeId,
    pub depth: usize,
}

/// A finished, immutable syntax tree.
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxTree {
    root: NodeId,
    nodes: Vec<Node>,
    same_level: Vec<(NodeId, NodeId)>,
    #[serde(skip)]
    next_in_sequence: FxHashMap<NodeId, NodeId>,
}

impl SyntaxTree {
    /// Id of the first statement of the program
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// All nodes in id order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Same-level pairs in the order they were recorded.
    pub fn same_level(&self) -> &[(NodeId, NodeId)] {
        &self.same_level
    }

    pub fn is_same_level(&self, a: NodeId, b: NodeId) -> bool {
        self.next_in_sequence.get(&a) == Some(&b)
    }

    /// The statement that follows `id` in its sequence, if any.
    pub fn next_in_sequence(&self, id: NodeId) -> Option<NodeId> {
        self.next_in_sequence.get(&id).copied()
    }

    /// Walk the child chain starting at `head` and return the statements of
    /// that sequence as an explicit ordered list.
    pub fn sequence(&self, head: NodeId) -> Vec<NodeId> {
        let mut statements = vec![head];
        let mut current = head;
        while let Some(next) = self.next_in_sequence(current) {
            statements.push(next);
            current = next;
        }
        statements
    }

    /// Pre-order listing of the tree. A child that is the same-level
    /// successor of its parent keeps the parent's depth, so every statement
    /// of a sequence lines up.
    pub fn outline(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return rows;
        }

        // Explicit stack: statement chains can be as long as the program
        let mut stack = vec![OutlineRow {
            id: self.root,
            depth: 0,
        }];

        while let Some(row) = stack.pop() {
            rows.push(row);
            for &child in self.children(row.id).iter().rev() {
                let depth = if self.is_same_level(row.id, child) {
                    row.depth
                } else {
                    row.depth + 1
                };
                stack.push(OutlineRow { id: child, depth });
            }
        }

        rows
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.outline() {
            if let Some(node) = self.node(row.id) {
                writeln!(f, "{}{}", "  ".repeat(row.depth), node)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOC: SourceLocation = SourceLocation { line: 1, column: 1 };

    #[test]
    fn test_ids_are_sequential() {
        let mut builder = TreeBuilder::new();
        assert_eq!(builder.make_node(NodeKind::Write, None, LOC), 0);
        assert_eq!(builder.make_node(NodeKind::Id, Some("x".into()), LOC), 1);
        assert_eq!(builder.make_node(NodeKind::Const, Some("3".into()), LOC), 2);
        assert_eq!(builder.len(), 3);
    }

    #[test]
    fn test_children_keep_call_order() {
        let mut builder = TreeBuilder::new();
        let op = builder.make_node(NodeKind::Op, Some("-".into()), LOC);
        let right = builder.make_node(NodeKind::Const, Some("1".into()), LOC);
        let left = builder.make_node(NodeKind::Id, Some("x".into()), LOC);
        builder.add_child(op, left);
        builder.add_child(op, right);

        let tree = builder.finalize(op);
        assert_eq!(tree.children(op), &[left, right]);
        assert_eq!(tree.children(99), &[] as &[NodeId]);
    }

    #[test]
    fn test_sequence_and_outline() {
        // read x; write x
        let mut builder = TreeBuilder::new();
        let read = builder.make_node(NodeKind::Read, Some("x".into()), LOC);
        let write = builder.make_node(NodeKind::Write, None, LOC);
        let id = builder.make_node(NodeKind::Id, Some("x".into()), LOC);
        builder.add_child(write, id);
        builder.add_child(read, write);
        builder.mark_same_level(read, write);

        let tree = builder.finalize(read);
        assert_eq!(tree.sequence(read), vec![read, write]);
        assert!(tree.is_same_level(read, write));
        assert!(!tree.is_same_level(write, id));
        assert_eq!(
            tree.outline(),
            vec![
                OutlineRow { id: read, depth: 0 },
                OutlineRow { id: write, depth: 0 },
                OutlineRow { id, depth: 1 },
            ]
        );
        assert_eq!(tree.to_string(), "read (x)\nwrite\n  id (x)\n");
    }

    #[test]
    fn test_shapes() {
        assert_eq!(NodeKind::Repeat.shape(), NodeShape::Statement);
        assert_eq!(NodeKind::Op.shape(), NodeShape::Expression);
        assert!(!NodeKind::Const.is_statement());
    }
}
