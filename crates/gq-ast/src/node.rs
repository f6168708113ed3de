use std::fmt::{self, Display, Write};
use std::sync::Arc;

use itertools::Itertools;
use smol_str::SmolStr;

use crate::clause::{CallSubquery, Match, Query, Return};
use crate::error::NodeError;
use crate::expr::{BinaryOperator, NamedPath, PathPattern};
use crate::kind::NodeKind;
use crate::range::Range;

/// Shared handle to an immutable node.
///
/// Tree ownership runs through each node's child list; semantic views alias
/// entries of that list and never extend a subtree's lifetime on their own.
pub type NodeRef = Arc<Node>;

/// One node of a parsed query tree.
///
/// A node is immutable once constructed: the kind payload, the source range
/// and the ordered child list are fixed for its whole lifetime, so any number
/// of threads may traverse, render or inspect a finished tree concurrently.
/// Dropping the last handle to a node releases its children bottom-up.
#[derive(Debug, PartialEq)]
pub struct Node {
    data: NodeData,
    range: Range,
    children: Vec<NodeRef>,
}

/// Kind-specific payload of a node.
///
/// The payload structs carry each kind's semantic views: ordered, non-owning
/// references into the node's child list, established by the constructors in
/// [`crate::clause`] and [`crate::expr`].
#[derive(Debug, PartialEq)]
pub enum NodeData {
    Query(Query),
    Match(Match),
    Return(Return),
    CallSubquery(CallSubquery),
    PathPattern(PathPattern),
    NamedPath(NamedPath),
    Identifier { name: SmolStr },
    Integer { value: SmolStr },
    String { value: SmolStr },
    BinaryOperator(BinaryOperator),
}

impl Node {
    pub(crate) fn new(data: NodeData, children: Vec<NodeRef>, range: Range) -> NodeRef {
        Arc::new(Node {
            data,
            range,
            children,
        })
    }

    pub fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Query(_) => NodeKind::Query,
            NodeData::Match(_) => NodeKind::Match,
            NodeData::Return(_) => NodeKind::Return,
            NodeData::CallSubquery(_) => NodeKind::CallSubquery,
            NodeData::PathPattern(_) => NodeKind::PathPattern,
            NodeData::NamedPath(_) => NodeKind::NamedPath,
            NodeData::Identifier { .. } => NodeKind::Identifier,
            NodeData::Integer { .. } => NodeKind::Integer,
            NodeData::String { .. } => NodeKind::String,
            NodeData::BinaryOperator(_) => NodeKind::BinaryOperator,
        }
    }

    /// True when this node's kind is `kind` or has it as an ancestor in the
    /// kind lattice.
    pub fn is_a(&self, kind: NodeKind) -> bool {
        self.kind().is_a(kind)
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    /// The full ordered child list this node owns.
    pub fn children(&self) -> &[NodeRef] {
        &self.children
    }

    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn as_query(&self) -> Option<&Query> {
        match &self.data {
            NodeData::Query(query) => Some(query),
            _ => None,
        }
    }

    pub fn as_match(&self) -> Option<&Match> {
        match &self.data {
            NodeData::Match(clause) => Some(clause),
            _ => None,
        }
    }

    pub fn as_return(&self) -> Option<&Return> {
        match &self.data {
            NodeData::Return(clause) => Some(clause),
            _ => None,
        }
    }

    pub fn as_call_subquery(&self) -> Option<&CallSubquery> {
        match &self.data {
            NodeData::CallSubquery(clause) => Some(clause),
            _ => None,
        }
    }

    pub fn as_path_pattern(&self) -> Option<&PathPattern> {
        match &self.data {
            NodeData::PathPattern(pattern) => Some(pattern),
            _ => None,
        }
    }

    pub fn as_named_path(&self) -> Option<&NamedPath> {
        match &self.data {
            NodeData::NamedPath(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_binary_operator(&self) -> Option<&BinaryOperator> {
        match &self.data {
            NodeData::BinaryOperator(operator) => Some(operator),
            _ => None,
        }
    }

    pub fn identifier_name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// The token text of an `integer` literal, kept as written.
    pub fn integer_value(&self) -> Option<&str> {
        match &self.data {
            NodeData::Integer { value } => Some(value),
            _ => None,
        }
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.data {
            NodeData::String { value } => Some(value),
            _ => None,
        }
    }

    /// Deep-copies this node on top of `children`, a fully constructed
    /// replacement for the original child list with the same length and
    /// positions.
    ///
    /// Every semantic reference is remapped to the replacement node at the
    /// position the original reference occupies in the original child list,
    /// then the kind's own constructor runs again over the new universe. The
    /// result is structurally isomorphic to the original but shares no nodes
    /// with it (unless the caller reused some in `children`). On failure the
    /// original subtree is untouched.
    pub fn clone_with(&self, children: Vec<NodeRef>) -> Result<NodeRef, NodeError> {
        if children.len() != self.children.len() {
            return Err(NodeError::ChildCountMismatch {
                expected: self.children.len(),
                actual: children.len(),
            });
        }

        let range = self.range.clone();

        match &self.data {
            NodeData::Query(query) => {
                let clauses = self.remap(query.clauses(), &children)?;
                Node::query(&clauses, children, range)
            }
            NodeData::Match(clause) => {
                let pattern = self.remap_one(clause.pattern(), &children);
                let predicate = clause
                    .predicate()
                    .map(|predicate| self.remap_one(predicate, &children));
                Node::match_clause(pattern, predicate, children, range)
            }
            NodeData::Return(clause) => {
                let projections = self.remap(clause.projections(), &children)?;
                Node::return_clause(&projections, children, range)
            }
            NodeData::CallSubquery(clause) => {
                let clauses = self.remap(clause.clauses(), &children)?;
                Node::call_subquery(&clauses, children, range)
            }
            NodeData::PathPattern(pattern) => {
                let elements = self.remap(pattern.elements(), &children)?;
                Node::path_pattern(&elements, children, range)
            }
            NodeData::NamedPath(path) => {
                let name = self.remap_one(path.name(), &children);
                let pattern = self.remap_one(path.path(), &children);
                Node::named_path(name, pattern, children, range)
            }
            NodeData::Identifier { name } => Ok(Node::identifier(name.clone(), range)),
            NodeData::Integer { value } => Ok(Node::integer(value.clone(), range)),
            NodeData::String { value } => Ok(Node::string(value.clone(), range)),
            NodeData::BinaryOperator(operator) => {
                let left = self.remap_one(operator.left(), &children);
                let right = self.remap_one(operator.right(), &children);
                Node::binary_operator(operator.operator(), left, right, children, range)
            }
        }
    }

    /// Position of a semantic reference inside the owned child list.
    ///
    /// Constructors establish that every view aliases a child, so a miss here
    /// means a node's invariants were broken after construction. That is a
    /// defect, not a runtime condition.
    pub(crate) fn position_of(&self, reference: &NodeRef) -> usize {
        self.children
            .iter()
            .position(|child| Arc::ptr_eq(child, reference))
            .unwrap_or_else(|| {
                panic!(
                    "`{}` view reference missing from the child list of a `{}` node",
                    reference.kind(),
                    self.kind()
                )
            })
    }

    fn remap(&self, references: &[NodeRef], children: &[NodeRef]) -> Result<Vec<NodeRef>, NodeError> {
        let mut remapped = Vec::new();
        remapped
            .try_reserve_exact(references.len())
            .map_err(|_| NodeError::Exhausted)?;
        for reference in references {
            remapped.push(children[self.position_of(reference)].clone());
        }

        Ok(remapped)
    }

    fn remap_one(&self, reference: &NodeRef, children: &[NodeRef]) -> NodeRef {
        children[self.position_of(reference)].clone()
    }

    /// Materialized detail string; shorthand for `to_string`.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// Multi-line indented rendering of the whole subtree, one node per line
    /// with kind name, byte range and leaf text. Intended for parser
    /// diagnostics, not for reconstruction of the source.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        write!(
            out,
            "{:indent$}{}  {}",
            "",
            self.kind(),
            self.range,
            indent = depth * 2
        )
        .unwrap();
        let text = match &self.data {
            NodeData::Identifier { name } => Some(name.as_str()),
            NodeData::Integer { value } => Some(value.as_str()),
            NodeData::String { value } => Some(value.as_str()),
            _ => None,
        };
        if let Some(text) = text {
            write!(out, "  `{}`", text).unwrap();
        }
        out.push('\n');

        for child in &self.children {
            child.dump_into(out, depth + 1);
        }
    }
}

impl Display for Node {
    /// Bounded diagnostic rendering: each kind joins the details of its
    /// semantic view with its own separator, leaves render their text. A
    /// flattened structural summary, not a reconstruction of the source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            NodeData::Query(query) => write_joined(f, query.clauses(), "; "),
            NodeData::Match(clause) => match clause.predicate() {
                Some(predicate) => write!(f, "{} WHERE {}", clause.pattern(), predicate),
                None => write!(f, "{}", clause.pattern()),
            },
            NodeData::Return(clause) => write_joined(f, clause.projections(), ", "),
            NodeData::CallSubquery(clause) => write_joined(f, clause.clauses(), ", "),
            NodeData::PathPattern(pattern) => write_joined(f, pattern.elements(), "-"),
            NodeData::NamedPath(path) => write!(f, "{}={}", path.name(), path.path()),
            NodeData::Identifier { name } => f.write_str(name),
            NodeData::Integer { value } => f.write_str(value),
            NodeData::String { value } => write!(f, "\"{}\"", value),
            NodeData::BinaryOperator(operator) => write!(
                f,
                "{} {} {}",
                operator.left(),
                operator.operator(),
                operator.right()
            ),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, nodes: &[NodeRef], separator: &str) -> fmt::Result {
    write!(f, "{}", nodes.iter().format(separator))
}
