//! Term kinds: expressions, literals and patterns.

use std::fmt::{self, Display};

use smol_str::SmolStr;

use crate::error::NodeError;
use crate::kind::NodeKind;
use crate::node::{Node, NodeData, NodeRef};
use crate::range::Range;
use crate::validate;

/// Binary operators of the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An infix application of a binary operator to two expressions.
#[derive(Debug, PartialEq)]
pub struct BinaryOperator {
    operator: Operator,
    left: NodeRef,
    right: NodeRef,
}

impl BinaryOperator {
    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn left(&self) -> &NodeRef {
        &self.left
    }

    pub fn right(&self) -> &NodeRef {
        &self.right
    }
}

/// A path pattern: a chain of node identifiers linked into a path.
#[derive(Debug, PartialEq)]
pub struct PathPattern {
    elements: Vec<NodeRef>,
}

impl PathPattern {
    pub fn elements(&self) -> &[NodeRef] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&NodeRef> {
        self.elements.get(index)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

/// A path pattern bound to a name, usable wherever an expression is.
#[derive(Debug, PartialEq)]
pub struct NamedPath {
    name: NodeRef,
    path: NodeRef,
}

impl NamedPath {
    pub fn name(&self) -> &NodeRef {
        &self.name
    }

    pub fn path(&self) -> &NodeRef {
        &self.path
    }
}

impl Node {
    /// Constructs an `identifier` leaf.
    pub fn identifier(name: impl Into<SmolStr>, range: Range) -> NodeRef {
        Node::new(
            NodeData::Identifier { name: name.into() },
            Vec::new(),
            range,
        )
    }

    /// Constructs an `integer` literal leaf. `value` is the token text, kept
    /// as written so no precision is lost before planning.
    pub fn integer(value: impl Into<SmolStr>, range: Range) -> NodeRef {
        Node::new(
            NodeData::Integer {
                value: value.into(),
            },
            Vec::new(),
            range,
        )
    }

    /// Constructs a `string` literal leaf from the unquoted value.
    pub fn string(value: impl Into<SmolStr>, range: Range) -> NodeRef {
        Node::new(
            NodeData::String {
                value: value.into(),
            },
            Vec::new(),
            range,
        )
    }

    /// Constructs a `binary operator` expression. Both operands must satisfy
    /// the `expression` capability and alias entries of `children`.
    pub fn binary_operator(
        operator: Operator,
        left: NodeRef,
        right: NodeRef,
        children: Vec<NodeRef>,
        range: Range,
    ) -> Result<NodeRef, NodeError> {
        validate::require_child(&children, &left, NodeKind::Expression)?;
        validate::require_child(&children, &right, NodeKind::Expression)?;

        Ok(Node::new(
            NodeData::BinaryOperator(BinaryOperator {
                operator,
                left,
                right,
            }),
            children,
            range,
        ))
    }

    /// Constructs a `path pattern` over an ordered element sequence; every
    /// element must be an `identifier`.
    pub fn path_pattern(
        elements: &[NodeRef],
        children: Vec<NodeRef>,
        range: Range,
    ) -> Result<NodeRef, NodeError> {
        validate::require_child_all(&children, elements, NodeKind::Identifier)?;
        let elements = validate::collect_refs(elements)?;

        Ok(Node::new(
            NodeData::PathPattern(PathPattern { elements }),
            children,
            range,
        ))
    }

    /// Constructs a `named path`: an `identifier` bound to a node satisfying
    /// the `pattern` capability.
    pub fn named_path(
        name: NodeRef,
        path: NodeRef,
        children: Vec<NodeRef>,
        range: Range,
    ) -> Result<NodeRef, NodeError> {
        validate::require_child(&children, &name, NodeKind::Identifier)?;
        validate::require_child(&children, &path, NodeKind::Pattern)?;

        Ok(Node::new(
            NodeData::NamedPath(NamedPath { name, path }),
            children,
            range,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Operator::Equal, "=")]
    #[case(Operator::NotEqual, "<>")]
    #[case(Operator::LessEqual, "<=")]
    #[case(Operator::Add, "+")]
    #[case(Operator::Modulo, "%")]
    #[case(Operator::And, "AND")]
    #[case(Operator::Or, "OR")]
    fn test_operator_symbol(#[case] operator: Operator, #[case] expected: &str) {
        assert_eq!(operator.to_string(), expected);
    }

    #[test]
    fn test_identifier_leaf() {
        let name = Node::identifier("order", Range::default());
        assert_eq!(name.kind(), NodeKind::Identifier);
        assert_eq!(name.identifier_name(), Some("order"));
        assert!(name.children().is_empty());
        assert_eq!(name.detail(), "order");
    }

    #[test]
    fn test_literal_leaves_keep_token_text() {
        let int = Node::integer("0042", Range::default());
        assert_eq!(int.integer_value(), Some("0042"));
        assert_eq!(int.detail(), "0042");

        let text = Node::string("north", Range::default());
        assert_eq!(text.string_value(), Some("north"));
        assert_eq!(text.detail(), "\"north\"");
    }

    #[test]
    fn test_binary_operator_detail() {
        let qty = Node::identifier("qty", Range::default());
        let ten = Node::integer("10", Range::default());
        let cmp = Node::binary_operator(
            Operator::GreaterThan,
            qty.clone(),
            ten.clone(),
            vec![qty.clone(), ten.clone()],
            Range::default(),
        )
        .unwrap();

        let operator = cmp.as_binary_operator().unwrap();
        assert_eq!(operator.operator(), Operator::GreaterThan);
        assert!(Arc::ptr_eq(operator.left(), &qty));
        assert!(Arc::ptr_eq(operator.right(), &ten));
        assert_eq!(cmp.detail(), "qty > 10");
    }

    #[test]
    fn test_binary_operator_rejects_clause_operand() {
        let a = Node::identifier("a", Range::default());
        let clause =
            Node::return_clause(&[a.clone()], vec![a], Range::default()).unwrap();
        let b = Node::identifier("b", Range::default());

        let result = Node::binary_operator(
            Operator::Equal,
            clause.clone(),
            b.clone(),
            vec![clause, b],
            Range::default(),
        );

        assert_eq!(
            result,
            Err(NodeError::KindMismatch {
                expected: NodeKind::Expression,
                actual: NodeKind::Return,
            })
        );
    }

    #[test]
    fn test_path_pattern_elements_must_be_identifiers() {
        let a = Node::identifier("a", Range::default());
        let one = Node::integer("1", Range::default());

        let result = Node::path_pattern(
            &[a.clone(), one.clone()],
            vec![a, one],
            Range::default(),
        );

        assert_eq!(
            result,
            Err(NodeError::KindMismatch {
                expected: NodeKind::Identifier,
                actual: NodeKind::Integer,
            })
        );
    }

    #[test]
    fn test_path_pattern_detail_joins_with_dashes() {
        let a = Node::identifier("a", Range::default());
        let b = Node::identifier("b", Range::default());
        let c = Node::identifier("c", Range::default());
        let path = Node::path_pattern(
            &[a.clone(), b.clone(), c.clone()],
            vec![a, b, c],
            Range::default(),
        )
        .unwrap();

        assert_eq!(path.detail(), "a-b-c");
        assert_eq!(path.as_path_pattern().unwrap().element_count(), 3);
    }

    #[test]
    fn test_named_path_is_pattern_and_expression() {
        let p = Node::identifier("p", Range::default());
        let a = Node::identifier("a", Range::default());
        let path =
            Node::path_pattern(&[a.clone()], vec![a], Range::default()).unwrap();
        let named = Node::named_path(
            p.clone(),
            path.clone(),
            vec![p.clone(), path.clone()],
            Range::default(),
        )
        .unwrap();

        assert!(named.is_a(NodeKind::Pattern));
        assert!(named.is_a(NodeKind::Expression));
        assert!(!named.is_a(NodeKind::QueryClause));
        let body = named.as_named_path().unwrap();
        assert!(Arc::ptr_eq(body.name(), &p));
        assert!(Arc::ptr_eq(body.path(), &path));
        assert_eq!(named.detail(), "p=a");
    }

    #[test]
    fn test_named_path_nests_as_expression() {
        // A named path can stand wherever an expression is required, e.g. as
        // a RETURN projection.
        let p = Node::identifier("p", Range::default());
        let a = Node::identifier("a", Range::default());
        let path =
            Node::path_pattern(&[a.clone()], vec![a], Range::default()).unwrap();
        let named = Node::named_path(
            p.clone(),
            path.clone(),
            vec![p, path],
            Range::default(),
        )
        .unwrap();

        let clause = Node::return_clause(
            &[named.clone()],
            vec![named],
            Range::default(),
        );
        assert!(clause.is_ok());
    }
}
