//! Property-based testing strategies for gq-ast.
//!
//! This module provides reusable proptest strategies for generating
//! well-formed query trees: every produced node satisfies the construction
//! contract (views alias children, capabilities line up), so tests can focus
//! on the framework property under test instead of tree plumbing.
//!
//! # Examples
//!
//! ```rust,ignore
//! use gq_test::strategies::*;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn test_something(node in arb_node()) {
//!         // Your test here
//!     }
//! }
//! ```

use gq_ast::{Node, NodeRef, Operator, Position, Range};
use proptest::prelude::*;

pub fn arb_position() -> impl Strategy<Value = Position> {
    (1u32..500, 1usize..120, 0usize..4096)
        .prop_map(|(line, column, offset)| Position::new(line, column, offset))
}

pub fn arb_range() -> impl Strategy<Value = Range> {
    (arb_position(), arb_position()).prop_map(|(start, end)| Range::new(start, end))
}

pub fn arb_operator() -> impl Strategy<Value = Operator> {
    prop::sample::select(vec![
        Operator::Equal,
        Operator::NotEqual,
        Operator::LessThan,
        Operator::GreaterThan,
        Operator::LessEqual,
        Operator::GreaterEqual,
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Modulo,
        Operator::And,
        Operator::Or,
    ])
}

/// Strategy for generating identifier leaves.
pub fn arb_identifier() -> impl Strategy<Value = NodeRef> {
    ("[a-z][a-z0-9_]{0,8}", arb_range()).prop_map(|(name, range)| Node::identifier(name, range))
}

/// Strategy for generating literal leaves (integers and strings).
pub fn arb_literal() -> impl Strategy<Value = NodeRef> {
    prop_oneof![
        (0u64..10_000, arb_range()).prop_map(|(n, range)| Node::integer(n.to_string(), range)),
        ("[a-z ]{0,12}", arb_range()).prop_map(|(s, range)| Node::string(s, range)),
    ]
}

/// Strategy for generating expression trees up to `depth` operator levels.
pub fn arb_expr(depth: u32) -> impl Strategy<Value = NodeRef> {
    let leaf = prop_oneof![arb_identifier(), arb_literal()];
    leaf.prop_recursive(depth, 64, 2, |inner| {
        (arb_operator(), inner.clone(), inner, arb_range()).prop_map(
            |(operator, left, right, range)| {
                Node::binary_operator(
                    operator,
                    left.clone(),
                    right.clone(),
                    vec![left, right],
                    range,
                )
                .expect("operands are children")
            },
        )
    })
}

/// Strategy for generating path patterns over 1..4 identifiers.
pub fn arb_path_pattern() -> impl Strategy<Value = NodeRef> {
    (prop::collection::vec(arb_identifier(), 1..4), arb_range()).prop_map(|(elements, range)| {
        Node::path_pattern(&elements, elements.clone(), range).expect("elements are children")
    })
}

/// Strategy for generating MATCH clauses, with or without a predicate.
pub fn arb_match() -> impl Strategy<Value = NodeRef> {
    (arb_path_pattern(), prop::option::of(arb_expr(2)), arb_range()).prop_map(
        |(pattern, predicate, range)| {
            let mut children = vec![pattern.clone()];
            if let Some(predicate) = &predicate {
                children.push(predicate.clone());
            }
            Node::match_clause(pattern, predicate, children, range).expect("views are children")
        },
    )
}

/// Strategy for generating RETURN clauses over 1..4 projections.
pub fn arb_return() -> impl Strategy<Value = NodeRef> {
    (prop::collection::vec(arb_expr(2), 1..4), arb_range()).prop_map(|(projections, range)| {
        Node::return_clause(&projections, projections.clone(), range)
            .expect("projections are children")
    })
}

pub fn arb_clause() -> impl Strategy<Value = NodeRef> {
    prop_oneof![arb_match(), arb_return()]
}

/// Strategy for generating CALL subqueries over 0..4 clauses.
pub fn arb_call_subquery() -> impl Strategy<Value = NodeRef> {
    (prop::collection::vec(arb_clause(), 0..4), arb_range()).prop_map(|(clauses, range)| {
        Node::call_subquery(&clauses, clauses.clone(), range).expect("clauses are children")
    })
}

/// Strategy for generating whole queries over 1..5 clauses.
pub fn arb_query() -> impl Strategy<Value = NodeRef> {
    (
        prop::collection::vec(prop_oneof![arb_clause(), arb_call_subquery()], 1..5),
        arb_range(),
    )
        .prop_map(|(clauses, range)| {
            Node::query(&clauses, clauses.clone(), range).expect("clauses are children")
        })
}

/// Strategy for generating any constructible node, for framework-level
/// properties.
pub fn arb_node() -> impl Strategy<Value = NodeRef> {
    prop_oneof![arb_expr(3), arb_clause(), arb_call_subquery(), arb_query()]
}
