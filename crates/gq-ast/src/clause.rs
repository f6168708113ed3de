//! Clause kinds: the productions that make up the body of a query.

use crate::error::NodeError;
use crate::kind::NodeKind;
use crate::node::{Node, NodeData, NodeRef};
use crate::range::Range;
use crate::validate;

/// A whole query: an ordered run of clauses.
#[derive(Debug, PartialEq)]
pub struct Query {
    clauses: Vec<NodeRef>,
}

impl Query {
    pub fn clauses(&self) -> &[NodeRef] {
        &self.clauses
    }

    pub fn clause(&self, index: usize) -> Option<&NodeRef> {
        self.clauses.get(index)
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}

/// A `MATCH` clause: a pattern to search for, optionally filtered by a
/// predicate expression.
#[derive(Debug, PartialEq)]
pub struct Match {
    pattern: NodeRef,
    predicate: Option<NodeRef>,
}

impl Match {
    pub fn pattern(&self) -> &NodeRef {
        &self.pattern
    }

    pub fn predicate(&self) -> Option<&NodeRef> {
        self.predicate.as_ref()
    }
}

/// A `RETURN` clause: the expressions a query projects.
#[derive(Debug, PartialEq)]
pub struct Return {
    projections: Vec<NodeRef>,
}

impl Return {
    pub fn projections(&self) -> &[NodeRef] {
        &self.projections
    }

    pub fn projection(&self, index: usize) -> Option<&NodeRef> {
        self.projections.get(index)
    }

    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }
}

/// A `CALL` subquery clause: a self-contained nested query invoked as a
/// single clause of the enclosing query.
#[derive(Debug, PartialEq)]
pub struct CallSubquery {
    clauses: Vec<NodeRef>,
}

impl CallSubquery {
    /// Number of clauses in the nested query.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Clause at `index`, or `None` past the end.
    pub fn clause(&self, index: usize) -> Option<&NodeRef> {
        self.clauses.get(index)
    }

    pub fn clauses(&self) -> &[NodeRef] {
        &self.clauses
    }
}

impl Node {
    /// Constructs a `query` node over an ordered clause sequence.
    ///
    /// Every clause must satisfy the `query clause` capability and alias an
    /// entry of `children`; `children` becomes the node's owned child list
    /// verbatim. On failure no node is produced and the supplied vectors are
    /// simply dropped; callers that need the children afterwards keep their
    /// own references.
    pub fn query(
        clauses: &[NodeRef],
        children: Vec<NodeRef>,
        range: Range,
    ) -> Result<NodeRef, NodeError> {
        validate::require_child_all(&children, clauses, NodeKind::QueryClause)?;
        let clauses = validate::collect_refs(clauses)?;

        Ok(Node::new(
            NodeData::Query(Query { clauses }),
            children,
            range,
        ))
    }

    /// Constructs a `MATCH` clause. `pattern` must satisfy the `pattern`
    /// capability, `predicate` (when given) the `expression` capability, and
    /// both must alias entries of `children`.
    pub fn match_clause(
        pattern: NodeRef,
        predicate: Option<NodeRef>,
        children: Vec<NodeRef>,
        range: Range,
    ) -> Result<NodeRef, NodeError> {
        validate::require_child(&children, &pattern, NodeKind::Pattern)?;
        if let Some(predicate) = &predicate {
            validate::require_child(&children, predicate, NodeKind::Expression)?;
        }

        Ok(Node::new(
            NodeData::Match(Match { pattern, predicate }),
            children,
            range,
        ))
    }

    /// Constructs a `RETURN` clause over an ordered projection sequence, each
    /// satisfying the `expression` capability.
    pub fn return_clause(
        projections: &[NodeRef],
        children: Vec<NodeRef>,
        range: Range,
    ) -> Result<NodeRef, NodeError> {
        validate::require_child_all(&children, projections, NodeKind::Expression)?;
        let projections = validate::collect_refs(projections)?;

        Ok(Node::new(
            NodeData::Return(Return { projections }),
            children,
            range,
        ))
    }

    /// Constructs a `CALL SUBQUERY` clause over an ordered clause sequence,
    /// each satisfying the `query clause` capability.
    pub fn call_subquery(
        clauses: &[NodeRef],
        children: Vec<NodeRef>,
        range: Range,
    ) -> Result<NodeRef, NodeError> {
        validate::require_child_all(&children, clauses, NodeKind::QueryClause)?;
        let clauses = validate::collect_refs(clauses)?;

        Ok(Node::new(
            NodeData::CallSubquery(CallSubquery { clauses }),
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

    fn ret(name: &str) -> NodeRef {
        let value = Node::identifier(name, Range::default());
        Node::return_clause(&[value.clone()], vec![value], Range::default()).unwrap()
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    fn test_call_subquery_accessors(#[case] count: usize) {
        let clauses = (0..count)
            .map(|i| ret(&format!("c{}", i)))
            .collect::<Vec<_>>();
        let call =
            Node::call_subquery(&clauses, clauses.clone(), Range::default()).unwrap();
        let subquery = call.as_call_subquery().unwrap();

        assert_eq!(subquery.clause_count(), count);
        for (i, clause) in clauses.iter().enumerate() {
            assert!(Arc::ptr_eq(subquery.clause(i).unwrap(), clause));
        }
        assert_eq!(subquery.clause(count), None);
    }

    #[test]
    fn test_call_subquery_rejects_non_clause_view() {
        let number = Node::integer("1", Range::default());
        let result = Node::call_subquery(
            &[number.clone()],
            vec![number],
            Range::default(),
        );

        assert_eq!(
            result,
            Err(NodeError::KindMismatch {
                expected: NodeKind::QueryClause,
                actual: NodeKind::Integer,
            })
        );
    }

    #[test]
    fn test_call_subquery_rejects_orphan_view() {
        let inside = ret("a");
        let outside = ret("b");
        let result = Node::call_subquery(
            &[outside],
            vec![inside],
            Range::default(),
        );

        assert_eq!(result, Err(NodeError::OrphanReference(NodeKind::Return)));
    }

    #[test]
    fn test_query_holds_clauses_in_order() {
        let first = ret("a");
        let second = ret("b");
        let query = Node::query(
            &[first.clone(), second.clone()],
            vec![first.clone(), second.clone()],
            Range::default(),
        )
        .unwrap();

        let body = query.as_query().unwrap();
        assert_eq!(body.clause_count(), 2);
        assert!(Arc::ptr_eq(body.clause(0).unwrap(), &first));
        assert!(Arc::ptr_eq(body.clause(1).unwrap(), &second));
        assert_eq!(query.detail(), "a; b");
    }

    #[test]
    fn test_match_with_predicate() {
        let n = Node::identifier("n", Range::default());
        let pattern =
            Node::path_pattern(&[n.clone()], vec![n.clone()], Range::default()).unwrap();
        let predicate = Node::identifier("shipped", Range::default());
        let clause = Node::match_clause(
            pattern.clone(),
            Some(predicate.clone()),
            vec![pattern.clone(), predicate.clone()],
            Range::default(),
        )
        .unwrap();

        let body = clause.as_match().unwrap();
        assert!(Arc::ptr_eq(body.pattern(), &pattern));
        assert!(Arc::ptr_eq(body.predicate().unwrap(), &predicate));
        assert_eq!(clause.detail(), "n WHERE shipped");
    }

    #[test]
    fn test_match_rejects_pattern_without_capability() {
        let not_a_pattern = Node::identifier("n", Range::default());
        let result = Node::match_clause(
            not_a_pattern.clone(),
            None,
            vec![not_a_pattern],
            Range::default(),
        );

        assert_eq!(
            result,
            Err(NodeError::KindMismatch {
                expected: NodeKind::Pattern,
                actual: NodeKind::Identifier,
            })
        );
    }

    #[test]
    fn test_return_detail_joins_projections() {
        let a = Node::identifier("a", Range::default());
        let b = Node::integer("1", Range::default());
        let clause = Node::return_clause(
            &[a.clone(), b.clone()],
            vec![a, b],
            Range::default(),
        )
        .unwrap();

        assert_eq!(clause.detail(), "a, 1");
        assert_eq!(clause.as_return().unwrap().projection_count(), 2);
    }

    #[test]
    fn test_extra_children_without_views_are_allowed() {
        // A clause may own trivia-like children that no semantic view exposes.
        let a = Node::identifier("a", Range::default());
        let b = Node::identifier("b", Range::default());
        let clause = Node::return_clause(
            &[a.clone()],
            vec![a, b],
            Range::default(),
        )
        .unwrap();

        assert_eq!(clause.children().len(), 2);
        assert_eq!(clause.as_return().unwrap().projection_count(), 1);
        assert_eq!(clause.detail(), "a");
    }
}
