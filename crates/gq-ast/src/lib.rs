//! `gq-ast` is the object model behind the gq query parser: an immutable
//! tree of kind-tagged nodes with capability-checked construction, deep
//! cloning onto replacement children, and bounded diagnostic rendering.
//!
//! Nodes are built bottom-up, the way a recursive-descent parser reduces:
//! every child is fully constructed before its parent, each constructor
//! validates that its semantic arguments satisfy the required capability and
//! alias entries of the node's own child list, and a constructed tree never
//! changes again. Kinds form a lattice rather than a chain, so one node can
//! satisfy several capability categories at once (a named path is both a
//! pattern and an expression).
//!
//! ## Examples
//!
//! ```rs
//! use gq_ast::{Node, NodeKind, Range};
//!
//! let total = Node::identifier("total", Range::default());
//! let ret = Node::return_clause(&[total.clone()], vec![total], Range::default()).unwrap();
//! let call = Node::call_subquery(&[ret.clone()], vec![ret], Range::default()).unwrap();
//!
//! assert!(call.is_a(NodeKind::QueryClause));
//! assert_eq!(call.as_call_subquery().unwrap().clause_count(), 1);
//! assert_eq!(call.detail(), "total");
//!
//! // Rewrites clone a subtree onto an independently built child list.
//! let total2 = Node::identifier("total", Range::default());
//! let ret2 = call.children()[0].clone_with(vec![total2]).unwrap();
//! let rewritten = call.clone_with(vec![ret2]).unwrap();
//! assert_eq!(rewritten.detail(), call.detail());
//! ```
mod clause;
mod error;
mod expr;
#[cfg(feature = "ast-json")]
mod json;
mod kind;
mod node;
mod range;
mod validate;

pub use clause::{CallSubquery, Match, Query, Return};
pub use error::NodeError;
pub use expr::{BinaryOperator, NamedPath, Operator, PathPattern};
pub use kind::NodeKind;
pub use node::{Node, NodeData, NodeRef};
pub use range::{Position, Range};
