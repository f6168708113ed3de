use miette::Diagnostic;
use thiserror::Error;

use crate::kind::NodeKind;

/// Failure classification for the fallible node operations.
///
/// Invalid arguments are detected before a node takes shape, so a failed
/// constructor or clone never leaves a partial node behind. `Exhausted` is the
/// distinct classification for a failed storage reservation and is likewise
/// recoverable. A broken construction invariant discovered later (a semantic
/// reference missing from its own child list) is not represented here: it is a
/// defect, reported by panicking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("expected a `{expected}` node but got `{actual}`")]
    KindMismatch {
        expected: NodeKind,
        actual: NodeKind,
    },
    #[error("`{0}` reference does not appear in the supplied child list")]
    OrphanReference(NodeKind),
    #[error("replacement child list has {actual} nodes but {expected} are required")]
    ChildCountMismatch { expected: usize, actual: usize },
    #[error("out of memory while reserving node storage")]
    Exhausted,
}

impl Diagnostic for NodeError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            NodeError::KindMismatch { .. } => "NodeError::KindMismatch",
            NodeError::OrphanReference(_) => "NodeError::OrphanReference",
            NodeError::ChildCountMismatch { .. } => "NodeError::ChildCountMismatch",
            NodeError::Exhausted => "NodeError::Exhausted",
        };

        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let msg = match self {
            NodeError::KindMismatch { .. } => {
                "Check that every semantic argument satisfies the capability the constructor requires."
            }
            NodeError::OrphanReference(_) => {
                "Every semantic reference must alias an entry of the node's own child list."
            }
            NodeError::ChildCountMismatch { .. } => {
                "Cloning needs one replacement child per original child, in the same order."
            }
            NodeError::Exhausted => {
                "Construction was abandoned; the supplied children were never adopted."
            }
        };

        Some(Box::new(msg))
    }
}
