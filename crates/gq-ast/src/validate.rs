//! The structural contract every fallible constructor runs before it builds
//! anything: semantic references must satisfy their required capability and
//! must alias, by identity, an entry of the node's full child list.

use std::sync::Arc;

use crate::error::NodeError;
use crate::kind::NodeKind;
use crate::node::NodeRef;

/// Checks that `reference` satisfies the `expected` capability.
pub(crate) fn require_instance(reference: &NodeRef, expected: NodeKind) -> Result<(), NodeError> {
    if reference.is_a(expected) {
        Ok(())
    } else {
        Err(NodeError::KindMismatch {
            expected,
            actual: reference.kind(),
        })
    }
}

/// Checks that `reference` satisfies `expected` and aliases an entry of
/// `children`. Membership is by identity, not by value: two equal-looking
/// nodes are still two nodes.
pub(crate) fn require_child(
    children: &[NodeRef],
    reference: &NodeRef,
    expected: NodeKind,
) -> Result<(), NodeError> {
    require_instance(reference, expected)?;

    if children.iter().any(|child| Arc::ptr_eq(child, reference)) {
        Ok(())
    } else {
        Err(NodeError::OrphanReference(reference.kind()))
    }
}

/// Applies [`require_child`] to every reference of an ordered semantic view.
pub(crate) fn require_child_all(
    children: &[NodeRef],
    references: &[NodeRef],
    expected: NodeKind,
) -> Result<(), NodeError> {
    for reference in references {
        require_child(children, reference, expected)?;
    }

    Ok(())
}

/// Copies a validated view into node-owned storage.
///
/// Runs only after validation has passed. A failed reservation is reported as
/// [`NodeError::Exhausted`] with every supplied node still owned by the
/// caller.
pub(crate) fn collect_refs(references: &[NodeRef]) -> Result<Vec<NodeRef>, NodeError> {
    let mut owned = Vec::new();
    owned
        .try_reserve_exact(references.len())
        .map_err(|_| NodeError::Exhausted)?;
    owned.extend(references.iter().cloned());

    Ok(owned)
}
