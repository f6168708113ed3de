use std::fmt::{self, Display};
use std::sync::OnceLock;

/// The closed set of node kinds.
///
/// Concrete kinds tag constructed nodes. The capability kinds (`QueryClause`,
/// `Expression`, `Literal`, `Pattern`) are never instantiated; they exist as
/// ancestors in the kind lattice and as expected capabilities in construction
/// checks. A kind may have several parents, so [`NodeKind::is_a`] answers over
/// a DAG rather than a single chain: a `NamedPath` node is both a pattern and
/// an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Query,
    Match,
    Return,
    CallSubquery,
    PathPattern,
    NamedPath,
    Identifier,
    Integer,
    String,
    BinaryOperator,
    QueryClause,
    Expression,
    Literal,
    Pattern,
}

impl NodeKind {
    pub(crate) const COUNT: usize = 14;

    const ALL: [NodeKind; Self::COUNT] = [
        NodeKind::Query,
        NodeKind::Match,
        NodeKind::Return,
        NodeKind::CallSubquery,
        NodeKind::PathPattern,
        NodeKind::NamedPath,
        NodeKind::Identifier,
        NodeKind::Integer,
        NodeKind::String,
        NodeKind::BinaryOperator,
        NodeKind::QueryClause,
        NodeKind::Expression,
        NodeKind::Literal,
        NodeKind::Pattern,
    ];

    /// Direct parents in the kind lattice.
    pub fn parents(self) -> &'static [NodeKind] {
        match self {
            NodeKind::Match | NodeKind::Return | NodeKind::CallSubquery => {
                &[NodeKind::QueryClause]
            }
            NodeKind::PathPattern => &[NodeKind::Pattern],
            NodeKind::NamedPath => &[NodeKind::Pattern, NodeKind::Expression],
            NodeKind::Identifier | NodeKind::BinaryOperator => &[NodeKind::Expression],
            NodeKind::Integer | NodeKind::String => &[NodeKind::Literal],
            NodeKind::Literal => &[NodeKind::Expression],
            NodeKind::Query
            | NodeKind::QueryClause
            | NodeKind::Expression
            | NodeKind::Pattern => &[],
        }
    }

    /// Human-readable name, used only in diagnostics. No parsing or equality
    /// logic may depend on it.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Query => "query",
            NodeKind::Match => "MATCH",
            NodeKind::Return => "RETURN",
            NodeKind::CallSubquery => "CALL SUBQUERY",
            NodeKind::PathPattern => "path pattern",
            NodeKind::NamedPath => "named path",
            NodeKind::Identifier => "identifier",
            NodeKind::Integer => "integer",
            NodeKind::String => "string",
            NodeKind::BinaryOperator => "binary operator",
            NodeKind::QueryClause => "query clause",
            NodeKind::Expression => "expression",
            NodeKind::Literal => "literal",
            NodeKind::Pattern => "pattern",
        }
    }

    /// True when `self` is `ancestor`, or reaches it by following parent
    /// edges transitively.
    pub fn is_a(self, ancestor: NodeKind) -> bool {
        ancestor_masks()[self as usize] & (1u16 << ancestor as usize) != 0
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reflexive-transitive closure of the parent edges, one bitmask per kind.
///
/// The lattice is static and acyclic, so the fixpoint below settles after at
/// most `COUNT` rounds and `is_a` degenerates to a set-membership test.
fn ancestor_masks() -> &'static [u16; NodeKind::COUNT] {
    static MASKS: OnceLock<[u16; NodeKind::COUNT]> = OnceLock::new();
    MASKS.get_or_init(|| {
        let mut masks = [0u16; NodeKind::COUNT];
        for kind in NodeKind::ALL {
            masks[kind as usize] = 1u16 << kind as usize;
        }
        loop {
            let mut changed = false;
            for kind in NodeKind::ALL {
                let mut mask = masks[kind as usize];
                for parent in kind.parents() {
                    mask |= masks[*parent as usize];
                }
                if mask != masks[kind as usize] {
                    masks[kind as usize] = mask;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        masks
    })
}
