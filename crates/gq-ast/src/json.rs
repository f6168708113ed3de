//! Diagnostic JSON rendering of a tree, enabled by the `ast-json` feature.
//!
//! Semantic views are encoded as indices into the owning node's child list,
//! so a dump never duplicates a subtree. The output is diagnostic-only and
//! has no deserializer: a rebuilt tree could not re-establish the by-identity
//! view invariant the constructors enforce.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::node::{Node, NodeData, NodeRef};

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind().name())?;
        map.serialize_entry("range", self.range())?;

        match self.data() {
            NodeData::Query(query) => {
                map.serialize_entry("clauses", &self.view_indices(query.clauses()))?;
            }
            NodeData::Match(clause) => {
                map.serialize_entry("pattern", &self.position_of(clause.pattern()))?;
                map.serialize_entry(
                    "predicate",
                    &clause
                        .predicate()
                        .map(|predicate| self.position_of(predicate)),
                )?;
            }
            NodeData::Return(clause) => {
                map.serialize_entry("projections", &self.view_indices(clause.projections()))?;
            }
            NodeData::CallSubquery(clause) => {
                map.serialize_entry("clauses", &self.view_indices(clause.clauses()))?;
            }
            NodeData::PathPattern(pattern) => {
                map.serialize_entry("elements", &self.view_indices(pattern.elements()))?;
            }
            NodeData::NamedPath(path) => {
                map.serialize_entry("name", &self.position_of(path.name()))?;
                map.serialize_entry("path", &self.position_of(path.path()))?;
            }
            NodeData::Identifier { name } => {
                map.serialize_entry("name", name)?;
            }
            NodeData::Integer { value } => {
                map.serialize_entry("value", value)?;
            }
            NodeData::String { value } => {
                map.serialize_entry("value", value)?;
            }
            NodeData::BinaryOperator(operator) => {
                map.serialize_entry("operator", operator.operator().symbol())?;
                map.serialize_entry("left", &self.position_of(operator.left()))?;
                map.serialize_entry("right", &self.position_of(operator.right()))?;
            }
        }

        map.serialize_entry("children", self.children())?;
        map.end()
    }
}

impl Node {
    fn view_indices(&self, references: &[NodeRef]) -> Vec<usize> {
        references
            .iter()
            .map(|reference| self.position_of(reference))
            .collect()
    }
}
