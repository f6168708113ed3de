pub mod strategies;

// Re-export the ast types the strategies produce so downstream test crates can
// name the exact `Node`/`NodeRef` instance `arb_*` yields. In gq-ast's own test
// build the crate is compiled twice (once as the lib-under-test, once as this
// crate's dependency), making the two `Node` types distinct; this re-export
// lets those tests refer to the dependency copy that the strategies return.
pub use gq_ast::{Node, NodeRef};
