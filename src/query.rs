//! The library façade tying the compile/product/evaluate pipeline together.
//!
//! Grounded in `rpqdb::query` from `src/query.cpp`, which wires
//! `re2post`/`post2nfa`/`getDFA`/`product` into one call; here the same
//! three steps are exposed as three separate public functions instead of one
//! monolithic `query`, so a caller can reuse a compiled DFA across many
//! graphs or reuse a product graph across strategies (by cloning it first —
//! evaluation takes the product graph by move).

pub use crate::eval::Strategy;

use crate::automaton::Dfa;
use crate::error::Error;
use crate::graph::Graph;
use crate::instrument::Instrument;
use crate::reachable::ReachablePairs;

/// Compiles a regex to a cached, deterministic DFA.
pub fn compile(regex: &str) -> Result<Dfa, Error> {
    crate::automaton::compile(regex)
}

/// Builds the synchronous product of a data graph and a query DFA. The
/// result is itself a `Graph`, with its starting/accepting sets populated —
/// the product graph has no distinct type, matching the original's `Graph
/// product = graph.product(query_dfa)`.
pub fn product(graph: &Graph, dfa: &Dfa) -> Graph {
    crate::product::product(graph, dfa)
}

/// Evaluates a product graph with the chosen strategy. `product` is taken by
/// value: each evaluator treats it as read-only but the call still consumes
/// it, so running a second strategy over the same product graph requires
/// cloning it upstream — a resource-discipline contract enforced only at
/// this public boundary; internally the evaluators only ever borrow it.
pub fn evaluate(
    product: Graph,
    strategy: Strategy,
    instrument: Option<&mut Instrument>,
) -> ReachablePairs {
    crate::eval::evaluate(&product, strategy, instrument)
}
