//! The three reachable-pairs evaluators and the `Strategy` that selects
//! between them.

pub mod bfs;
pub mod ospg;
pub mod seminaive;

use crate::graph::Graph;
use crate::instrument::Instrument;
use crate::reachable::ReachablePairs;

/// Which of the three evaluators to run over a product graph. All three are
/// total functions given a well-formed product graph and agree on the
/// resulting pair set; they differ only in space/work/output sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Per-source BFS baseline.
    Bfs,
    /// Semi-naïve Datalog-style fixed point.
    SemiNaive,
    /// Output-sensitive heavy/light split.
    Ospg,
}

/// Evaluates `product` with the chosen strategy, optionally recording timing
/// spans into `instrument`.
pub fn evaluate(
    product: &Graph,
    strategy: Strategy,
    instrument: Option<&mut Instrument>,
) -> ReachablePairs {
    match strategy {
        Strategy::Bfs => bfs::evaluate(product, instrument),
        Strategy::SemiNaive => seminaive::evaluate(product, instrument),
        Strategy::Ospg => ospg::evaluate(product, instrument),
    }
}
