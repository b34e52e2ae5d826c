//! The per-source BFS baseline.
//!
//! For each starting vertex, a fresh BFS over the product graph, recording
//! every reachable accepting vertex. No cross-source memoization — this is
//! the `O(|starts| · (|V|+|E|))` baseline the other two engines improve on.

use std::collections::{HashSet, VecDeque};

use crate::graph::Graph;
use crate::instrument::Instrument;
use crate::reachable::ReachablePairs;

pub fn evaluate(product: &Graph, instrument: Option<&mut Instrument>) -> ReachablePairs {
    let mut result = ReachablePairs::new();
    if product.starting_vertices.is_empty() || product.accepting_vertices.is_empty() {
        return result;
    }

    let _guard = instrument.map(|i| i.start("PG-BFS"));

    for &src in &product.starting_vertices {
        let mut visited: HashSet<_> = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(src);
        queue.push_back(src);
        while let Some(v) = queue.pop_front() {
            if product.accepting_vertices.contains(&v) {
                result.insert(src, v);
            }
            for edge in product.edges_from(v) {
                if visited.insert(edge.dest) {
                    queue.push_back(edge.dest);
                }
            }
        }
    }

    result
}
