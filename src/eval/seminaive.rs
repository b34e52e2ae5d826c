//! The semi-naïve Datalog-style fixed-point evaluator.
//!
//! Evaluates the product graph as the normalized query `E_a · E_b* · E_c`:
//!
//! ```text
//! R(X, Y) = Ec(X, Y)
//! R(X, Z) = Eb(X, Y), R(Y, Z)
//! T(X, Z) = Ea(X, X), R(X, Z)
//! ```
//!
//! Grounded verbatim in `PG` from `src/query.cpp`, including the detail that
//! `Eb_reverse` is only built when the initial `delta_R` is non-empty.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::graph::{Graph, VertexId};
use crate::instrument::Instrument;
use crate::reachable::ReachablePairs;

pub fn evaluate(product: &Graph, instrument: Option<&mut Instrument>) -> ReachablePairs {
    let mut result = ReachablePairs::new();
    if product.starting_vertices.is_empty() || product.accepting_vertices.is_empty() {
        return result;
    }

    let _guard = instrument.map(|i| i.start("PG-SN"));

    let ea = &product.starting_vertices;
    let mut ec: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
    for &v in &product.accepting_vertices {
        ec.entry(v).or_default().insert(v);
    }

    let mut r_prev = ec.clone();
    let mut delta_r_prev = ec;

    let mut eb_reverse: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
    if !delta_r_prev.is_empty() {
        for (&src, edges) in product.adjacency() {
            for edge in edges {
                eb_reverse.entry(edge.dest).or_default().insert(src);
            }
        }
    }

    let mut layers = 0usize;
    while !delta_r_prev.is_empty() {
        layers += 1;
        let mut delta_r: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
        for (y, zs) in &delta_r_prev {
            let Some(xs) = eb_reverse.get(y) else {
                continue;
            };
            for &x in xs {
                match r_prev.get_mut(&x) {
                    None => {
                        r_prev.insert(x, zs.clone());
                        delta_r.insert(x, zs.clone());
                    }
                    Some(existing) => {
                        for &z in zs {
                            if existing.insert(z) {
                                delta_r.entry(x).or_default().insert(z);
                            }
                        }
                    }
                }
            }
        }
        delta_r_prev = delta_r;
    }
    let r = r_prev;

    debug!("PG-SN: {layers} semi-naive layers, {} source rows in R", r.len());

    for (&x, zs) in &r {
        if ea.contains(&x) {
            for &z in zs {
                result.insert(x, z);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accepting_set_short_circuits() {
        let mut g = Graph::new();
        g.add_edge(1, "x", 2);
        g.starting_vertices.insert(1);
        assert!(evaluate(&g, None).is_empty());
    }

    #[test]
    fn transitive_chain_is_resolved() {
        let mut g = Graph::new();
        g.add_edge(1, "b", 2);
        g.add_edge(2, "b", 3);
        g.add_edge(3, "b", 4);
        g.starting_vertices.insert(1);
        g.accepting_vertices.insert(4);

        let r = evaluate(&g, None);
        assert!(r.contains(1, 4));
    }

    #[test]
    fn agrees_with_bfs_on_a_small_cyclic_graph() {
        let mut g = Graph::new();
        g.add_edge(1, "b", 2);
        g.add_edge(2, "b", 3);
        g.add_edge(3, "b", 1);
        g.add_edge(3, "b", 4);
        g.starting_vertices.insert(1);
        g.starting_vertices.insert(2);
        g.accepting_vertices.insert(3);
        g.accepting_vertices.insert(4);

        let sn = evaluate(&g, None);
        let bfs = crate::eval::bfs::evaluate(&g, None);
        assert_eq!(sn, bfs);
    }
}
