//! The output-sensitive evaluator (OSPG).
//!
//! Splits the same `R` relation the semi-naïve evaluator computes into a
//! `R_light`/`R_heavy` partition at a degree threshold
//! `β = ⌊√|E_product|⌋ + 1`, so that only the light half of `R` is ever
//! fully materialized; heavy sources are answered instead by a forward
//! closure `T` chased from starting vertices.
//!
//! Grounded verbatim in `OSPG` from `src/query.cpp` (the `unordered_set`
//! variant — `OSPG_OrderedSet`/`OSPG_OrderedVector` trade determinism for a
//! cheaper truncation and are not part of this system's contract).

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

    let _guard = instrument.map(|i| i.start("OSPG"));

    let beta = (product.num_edges() as f64).sqrt().floor() as usize + 1;
    debug!("OSPG: degree bound is {beta}");

    let ea = &product.starting_vertices;
    let mut degree: HashMap<VertexId, usize> = HashMap::new();
    let mut ec: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
    for &v in &product.accepting_vertices {
        ec.entry(v).or_default().insert(v);
        degree.insert(v, 1);
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

    while !delta_r_prev.is_empty() {
        let mut delta_r: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
        for (y, zs) in &delta_r_prev {
            let Some(xs) = eb_reverse.get(y) else {
                continue;
            };
            for &x in xs {
                let mut d = *degree.get(&x).unwrap_or(&0);
                for &z in zs {
                    if d >= beta {
                        break;
                    }
                    let novel = !r_prev.get(&x).is_some_and(|zs| zs.contains(&z));
                    if novel {
                        delta_r.entry(x).or_default().insert(z);
                        r_prev.entry(x).or_default().insert(z);
                        d += 1;
                    }
                }
                degree.insert(x, d);
            }
        }
        delta_r_prev = delta_r;
    }
    let r = r_prev;

    let mut r_heavy: HashSet<VertexId> = HashSet::new();
    let mut r_light: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
    for (&x, &d) in &degree {
        if d >= beta {
            r_heavy.insert(x);
        } else if let Some(zs) = r.get(&x) {
            r_light.insert(x, zs.clone());
        }
    }

    // Q_light(x,y) :- R_light(x,y), E_a(x,x).
    for (&x, zs) in &r_light {
        if ea.contains(&x) {
            for &z in zs {
                result.insert(x, z);
            }
        }
    }

    // Forward closure T for heavy sources, seeded from heavy starting
    // vertices, chased through Eb, then intersected with accepting vertices.
    let mut delta_t_prev: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
    for &y in &r_heavy {
        if ea.contains(&y) {
            delta_t_prev.entry(y).or_default().insert(y);
        }
    }
    let mut t_prev = delta_t_prev.clone();

    let mut eb: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
    if !delta_t_prev.is_empty() {
        for (&src, edges) in product.adjacency() {
            for edge in edges {
                eb.entry(src).or_default().insert(edge.dest);
            }
        }
    }

    let mut layers = 0usize;
    while !delta_t_prev.is_empty() {
        layers += 1;
        let mut delta_t: HashMap<VertexId, HashSet<VertexId>> = HashMap::new();
        for (x, zs) in &delta_t_prev {
            for z in zs {
                let Some(ys) = eb.get(z) else { continue };
                match t_prev.get_mut(x) {
                    None => {
                        t_prev.insert(*x, ys.clone());
                        delta_t.insert(*x, ys.clone());
                    }
                    Some(existing) => {
                        for &y in ys {
                            if existing.insert(y) {
                                delta_t.entry(*x).or_default().insert(y);
                            }
                        }
                    }
                }
            }
        }
        delta_t_prev = delta_t;
    }
    let t = t_prev;

    debug!(
        "OSPG: {} light sources, {} heavy sources, {layers} forward-closure layers",
        r_light.len(),
        r_heavy.len()
    );

    // Q_heavy(x,y) :- T(x,z), E_c(z,y). E_c is reflexive, so this is just the
    // members of T(x, ·) that are themselves accepting vertices.
    for (&x, zs) in &t {
        for &z in zs {
            if ec.contains_key(&z) {
                result.insert(x, z);
            }
        }
    }

    result
}
