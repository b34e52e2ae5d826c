//! Synchronous product construction — intersects a data graph with a
//! query DFA by BFS over `(DfaStateId, VertexId)` pairs.
//!
//! The original C++ expresses the same operation as `NFA::product`
//! (`query_nfa.product(data_nfa)` in `src/query.cpp`), here built directly
//! against the `Graph`/`Dfa` types rather than routing the data graph
//! through its own NFA representation.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::automaton::{Dfa, StateId};
use crate::graph::{Graph, VertexId};

/// Builds the product of `graph` and `dfa`: every graph vertex is seeded as
/// a potential query source (any vertex may be an RPQ source; callers that
/// want a narrower source set filter the result's `starting_vertices`), and
/// the product graph's starting/accepting sets are populated from the DFA's
/// start/accepting states of each product vertex.
pub fn product(graph: &Graph, dfa: &Dfa) -> Graph {
    let mut result = Graph::new();
    let mut ids: HashMap<(StateId, VertexId), VertexId> = HashMap::new();
    let mut next_id: VertexId = 0;
    let mut queue: VecDeque<(StateId, VertexId)> = VecDeque::new();

    for &v in graph.vertices() {
        id_of(&mut ids, &mut next_id, &mut queue, (dfa.start(), v));
    }

    while let Some((d, v)) = queue.pop_front() {
        let id = *ids.get(&(d, v)).expect("pair was enqueued with an id");
        if d == dfa.start() {
            result.starting_vertices.insert(id);
        }
        if dfa.is_accepting(d) {
            result.accepting_vertices.insert(id);
        }
        // Ensure isolated product vertices (no outgoing edges) still show up
        // in the vertex set, matching how `add_edge` registers endpoints.
        result.add_vertex(id);

        for edge in graph.edges_from(v) {
            if let Some(d_next) = dfa.transition(d, &edge.label) {
                let to_id = id_of(&mut ids, &mut next_id, &mut queue, (d_next, edge.dest));
                result.add_edge(id, edge.label.clone(), to_id);
            }
        }
    }

    debug!(
        "product construction: {} vertices, {} edges, {} starting, {} accepting",
        result.vertices().len(),
        result.num_edges(),
        result.starting_vertices.len(),
        result.accepting_vertices.len()
    );

    result
}

/// Returns the product-vertex id for `pair`, allocating and enqueueing a
/// fresh one on first sight.
fn id_of(
    ids: &mut HashMap<(StateId, VertexId), VertexId>,
    next_id: &mut VertexId,
    queue: &mut VecDeque<(StateId, VertexId)>,
    pair: (StateId, VertexId),
) -> VertexId {
    *ids.entry(pair).or_insert_with(|| {
        let id = *next_id;
        *next_id += 1;
        queue.push_back(pair);
        id
    })
}
