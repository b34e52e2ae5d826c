//! The result type shared by all three reachability evaluators.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::graph::VertexId;

/// A source→destinations mapping: `(s, t)` is in the result iff `t` is in
/// `map[s]`. Equality compares pair sets, not insertion order — none of the
/// three engines agree on iteration order, only on content.
#[derive(Debug, Clone, Default)]
pub struct ReachablePairs(HashMap<VertexId, HashSet<VertexId>>);

impl ReachablePairs {
    pub fn new() -> ReachablePairs {
        ReachablePairs(HashMap::new())
    }

    pub fn from_map(map: HashMap<VertexId, HashSet<VertexId>>) -> ReachablePairs {
        ReachablePairs(map)
    }

    pub fn insert(&mut self, src: VertexId, dst: VertexId) {
        self.0.entry(src).or_default().insert(dst);
    }

    pub fn contains(&self, src: VertexId, dst: VertexId) -> bool {
        self.0.get(&src).is_some_and(|dsts| dsts.contains(&dst))
    }

    pub fn sources(&self) -> impl Iterator<Item = &VertexId> {
        self.0.keys()
    }

    pub fn destinations(&self, src: VertexId) -> Option<&HashSet<VertexId>> {
        self.0.get(&src)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(HashSet::is_empty)
    }

    pub fn into_map(self) -> HashMap<VertexId, HashSet<VertexId>> {
        self.0
    }
}

impl PartialEq for ReachablePairs {
    fn eq(&self, other: &Self) -> bool {
        let nonempty = |m: &HashMap<VertexId, HashSet<VertexId>>| {
            m.iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (*k, v.clone()))
                .collect::<HashMap<_, _>>()
        };
        nonempty(&self.0) == nonempty(&other.0)
    }
}

impl Eq for ReachablePairs {}

impl fmt::Display for ReachablePairs {
    /// The textual dump format: one line per source, `"src: t1, t2, …"`, in
    /// arbitrary map order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (src, dsts) in &self.0 {
            if dsts.is_empty() {
                continue;
            }
            let rendered = dsts
                .iter()
                .map(VertexId::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "{src}: {rendered}")?;
        }
        Ok(())
    }
}
