//! The data-graph model — a labeled multigraph with optional
//! starting/accepting vertex sets, plus the two line-oriented file readers.
//!
//! Grounded in `include/rpqdb/Graph.hpp`. `starting_vertices` and
//! `accepting_vertices` are absent from that header but are read and written
//! throughout `src/query.cpp` (`product.starting_vertices`, `Ea = ...`), so
//! they are carried here as first-class fields rather than reconstructed on
//! every evaluator call.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Error;

/// A vertex identifier, signed to match the original `int` vertex ids and
/// the file format's decimal-integer convention.
pub type VertexId = i64;

/// One outgoing edge: a label and a destination vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub label: Box<[u8]>,
    pub dest: VertexId,
}

/// A directed, edge-labeled multigraph with optional starting/accepting
/// vertex sets, the latter populated either by a caller (for test fixtures)
/// or by product construction.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<VertexId, Vec<Edge>>,
    vertices: HashSet<VertexId>,
    pub starting_vertices: HashSet<VertexId>,
    pub accepting_vertices: HashSet<VertexId>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Appends an edge and records both endpoints in the vertex set. Edges
    /// are not deduplicated; parallel edges with the same label are kept.
    pub fn add_edge(&mut self, src: VertexId, label: impl Into<Box<[u8]>>, dst: VertexId) {
        self.adjacency.entry(src).or_default().push(Edge {
            label: label.into(),
            dest: dst,
        });
        self.vertices.insert(src);
        self.vertices.insert(dst);
    }

    /// Registers a vertex with no edges of its own, e.g. a product vertex
    /// reached only as someone else's destination (added by product
    /// construction). A no-op if already present.
    pub fn add_vertex(&mut self, v: VertexId) {
        self.vertices.insert(v);
    }

    pub fn adjacency(&self) -> &HashMap<VertexId, Vec<Edge>> {
        &self.adjacency
    }

    pub fn edges_from(&self, v: VertexId) -> &[Edge] {
        self.adjacency.get(&v).map_or(&[], |e| e.as_slice())
    }

    pub fn vertices(&self) -> &HashSet<VertexId> {
        &self.vertices
    }

    /// Total edge count, used by OSPG to compute its degree threshold
    /// `β = ⌊√|E|⌋ + 1`.
    pub fn num_edges(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Loads a graph from a `src label dst` text file, one edge per line,
    /// whitespace-separated. Lines that don't split into exactly three
    /// tokens, or whose `src`/`dst` don't parse as integers, are silently
    /// skipped — this is a non-strict convenience reader, not a general file
    /// format layer.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Graph, Error> {
        let text = fs::read_to_string(path)?;
        let mut graph = Graph::new();
        let mut skipped = 0usize;
        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            let (Some(src), Some(label), Some(dst), None) =
                (tokens.next(), tokens.next(), tokens.next(), tokens.next())
            else {
                if !line.trim().is_empty() {
                    skipped += 1;
                }
                continue;
            };
            match (src.parse::<VertexId>(), dst.parse::<VertexId>()) {
                (Ok(src), Ok(dst)) => graph.add_edge(src, label.as_bytes(), dst),
                _ => skipped += 1,
            }
        }
        debug!(
            "loaded graph: {} vertices, {} edges, {} lines skipped",
            graph.vertices.len(),
            graph.num_edges(),
            skipped
        );
        Ok(graph)
    }

    /// Loads a pre-flattened `a·b*·c` graph: same file format as
    /// `from_file`, but self-loops labeled `a` mark starting vertices and
    /// self-loops labeled `c` mark accepting vertices, instead of the
    /// self-loop edges themselves appearing in the adjacency. Used by
    /// evaluator test fixtures that bypass product construction entirely.
    ///
    /// Grounded in `OSPGTest::run`'s `buildLabelledGraphFromFile` call
    /// (`tests/test_ospg.cpp`).
    pub fn from_labelled_file(path: impl AsRef<Path>) -> Result<Graph, Error> {
        let text = fs::read_to_string(path)?;
        let mut graph = Graph::new();
        let mut skipped = 0usize;
        for line in text.lines() {
            let mut tokens = line.split_whitespace();
            let (Some(src), Some(label), Some(dst), None) =
                (tokens.next(), tokens.next(), tokens.next(), tokens.next())
            else {
                if !line.trim().is_empty() {
                    skipped += 1;
                }
                continue;
            };
            let (src, dst) = match (src.parse::<VertexId>(), dst.parse::<VertexId>()) {
                (Ok(src), Ok(dst)) => (src, dst),
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            if src == dst && label == "a" {
                graph.vertices.insert(src);
                graph.starting_vertices.insert(src);
            } else if src == dst && label == "c" {
                graph.vertices.insert(src);
                graph.accepting_vertices.insert(src);
            } else {
                graph.add_edge(src, label.as_bytes(), dst);
            }
        }
        debug!(
            "loaded labelled graph: {} vertices, {} edges, {} starting, {} accepting, {} lines skipped",
            graph.vertices.len(),
            graph.num_edges(),
            graph.starting_vertices.len(),
            graph.accepting_vertices.len(),
            skipped
        );
        Ok(graph)
    }
}

impl fmt::Display for Graph {
    /// A debug view of the adjacency list, in the same shape as the original
    /// `Graph::print` (`src: (label -> dst) (label -> dst) ...`, one line
    /// per source).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (src, edges) in &self.adjacency {
            write!(f, "{src}: ")?;
            for edge in edges {
                write!(
                    f,
                    "({} -> {}) ",
                    String::from_utf8_lossy(&edge.label),
                    edge.dest
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn add_edge_records_both_endpoints() {
        let mut g = Graph::new();
        g.add_edge(1, "a", 2);
        assert!(g.vertices().contains(&1));
        assert!(g.vertices().contains(&2));
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn parallel_edges_are_preserved() {
        let mut g = Graph::new();
        g.add_edge(1, "a", 2);
        g.add_edge(1, "a", 2);
        assert_eq!(g.edges_from(1).len(), 2);
    }

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("rpqdb-test-{}-{name}.txt", std::process::id()));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn from_file_skips_malformed_lines() {
        let path = write_temp(
            "from-file-skips",
            "1 a 2\nmalformed\n3 b\n4 c 5 6\nnotanumber c 7\n",
        );
        let g = Graph::from_file(&path).unwrap();
        assert_eq!(g.num_edges(), 1);
        assert!(g.vertices().contains(&1));
        assert!(g.vertices().contains(&2));
        fs::remove_file(path).ok();
    }

    #[test]
    fn from_labelled_file_extracts_starting_and_accepting() {
        let path = write_temp("labelled-file", "1 a 1\n5 c 5\n1 b 5\n");
        let g = Graph::from_labelled_file(&path).unwrap();
        assert!(g.starting_vertices.contains(&1));
        assert!(g.accepting_vertices.contains(&5));
        assert_eq!(g.edges_from(1).len(), 1);
        fs::remove_file(path).ok();
    }
}
