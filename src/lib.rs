//! Evaluates regular path queries over directed, edge-labeled graphs.
//!
//! A regular path query pairs a regex over an edge-label alphabet with a
//! data graph; the result is every `(source, target)` pair connected by a
//! path whose label word matches the regex. This crate implements the
//! pipeline end to end: parse the regex to postfix, build an NFA by Thompson
//! construction, determinize it, intersect it with the data graph by a
//! synchronous product, and evaluate the product with one of three
//! reachability engines.
//!
//! ```
//! use rpqdb::{Graph, Strategy};
//!
//! let mut graph = Graph::new();
//! graph.add_edge(1, "a", 2);
//! graph.add_edge(2, "b", 2);
//! graph.add_edge(2, "c", 3);
//!
//! let dfa = rpqdb::compile("ab*c").unwrap();
//! let product = rpqdb::product(&graph, &dfa);
//! let pairs = rpqdb::evaluate(product, Strategy::Bfs, None);
//! // Product vertices get a fresh numbering, so the result is read back via
//! // `Display` or iterated rather than matched against the input graph's ids.
//! assert!(!pairs.is_empty());
//! ```

pub mod automaton;
pub mod error;
pub mod eval;
pub mod graph;
pub mod instrument;
pub mod product;
pub mod query;
pub mod reachable;
pub mod regex;

pub use automaton::{Dfa, Label, Nfa, StateId};
pub use error::{Error, RegexSyntaxError, Result};
pub use eval::Strategy;
pub use graph::{Edge, Graph, VertexId};
pub use instrument::{Instrument, InstrumentGuard};
pub use query::{compile, evaluate, product};
pub use reachable::ReachablePairs;
