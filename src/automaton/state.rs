//! Shared vocabulary for NFA and DFA states: dense integer handles into a
//! per-automaton arena, and the label type carried by a transition.
//!
//! Spec note: states are value-identified by handle only within one
//! automaton; the same `StateId` in two different `Nfa`s refers to unrelated
//! states. This is the "dense integer handles into a per-automaton arena"
//! design explicitly called for in place of the original C++'s raw owning
//! pointers, which removes any pointer-stability requirement across the
//! moves that happen during Thompson construction.

use std::fmt;

/// A handle into an automaton's state arena. Only meaningful relative to the
/// `Nfa`/`Dfa` that produced it.
pub type StateId = usize;

/// A transition label. The empty label (`Epsilon`) is only ever produced by
/// Thompson construction and is never present on a DFA transition.
///
/// `Symbol` holds an arbitrary byte string rather than a single byte: regex
/// literals are always one byte (§1), but graph edge labels read from a file
/// may be any non-whitespace token, and the two are compared for equality
/// during product construction, so they share one representation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Epsilon,
    Symbol(Box<[u8]>),
}

impl Label {
    pub fn symbol(bytes: impl Into<Box<[u8]>>) -> Label {
        Label::Symbol(bytes.into())
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    pub fn as_symbol(&self) -> Option<&[u8]> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(b) => Some(b),
        }
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Symbol(b) => write!(f, "{:?}", String::from_utf8_lossy(b)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Symbol(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

/// One outgoing edge of a state: a label paired with the target state.
#[derive(Debug, Clone)]
pub struct Transition {
    pub label: Label,
    pub target: StateId,
}
