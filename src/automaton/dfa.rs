//! ε-closure subset construction, turning an `Nfa` into a `Dfa`.
//!
//! Grounded in `include/rpqdb/NFA.hpp`'s `toDFA`: a BFS worklist over
//! label-closed subsets of NFA states, each subset becoming one DFA state.
//! Subsets are represented as `bit_set::BitSet`, a natural fit for this kind
//! of "set of small dense integers" structure.

use std::collections::HashMap;

use bit_set::BitSet;
use itertools::Itertools;
use log::debug;

use crate::automaton::nfa::Nfa;
use crate::automaton::state::{Label, StateId};

/// One state of a deterministic automaton: at most one outgoing transition
/// per non-empty label, never an ε-transition.
#[derive(Debug, Clone)]
pub struct DfaState {
    pub accepting: bool,
    pub transitions: Vec<(Box<[u8]>, StateId)>,
}

/// A deterministic finite automaton produced by subset construction.
#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: StateId,
}

impl Dfa {
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, id: StateId) -> &DfaState {
        &self.states[id]
    }

    pub fn is_accepting(&self, id: StateId) -> bool {
        self.states[id].accepting
    }

    /// The DFA transition out of `id` on `label`, if any.
    pub fn transition(&self, id: StateId, label: &[u8]) -> Option<StateId> {
        self.states[id]
            .transitions
            .iter()
            .find(|(l, _)| l.as_ref() == label)
            .map(|(_, target)| *target)
    }

    /// Whether `word` is accepted, by direct table lookup (no backtracking
    /// needed — that is the point of a DFA).
    pub fn accepts(&self, word: &[u8]) -> bool {
        let mut state = self.start;
        for &b in word {
            match self.transition(state, &[b]) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.is_accepting(state)
    }

    /// Subset construction: turns the NFA's ε-closed state subsets into DFA
    /// states via a BFS worklist.
    pub(crate) fn from_nfa(nfa: &Nfa) -> Dfa {
        let n = nfa.num_states();

        // All distinct non-empty transition labels reachable in the NFA.
        let alphabet: Vec<Box<[u8]>> = nfa
            .states()
            .iter()
            .flat_map(|s| &s.transitions)
            .filter_map(|t| t.label.as_symbol())
            .map(Box::<[u8]>::from)
            .unique()
            .collect();

        // `BitSet` doesn't implement `Hash`, so subsets are keyed in the map
        // by their sorted member list (`BitSet::iter` already yields members
        // in ascending order) while the `BitSet` itself does the closure and
        // move-set arithmetic.
        let subset_key = |s: &BitSet| -> Vec<StateId> { s.iter().collect() };

        let mut states: Vec<DfaState> = Vec::new();
        let mut subset_to_id: HashMap<Vec<StateId>, StateId> = HashMap::new();
        let mut worklist: Vec<(Vec<StateId>, BitSet)> = Vec::new();

        let mut seed = BitSet::with_capacity(n);
        seed.insert(nfa.start());
        let start_subset = nfa.epsilon_closure(&seed);
        let start_key = subset_key(&start_subset);
        let start_id = states.len();
        states.push(DfaState {
            accepting: nfa.any_accepting(&start_subset),
            transitions: Vec::new(),
        });
        subset_to_id.insert(start_key.clone(), start_id);
        worklist.push((start_key, start_subset));

        while let Some((key, subset)) = worklist.pop() {
            let from_id = subset_to_id[&key];
            for label in &alphabet {
                let mut moved = BitSet::with_capacity(n);
                for s in subset.iter() {
                    for t in &nfa.state(s).transitions {
                        if let Label::Symbol(sym) = &t.label {
                            if sym == label {
                                moved.insert(t.target);
                            }
                        }
                    }
                }
                if moved.is_empty() {
                    continue;
                }
                let closed = nfa.epsilon_closure(&moved);
                if closed.is_empty() {
                    continue;
                }
                let closed_key = subset_key(&closed);
                let to_id = *subset_to_id.entry(closed_key.clone()).or_insert_with(|| {
                    let id = states.len();
                    states.push(DfaState {
                        accepting: nfa.any_accepting(&closed),
                        transitions: Vec::new(),
                    });
                    worklist.push((closed_key, closed));
                    id
                });
                states[from_id].transitions.push((label.clone(), to_id));
            }
        }

        debug!(
            "subset construction: {} NFA states -> {} DFA states over {}-symbol alphabet",
            n,
            states.len(),
            alphabet.len()
        );

        Dfa {
            states,
            start: start_id,
        }
    }
}
