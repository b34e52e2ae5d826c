//! Thompson construction of an NFA from postfix regex bytes.
//!
//! Grounded in `include/rpqdb/NFA.hpp`'s `post2nfa`. The original merges
//! separately-allocated sub-automata together on `.`/`|`/`*`; here every
//! fragment is built directly into one shared arena (`Nfa::states`), so
//! there is no merge step and no pointer-stability hazard to worry about.

use crate::automaton::dfa::Dfa;
use crate::automaton::state::{Label, StateId, Transition};
use crate::error::Error;

/// A single state in an NFA's arena.
#[derive(Debug, Clone)]
pub struct NfaState {
    pub accepting: bool,
    pub transitions: Vec<Transition>,
}

impl NfaState {
    fn new(accepting: bool) -> NfaState {
        NfaState {
            accepting,
            transitions: Vec::new(),
        }
    }
}

/// A non-deterministic finite automaton, built by Thompson construction and
/// consumed by subset construction (`Nfa::dfa`).
///
/// Caches its DFA projection and tracks a dirty flag so repeated calls to
/// `dfa()` without intervening mutation are idempotent.
pub struct Nfa {
    states: Vec<NfaState>,
    start: StateId,
    /// The "current end" state, meaningful only while under construction by
    /// `build`; not part of the automaton's public contract afterward.
    end: StateId,
    dfa_cache: Option<Dfa>,
    dirty: bool,
}

/// A fragment under construction: an entry and exit state for one postfix
/// operator's operand(s).
struct Fragment {
    start: StateId,
    end: StateId,
}

impl Nfa {
    fn empty() -> Nfa {
        Nfa {
            states: Vec::new(),
            start: 0,
            end: 0,
            dfa_cache: None,
            dirty: true,
        }
    }

    fn add_state(&mut self, accepting: bool) -> StateId {
        self.dirty = true;
        self.states.push(NfaState::new(accepting));
        self.states.len() - 1
    }

    fn add_transition(&mut self, from: StateId, to: StateId, label: Label) {
        self.dirty = true;
        self.states[from].transitions.push(Transition { label, target: to });
    }

    fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.add_transition(from, to, Label::Epsilon);
    }

    fn set_accepting(&mut self, state: StateId, accepting: bool) {
        self.dirty = true;
        self.states[state].accepting = accepting;
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state(&self, id: StateId) -> &NfaState {
        &self.states[id]
    }

    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    /// Builds an NFA from postfix regex bytes (the output of
    /// `regex::to_postfix`) via Thompson construction.
    pub fn build(postfix: &[u8]) -> Result<Nfa, Error> {
        if postfix.is_empty() {
            return Err(Error::Postfix("empty postfix expression".to_string()));
        }

        let mut nfa = Nfa::empty();
        let mut stack: Vec<Fragment> = Vec::new();

        for &ch in postfix {
            match ch {
                b'.' => {
                    let b = pop(&mut stack, "concatenation")?;
                    let a = pop(&mut stack, "concatenation")?;
                    nfa.set_accepting(a.end, false);
                    nfa.add_epsilon(a.end, b.start);
                    stack.push(Fragment {
                        start: a.start,
                        end: b.end,
                    });
                }
                b'|' => {
                    let b = pop(&mut stack, "alternation")?;
                    let a = pop(&mut stack, "alternation")?;
                    let start = nfa.add_state(false);
                    let end = nfa.add_state(true);
                    nfa.add_epsilon(start, a.start);
                    nfa.add_epsilon(start, b.start);
                    nfa.set_accepting(a.end, false);
                    nfa.set_accepting(b.end, false);
                    nfa.add_epsilon(a.end, end);
                    nfa.add_epsilon(b.end, end);
                    stack.push(Fragment { start, end });
                }
                b'*' => {
                    let a = pop(&mut stack, "Kleene star")?;
                    let start = nfa.add_state(false);
                    let end = nfa.add_state(true);
                    nfa.add_epsilon(start, end);
                    nfa.add_epsilon(start, a.start);
                    nfa.set_accepting(a.end, false);
                    nfa.add_epsilon(a.end, end);
                    nfa.add_epsilon(a.end, a.start);
                    stack.push(Fragment { start, end });
                }
                literal => {
                    let start = nfa.add_state(false);
                    let end = nfa.add_state(true);
                    nfa.add_transition(start, end, Label::symbol(vec![literal]));
                    stack.push(Fragment { start, end });
                }
            }
        }

        if stack.len() != 1 {
            return Err(Error::Postfix(format!(
                "expected exactly one operand on the stack, found {}",
                stack.len()
            )));
        }
        let frag = stack.pop().unwrap();
        nfa.start = frag.start;
        nfa.end = frag.end;
        Ok(nfa)
    }

    /// ε-closure of a set of states: the least set containing `states` and
    /// closed under ε-transitions. Stack-based DFS.
    pub(crate) fn epsilon_closure(&self, states: &bit_set::BitSet) -> bit_set::BitSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().collect();
        while let Some(s) = stack.pop() {
            for t in &self.states[s].transitions {
                if t.label.is_epsilon() && !closure.contains(t.target) {
                    closure.insert(t.target);
                    stack.push(t.target);
                }
            }
        }
        closure
    }

    pub(crate) fn any_accepting(&self, states: &bit_set::BitSet) -> bool {
        states.iter().any(|s| self.states[s].accepting)
    }

    /// Returns the cached DFA projection, rebuilding via subset construction
    /// if the NFA has been mutated since the last call (it never is, once
    /// `build` returns, but the cache/dirty-flag plumbing is kept explicit
    /// to mirror the dirty-flag contract a mutable arena-backed NFA needs in
    /// general).
    pub fn dfa(&mut self) -> &Dfa {
        if self.dirty || self.dfa_cache.is_none() {
            self.dfa_cache = Some(Dfa::from_nfa(self));
            self.dirty = false;
        }
        self.dfa_cache.as_ref().unwrap()
    }

    /// Whether `word` is accepted, via BFS simulation over ε- and
    /// symbol-transitions. Used only by tests; evaluation never calls this
    /// directly.
    pub fn accepts(&self, word: &[u8]) -> bool {
        use std::collections::VecDeque;
        let mut queue: VecDeque<(StateId, usize)> = VecDeque::new();
        let mut seen = std::collections::HashSet::new();
        queue.push_back((self.start, 0));
        while let Some((state, pos)) = queue.pop_front() {
            if !seen.insert((state, pos)) {
                continue;
            }
            if pos == word.len() && self.states[state].accepting {
                return true;
            }
            for t in &self.states[state].transitions {
                match &t.label {
                    Label::Epsilon => queue.push_back((t.target, pos)),
                    Label::Symbol(sym) => {
                        if pos < word.len() && sym.as_ref() == [word[pos]] {
                            queue.push_back((t.target, pos + 1));
                        }
                    }
                }
            }
        }
        false
    }
}

fn pop(stack: &mut Vec<Fragment>, op: &str) -> Result<Fragment, Error> {
    stack
        .pop()
        .ok_or_else(|| Error::Postfix(format!("insufficient operands for {op}")))
}
