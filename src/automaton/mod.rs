//! The regex→NFA→DFA half of the pipeline.

pub mod dfa;
pub mod nfa;
pub mod state;

pub use dfa::Dfa;
pub use nfa::Nfa;
pub use state::{Label, StateId, Transition};

use crate::error::Error;

/// Compiles a regex straight to a cached, deterministic `Dfa`: parse to
/// postfix, build an NFA by Thompson construction, determinize.
pub fn compile(regex: &str) -> Result<Dfa, Error> {
    let postfix = crate::regex::to_postfix(regex)?;
    let mut nfa = Nfa::build(&postfix)?;
    Ok(nfa.dfa().clone())
}
