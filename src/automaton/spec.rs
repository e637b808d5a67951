use crate::error::AutomatonError;

use super::{Automaton, Label, StateId};

/// A neutral description of an automaton, as produced by a description-file reader.
///
/// For NFAs, the symbol `'\0'` on a transition denotes an epsilon move; it must not be declared
/// in the alphabet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomatonSpec {
    pub states: Vec<StateId>,
    pub start: StateId,
    pub accepts: Vec<StateId>,
    pub transitions: Vec<(StateId, Vec<char>, StateId)>,
    pub alphabet: Vec<char>,
}

pub(crate) const EPSILON_SYMBOL: char = '\0';

impl Automaton {
    /// Materializes an automaton from its description.
    ///
    /// Fails with [AutomatonError::AlphabetError] if a transition uses an undeclared symbol or the
    /// alphabet declares the epsilon symbol `'\0'`, and
    /// with [AutomatonError::UnknownState] if a referenced state is not declared.
    pub fn from_spec(desc: &AutomatonSpec) -> Result<Self, AutomatonError> {
        if !desc.states.contains(&desc.start) {
            return Err(AutomatonError::UnknownState(desc.start.clone()));
        }
        if desc.alphabet.contains(&EPSILON_SYMBOL) {
            return Err(AutomatonError::AlphabetError(EPSILON_SYMBOL));
        }
        let mut automaton = Automaton::new(desc.start.clone());
        for state in &desc.states {
            automaton.add_node(state.clone());
        }
        for &c in &desc.alphabet {
            automaton.add_symbol(c);
        }
        for accept in &desc.accepts {
            automaton.set_accepting(accept, true)?;
        }
        for (from, symbols, to) in &desc.transitions {
            for &c in symbols {
                let label = if c == EPSILON_SYMBOL {
                    Label::Epsilon
                } else if desc.alphabet.contains(&c) {
                    Label::Symbol(c)
                } else {
                    return Err(AutomatonError::AlphabetError(c));
                };
                automaton.add_transition(from, to, label)?;
            }
        }
        log::debug!(
            "Loaded automaton with {} states and {} transitions",
            automaton.len(),
            automaton.num_transitions()
        );
        Ok(automaton)
    }
}
