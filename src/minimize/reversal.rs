use crate::{
    automaton::{Automaton, Label},
    subset,
};

use super::{reachable, Minimizer};

/// Brzozowski's minimization: reverse, determinize and prune, twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleReversal;

impl Minimizer for DoubleReversal {
    fn minimize(&self, dfa: &Automaton) -> Automaton {
        let once = reachable(&determinize(&reverse(dfa)));
        let twice = reachable(&determinize(&reverse(&once)));
        log::debug!(
            "Double reversal: {} states -> {} (reversed) -> {} states",
            dfa.len(),
            once.len(),
            twice.len()
        );
        twice
    }
}

/// Reverses every transition and swaps the roles of start and accepting states.
///
/// The original start state becomes the only accepting state. Since the accepting states of
/// `automaton` all become start candidates, the result gets a fresh start state with epsilon
/// moves to each of them.
pub fn reverse(automaton: &Automaton) -> Automaton {
    let start = automaton.fresh_name("start");
    let mut reversed = Automaton::new(start.clone());
    for &c in automaton.alphabet() {
        reversed.add_symbol(c);
    }
    for state in automaton.states() {
        reversed.add_node(state.name().clone());
    }
    reversed.insert_accepting(automaton.start(), true);
    for state in automaton.states() {
        for (label, target) in state.transitions() {
            reversed.insert_transition(target, state.name(), label);
        }
    }
    for accept in automaton.accepts() {
        reversed.insert_transition(&start, accept, Label::Epsilon);
    }
    reversed
}

/// Powerset construction over the subsets reachable from the start state.
/// States of the result are named `d0`, `d1`, ... in order of discovery.
///
/// A start state that only fans out by epsilon moves, has no incoming transitions and does not
/// accept (as produced by [reverse]) is left out of the initial subset. It can never be entered
/// again, so keeping it would make the initial subset differ from an otherwise equal one.
pub fn determinize(nfa: &Automaton) -> Automaton {
    let mut initial = subset::epsilon_closure(nfa, nfa.start());
    if is_entry_only(nfa, nfa.start()) {
        initial.remove(nfa.start());
    }
    subset::powerset(nfa, initial, |_, index| format!("d{}", index))
}

fn is_entry_only(nfa: &Automaton, state: &str) -> bool {
    let Some(entry) = nfa.state(state) else {
        return false;
    };
    !entry.is_accepting()
        && entry.transitions().all(|(label, _)| label.is_epsilon())
        && nfa
            .states()
            .all(|s| s.transitions().all(|(_, target)| target != state))
}
