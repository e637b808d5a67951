//! Subset construction: NFA to DFA.

use std::collections::{BTreeSet, VecDeque};

use indexmap::IndexMap;
use itertools::Itertools;

use crate::automaton::{Automaton, Label, StateId};

/// Returns the states reachable from `state` by epsilon moves only, including `state` itself.
pub fn epsilon_closure(nfa: &Automaton, state: &str) -> BTreeSet<StateId> {
    epsilon_closure_of(nfa, std::iter::once(state))
}

/// Returns the union of the epsilon closures of `states`.
pub fn epsilon_closure_of<'a>(
    nfa: &Automaton,
    states: impl IntoIterator<Item = &'a str>,
) -> BTreeSet<StateId> {
    let mut closure: BTreeSet<StateId> = states.into_iter().map(str::to_string).collect();
    let mut worklist: Vec<StateId> = closure.iter().cloned().collect();
    while let Some(state) = worklist.pop() {
        for next in nfa.successors(&state, Label::Epsilon) {
            if closure.insert(next.clone()) {
                worklist.push(next.clone());
            }
        }
    }
    closure
}

/// Returns all states reachable from any of `states` by reading `symbol`.
pub fn move_on(nfa: &Automaton, states: &BTreeSet<StateId>, symbol: char) -> BTreeSet<StateId> {
    states
        .iter()
        .flat_map(|s| nfa.successors(s, Label::Symbol(symbol)))
        .cloned()
        .collect()
}

/// The name of the DFA state standing for a set of NFA states: the sorted member names joined
/// by commas. Equal sets always get the same name. Different sets can share a name if state
/// names contain commas; [convert] renames such clashes.
pub fn state_set_name(states: &BTreeSet<StateId>) -> StateId {
    states.iter().join(",")
}

/// Converts `nfa` into an equivalent DFA.
///
/// DFA states are the non-empty sets of NFA states reachable from the epsilon closure of the
/// start state, named by [state_set_name]. There is no transition where the target set would be
/// empty, so the result may be partial. A DFA state accepts if any of its members accepts.
pub fn convert(nfa: &Automaton) -> Automaton {
    let dfa = powerset(nfa, epsilon_closure(nfa, nfa.start()), |states, _| {
        state_set_name(states)
    });
    log::debug!(
        "Subset construction: {} NFA states -> {} DFA states",
        nfa.len(),
        dfa.len()
    );
    dfa
}

/// The worklist construction behind [convert], starting from the state set `initial`.
///
/// `name` is called once per discovered state set, together with the number of sets discovered
/// before it. If it returns a name already taken by another set, the name gets a numeric suffix.
pub(crate) fn powerset(
    nfa: &Automaton,
    initial: BTreeSet<StateId>,
    mut name: impl FnMut(&BTreeSet<StateId>, usize) -> StateId,
) -> Automaton {
    let initial_name = name(&initial, 0);

    let mut dfa = Automaton::new(initial_name.clone());
    for &c in nfa.alphabet() {
        dfa.add_symbol(c);
    }

    let mut known: IndexMap<BTreeSet<StateId>, StateId> = IndexMap::new();
    let mut unmarked = VecDeque::new();
    register(&mut dfa, nfa, &mut known, &mut unmarked, initial, initial_name);

    while let Some(states) = unmarked.pop_front() {
        let from = match known.get(&states) {
            Some(from) => from.clone(),
            None => continue,
        };
        log::trace!("Expanding DFA state {}", from);
        for &c in nfa.alphabet() {
            let target = epsilon_closure_of(nfa, move_on(nfa, &states, c).iter().map(String::as_str));
            if target.is_empty() {
                continue;
            }
            let to = match known.get(&target) {
                Some(to) => to.clone(),
                None => {
                    let to = unused_name(&dfa, name(&target, known.len()));
                    register(&mut dfa, nfa, &mut known, &mut unmarked, target, to.clone());
                    to
                }
            };
            dfa.insert_transition(&from, &to, Label::Symbol(c));
        }
    }
    dfa
}

fn unused_name(dfa: &Automaton, name: StateId) -> StateId {
    if !dfa.contains(&name) {
        return name;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{}.{}", name, suffix);
        if !dfa.contains(&candidate) {
            log::trace!("DFA state name `{}` is taken, using `{}`", name, candidate);
            return candidate;
        }
        suffix += 1;
    }
}

fn register(
    dfa: &mut Automaton,
    nfa: &Automaton,
    known: &mut IndexMap<BTreeSet<StateId>, StateId>,
    unmarked: &mut VecDeque<BTreeSet<StateId>>,
    states: BTreeSet<StateId>,
    name: StateId,
) {
    dfa.add_node(name.clone());
    if states.iter().any(|s| nfa.is_accepting(s)) {
        dfa.insert_accepting(&name, true);
    }
    known.insert(states.clone(), name);
    unmarked.push_back(states);
}
