//! The state/transition graph shared by every algorithm of the toolkit.
//!
//! An [Automaton] owns its [State]s, keyed by name. Each state carries a multi-valued transition
//! table so that the same type can hold NFAs (with epsilon moves) and DFAs. Whether a given
//! instance is deterministic is not enforced by the type; the phase of the pipeline that produced
//! it decides that.

mod spec;

use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};

pub use spec::AutomatonSpec;

use crate::error::AutomatonError;

/// States are identified by their unique name.
pub type StateId = String;

/// The label of a transition.
/// The epsilon label is never a member of an alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Epsilon,
    Symbol(char),
}

impl Label {
    pub fn symbol(&self) -> Option<char> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(c) => Some(*c),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }
}

impl From<char> for Label {
    fn from(c: char) -> Self {
        Label::Symbol(c)
    }
}

/// A single state together with its outgoing transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: StateId,
    accept: bool,
    transitions: IndexMap<Label, IndexSet<StateId>>,
}

impl State {
    fn new(name: StateId) -> Self {
        Self {
            name,
            accept: false,
            transitions: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &StateId {
        &self.name
    }

    pub fn is_accepting(&self) -> bool {
        self.accept
    }

    /// The targets reachable from this state by reading `label`.
    /// Yields nothing if there is no such transition.
    pub fn targets(&self, label: Label) -> impl Iterator<Item = &StateId> + '_ {
        self.transitions.get(&label).into_iter().flatten()
    }

    /// Iterates over all outgoing transitions as `(label, target)` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (Label, &StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(l, targets)| targets.iter().map(move |t| (*l, t)))
    }
}

/// A finite automaton.
///
/// The start state and every accepting state are members of the node map, and every symbol used
/// on a transition is a member of the alphabet. The mutating methods keep these invariants; they
/// are meant for the construction phase only, downstream algorithms treat automata as read-only
/// values and produce new instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    start: StateId,
    accepts: IndexSet<StateId>,
    alphabet: IndexSet<char>,
    nodes: IndexMap<StateId, State>,
}

impl Automaton {
    /// Creates an automaton consisting of the single, non-accepting start state.
    pub fn new(start: impl Into<StateId>) -> Self {
        let start = start.into();
        let mut nodes = IndexMap::new();
        nodes.insert(start.clone(), State::new(start.clone()));
        Self {
            start,
            accepts: IndexSet::new(),
            alphabet: IndexSet::new(),
            nodes,
        }
    }

    /* Construction */

    /// Adds a state with the given name and returns its id.
    /// Adding an already existing state is a no-op.
    pub fn add_node(&mut self, name: impl Into<StateId>) -> StateId {
        let name = name.into();
        self.nodes
            .entry(name.clone())
            .or_insert_with(|| State::new(name.clone()));
        name
    }

    pub fn add_symbol(&mut self, symbol: char) {
        self.alphabet.insert(symbol);
    }

    /// Adds the transition `from --label--> to`.
    /// Adding an existing transition is a no-op. Symbols are added to the alphabet.
    pub fn add_transition(
        &mut self,
        from: &str,
        to: &str,
        label: Label,
    ) -> Result<(), AutomatonError> {
        for state in [from, to] {
            if !self.nodes.contains_key(state) {
                return Err(AutomatonError::UnknownState(state.to_string()));
            }
        }
        self.insert_transition(from, to, label);
        Ok(())
    }

    pub fn set_start(&mut self, state: &str) -> Result<(), AutomatonError> {
        if !self.nodes.contains_key(state) {
            return Err(AutomatonError::UnknownState(state.to_string()));
        }
        self.start = state.to_string();
        Ok(())
    }

    /// Marks or unmarks `state` as accepting.
    pub fn set_accepting(&mut self, state: &str, accept: bool) -> Result<(), AutomatonError> {
        if !self.nodes.contains_key(state) {
            return Err(AutomatonError::UnknownState(state.to_string()));
        }
        self.insert_accepting(state, accept);
        Ok(())
    }

    /* Unchecked construction, creating states on demand */

    pub(crate) fn insert_transition(&mut self, from: &str, to: &str, label: Label) {
        let from = self.add_node(from);
        self.add_node(to);
        if let Some(node) = self.nodes.get_mut(&from) {
            node.transitions
                .entry(label)
                .or_default()
                .insert(to.to_string());
        }
        if let Label::Symbol(c) = label {
            self.alphabet.insert(c);
        }
    }

    pub(crate) fn insert_accepting(&mut self, state: &str, accept: bool) {
        let state = self.add_node(state);
        if let Some(node) = self.nodes.get_mut(&state) {
            node.accept = accept;
        }
        if accept {
            self.accepts.insert(state);
        } else {
            self.accepts.shift_remove(&state);
        }
    }

    pub(crate) fn insert_start(&mut self, state: &str) {
        self.start = self.add_node(state);
    }

    /// Moves all states, transitions and symbols of `other` into `self`.
    /// State names of both automata must be disjoint. The start and accepting states of `self`
    /// are left untouched, accepting flags of the absorbed states are reset.
    pub(crate) fn absorb(&mut self, other: Automaton) {
        debug_assert!(other.nodes.keys().all(|k| !self.nodes.contains_key(k)));
        self.alphabet.extend(other.alphabet);
        for (name, mut state) in other.nodes {
            state.accept = false;
            self.nodes.insert(name, state);
        }
    }

    /// Returns a state name derived from `base` that is not used in this automaton.
    pub(crate) fn fresh_name(&self, base: &str) -> StateId {
        let mut name = base.to_string();
        while self.nodes.contains_key(&name) {
            name.push('\'');
        }
        name
    }

    /* Queries */

    pub fn start(&self) -> &StateId {
        &self.start
    }

    pub fn accepts(&self) -> &IndexSet<StateId> {
        &self.accepts
    }

    pub fn alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.nodes.values()
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// The number of states.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of the state in declaration order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    /// Returns the targets of `state` on `label`.
    /// An empty result means there is no move, an error means that `state` does not exist.
    pub fn transitions_on(&self, state: &str, label: Label) -> Result<Vec<&StateId>, AutomatonError> {
        self.nodes
            .get(state)
            .map(|s| s.targets(label).collect())
            .ok_or_else(|| AutomatonError::UnknownState(state.to_string()))
    }

    /// Like [transitions_on](Self::transitions_on) but treats unknown states as having no moves.
    pub(crate) fn successors(&self, state: &str, label: Label) -> impl Iterator<Item = &StateId> + '_ {
        self.nodes
            .get(state)
            .into_iter()
            .flat_map(move |s| s.targets(label))
    }

    /// Returns true if `state` exists and is accepting.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.nodes.get(state).map(|s| s.accept).unwrap_or(false)
    }

    /// Returns true if no state has an epsilon move and no state has two targets on the same symbol.
    pub fn is_deterministic(&self) -> bool {
        self.nodes.values().all(|s| {
            s.transitions
                .iter()
                .all(|(l, targets)| !l.is_epsilon() && targets.len() <= 1)
        })
    }

    /// Total number of transitions.
    pub fn num_transitions(&self) -> usize {
        self.nodes.values().map(|s| s.transitions().count()).sum()
    }
}

/// Renders a symbol the way description files and prefix regexes spell it.
pub(crate) fn escape_symbol(c: char) -> String {
    match c {
        '\n' => "'\\n".to_string(),
        '\t' => "'\\t".to_string(),
        '\0' => "'\\0".to_string(),
        '\\' => "'\\\\".to_string(),
        '\'' => "'\\'".to_string(),
        c => format!("'{}", c),
    }
}

/* Pretty */

/// Formats the automaton in the description-file format read by [crate::parse::parse_automaton].
impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_deterministic() { "dfa" } else { "nfa" };
        writeln!(f, "{}", kind)?;
        write!(f, "states")?;
        for name in self.nodes.keys() {
            write!(f, " {}", name)?;
        }
        writeln!(f, " end;")?;
        writeln!(f, "initial {}", self.start)?;
        write!(f, "accept")?;
        for name in &self.accepts {
            write!(f, " {}", name)?;
        }
        writeln!(f, " end;")?;
        writeln!(f, "transitions")?;
        for state in self.nodes.values() {
            // group symbols by target
            let mut by_target: IndexMap<&StateId, Vec<String>> = IndexMap::new();
            for (label, target) in state.transitions() {
                let sym = match label {
                    Label::Epsilon => escape_symbol('\0'),
                    Label::Symbol(c) => escape_symbol(c),
                };
                by_target.entry(target).or_default().push(sym);
            }
            for (target, symbols) in by_target {
                writeln!(f, "  {} {} --> {}", state.name, symbols.join(" "), target)?;
            }
        }
        writeln!(f, "end;")?;
        write!(f, "alphabet")?;
        for c in &self.alphabet {
            write!(f, " {}", escape_symbol(*c))?;
        }
        write!(f, " end;")
    }
}
