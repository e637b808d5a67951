use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;

use crate::automaton::{Automaton, Label, StateId};

use super::{reachable, Minimizer};

/// Minimization by partition refinement.
///
/// Starting from the partition into accepting and non-accepting states, classes are split until
/// all members of every class agree, for every symbol, on the class of their successor. A
/// missing transition counts as a successor class of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionRefinement;

/// The current partition, with a reverse index from states to the position of their class.
struct Partition {
    classes: Vec<Vec<StateId>>,
    class_of: HashMap<StateId, usize>,
}

impl Partition {
    fn new(initial: Vec<Vec<StateId>>) -> Self {
        let mut partition = Self {
            classes: Vec::new(),
            class_of: HashMap::new(),
        };
        for class in initial.into_iter().filter(|c| !c.is_empty()) {
            partition.push(class);
        }
        partition
    }

    fn push(&mut self, class: Vec<StateId>) -> usize {
        let idx = self.classes.len();
        for s in &class {
            self.class_of.insert(s.clone(), idx);
        }
        self.classes.push(class);
        idx
    }

    /// Groups the members of class `idx` by the class of their successor on `symbol`.
    fn split(&self, dfa: &Automaton, idx: usize, symbol: char) -> Vec<Vec<StateId>> {
        let mut groups: IndexMap<Option<usize>, Vec<StateId>> = IndexMap::new();
        for s in &self.classes[idx] {
            let target = dfa
                .successors(s, Label::Symbol(symbol))
                .next()
                .and_then(|t| self.class_of.get(t).copied());
            groups.entry(target).or_default().push(s.clone());
        }
        groups.into_values().collect()
    }

    /// Replaces class `idx` by `parts`. The first part keeps the index.
    fn replace(&mut self, idx: usize, parts: Vec<Vec<StateId>>) {
        let mut parts = parts.into_iter();
        if let Some(first) = parts.next() {
            self.classes[idx] = first;
        }
        for part in parts {
            self.push(part);
        }
    }
}

impl Minimizer for PartitionRefinement {
    fn minimize(&self, dfa: &Automaton) -> Automaton {
        let dfa = reachable(dfa);
        let (accepting, rejecting): (Vec<_>, Vec<_>) = dfa
            .states()
            .map(|s| s.name().clone())
            .partition(|s| dfa.is_accepting(s));
        let mut partition = Partition::new(vec![accepting, rejecting]);

        let mut queued: Vec<bool> = partition.classes.iter().map(|c| c.len() > 1).collect();
        let mut worklist: VecDeque<usize> = (0..partition.classes.len())
            .filter(|&i| queued[i])
            .collect();

        while let Some(idx) = worklist.pop_front() {
            queued[idx] = false;
            for &c in dfa.alphabet() {
                let parts = partition.split(&dfa, idx, c);
                if parts.len() > 1 {
                    log::trace!(
                        "Splitting class of {} states into {} on {:?}",
                        partition.classes[idx].len(),
                        parts.len(),
                        c
                    );
                    partition.replace(idx, parts);
                    queued.resize(partition.classes.len(), false);
                    // Classes checked earlier may be unstable with respect to the refined partition
                    for (i, class) in partition.classes.iter().enumerate() {
                        if class.len() > 1 && !queued[i] {
                            queued[i] = true;
                            worklist.push_back(i);
                        }
                    }
                    break;
                }
            }
        }

        let min = collapse(&dfa, &partition);
        log::debug!(
            "Partition refinement: {} states -> {} states",
            dfa.len(),
            min.len()
        );
        min
    }
}

/// Builds the quotient automaton, one state per class.
/// The class of the start state is represented by the start state, every other class by its
/// first member.
fn collapse(dfa: &Automaton, partition: &Partition) -> Automaton {
    let mut rep_of: HashMap<&StateId, &StateId> = HashMap::new();
    for class in &partition.classes {
        let rep = if class.contains(dfa.start()) {
            dfa.start()
        } else {
            &class[0]
        };
        for s in class {
            rep_of.insert(s, rep);
        }
    }

    let mut min = Automaton::new(dfa.start().clone());
    for &c in dfa.alphabet() {
        min.add_symbol(c);
    }
    for state in dfa.states() {
        if rep_of.get(state.name()).copied() != Some(state.name()) {
            continue;
        }
        min.add_node(state.name().clone());
        if state.is_accepting() {
            min.insert_accepting(state.name(), true);
        }
        for (label, target) in state.transitions() {
            let target = rep_of.get(target).copied().unwrap_or(target);
            min.insert_transition(state.name(), target, label);
        }
    }
    min
}
