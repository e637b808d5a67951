//! DFA minimization.
//!
//! Two interchangeable strategies are provided, [PartitionRefinement] and [DoubleReversal]. Both
//! produce a DFA accepting the same language as their input with no more states; the results
//! can differ in state names and in whether a non-accepting sink state is kept.

mod partition;
mod reversal;

use std::collections::{HashSet, VecDeque};

pub use partition::PartitionRefinement;
pub use reversal::{determinize, reverse, DoubleReversal};

use crate::automaton::{Automaton, StateId};

/// A DFA minimization strategy.
pub trait Minimizer {
    /// Returns a minimal DFA equivalent to `dfa`.
    /// The input must be deterministic.
    fn minimize(&self, dfa: &Automaton) -> Automaton;
}

/// Selects a [Minimizer] at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Strategy {
    #[default]
    #[value(name = "partition")]
    PartitionRefinement,
    #[value(name = "reversal")]
    DoubleReversal,
}

impl Minimizer for Strategy {
    fn minimize(&self, dfa: &Automaton) -> Automaton {
        match self {
            Strategy::PartitionRefinement => PartitionRefinement.minimize(dfa),
            Strategy::DoubleReversal => DoubleReversal.minimize(dfa),
        }
    }
}

/// Removes all states that cannot be reached from the start state.
pub fn reachable(automaton: &Automaton) -> Automaton {
    let mut seen: HashSet<&StateId> = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(automaton.start());
    queue.push_back(automaton.start());
    while let Some(name) = queue.pop_front() {
        if let Some(state) = automaton.state(name) {
            for (_, target) in state.transitions() {
                if seen.insert(target) {
                    queue.push_back(target);
                }
            }
        }
    }

    let mut pruned = Automaton::new(automaton.start().clone());
    for &c in automaton.alphabet() {
        pruned.add_symbol(c);
    }
    for state in automaton.states().filter(|s| seen.contains(s.name())) {
        pruned.add_node(state.name().clone());
        if state.is_accepting() {
            pruned.insert_accepting(state.name(), true);
        }
        for (label, target) in state.transitions() {
            pruned.insert_transition(state.name(), target, label);
        }
    }
    if pruned.len() < automaton.len() {
        log::trace!(
            "Pruned {} unreachable states",
            automaton.len() - pruned.len()
        );
    }
    pruned
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{
        automaton::{AutomatonSpec, Label},
        lexer::accepts_string,
        regex::{Production, ARBITRARY_SYMBOLS},
        subset, thompson,
    };

    fn words(max_len: usize) -> Vec<String> {
        let mut all = vec![String::new()];
        let mut last = vec![String::new()];
        for _ in 0..max_len {
            last = last
                .iter()
                .flat_map(|w| ARBITRARY_SYMBOLS.iter().map(move |c| format!("{}{}", w, c)))
                .collect();
            all.extend(last.iter().cloned());
        }
        all
    }

    fn dfa_of(re: &Production) -> Automaton {
        subset::convert(&thompson::build(re))
    }

    /// s0 -a-> s1 -a-> s2 -a-> s0, s0 accepting
    fn mod3() -> Automaton {
        Automaton::from_spec(&AutomatonSpec {
            states: vec!["s0".into(), "s1".into(), "s2".into()],
            start: "s0".into(),
            accepts: vec!["s0".into()],
            transitions: vec![
                ("s0".into(), vec!['a'], "s1".into()),
                ("s1".into(), vec!['a'], "s2".into()),
                ("s2".into(), vec!['a'], "s0".into()),
            ],
            alphabet: vec!['a'],
        })
        .unwrap()
    }

    /// Accepts strings over {a, b} with an even number of a's, using four states where two suffice.
    fn redundant_even_a() -> Automaton {
        Automaton::from_spec(&AutomatonSpec {
            states: vec!["e1".into(), "o1".into(), "e2".into(), "o2".into(), "x".into()],
            start: "e1".into(),
            accepts: vec!["e1".into(), "e2".into()],
            transitions: vec![
                ("e1".into(), vec!['a'], "o1".into()),
                ("e1".into(), vec!['b'], "e2".into()),
                ("o1".into(), vec!['a'], "e2".into()),
                ("o1".into(), vec!['b'], "o2".into()),
                ("e2".into(), vec!['a'], "o2".into()),
                ("e2".into(), vec!['b'], "e1".into()),
                ("o2".into(), vec!['a'], "e1".into()),
                ("o2".into(), vec!['b'], "o1".into()),
                ("x".into(), vec!['a', 'b'], "e1".into()),
            ],
            alphabet: vec!['a', 'b'],
        })
        .unwrap()
    }

    #[test]
    fn test_reachable() {
        let pruned = reachable(&redundant_even_a());
        assert_eq!(pruned.len(), 4);
        assert!(!pruned.contains("x"));
        assert_eq!(pruned.accepts().len(), 2);
    }

    #[test]
    fn test_reachable_keeps_epsilon_targets() {
        let mut nfa = Automaton::new("p");
        nfa.add_node("q");
        nfa.add_node("r");
        nfa.add_transition("p", "q", Label::Epsilon).unwrap();
        assert_eq!(reachable(&nfa).len(), 2);
    }

    #[test]
    fn test_minimize_redundant() {
        let dfa = redundant_even_a();
        for strategy in [Strategy::PartitionRefinement, Strategy::DoubleReversal] {
            let min = strategy.minimize(&dfa);
            assert_eq!(min.len(), 2, "{:?}", strategy);
            assert!(min.is_deterministic());
            for w in words(5) {
                assert_eq!(
                    accepts_string(&min, &w),
                    accepts_string(&dfa, &w),
                    "{:?} on {:?}",
                    strategy,
                    w
                );
            }
        }
    }

    #[test]
    fn test_minimize_keeps_distinguishable_cycle() {
        let dfa = mod3();
        for strategy in [Strategy::PartitionRefinement, Strategy::DoubleReversal] {
            let min = strategy.minimize(&dfa);
            assert_eq!(min.len(), 3, "{:?}", strategy);
            for n in 0..10 {
                assert_eq!(accepts_string(&min, &"a".repeat(n)), n % 3 == 0);
            }
        }
    }

    #[test]
    fn test_minimize_regex_scenario() {
        // 'a followed by zero or more 'b
        let re: Production = "+'a*'b".parse().unwrap();
        let dfa = dfa_of(&re);
        for strategy in [Strategy::PartitionRefinement, Strategy::DoubleReversal] {
            let min = strategy.minimize(&dfa);
            assert_eq!(min.len(), 2, "{:?}", strategy);
            for w in ["a", "ab", "abb", "abbb"] {
                assert!(accepts_string(&min, w), "{:?} rejects {}", strategy, w);
            }
            for w in ["", "b", "ba", "aa"] {
                assert!(!accepts_string(&min, w), "{:?} accepts {}", strategy, w);
            }
        }
    }

    #[test]
    fn test_minimize_empty_language() {
        let dfa = dfa_of(&Production::Empty);
        for strategy in [Strategy::PartitionRefinement, Strategy::DoubleReversal] {
            let min = strategy.minimize(&dfa);
            assert_eq!(min.len(), 1);
            assert!(min.accepts().is_empty());
        }
    }

    /// True if every state can reach an accepting state.
    fn is_trim(dfa: &Automaton) -> bool {
        // the reversed automaton has one extra start state
        reachable(&reverse(dfa)).len() == dfa.len() + 1
    }

    #[test]
    fn test_is_trim() {
        assert!(is_trim(&mod3()));
        let mut dead = mod3();
        dead.add_node("sink");
        dead.add_transition("s1", "sink", Label::Symbol('b')).unwrap();
        assert!(!is_trim(&dead));
    }

    #[quickcheck]
    fn minimizers_agree_with_regex(re: Production) -> bool {
        let dfa = dfa_of(&re);
        let by_partition = PartitionRefinement.minimize(&dfa);
        let by_reversal = DoubleReversal.minimize(&dfa);
        let sizes_agree = if is_trim(&by_partition) {
            by_reversal.len() == by_partition.len()
        } else {
            by_reversal.len() <= by_partition.len()
        };
        by_partition.len() <= dfa.len()
            && sizes_agree
            && words(4).iter().all(|w| {
                let expected = re.matches(w);
                accepts_string(&dfa, w) == expected
                    && accepts_string(&by_partition, w) == expected
                    && accepts_string(&by_reversal, w) == expected
            })
    }

    #[quickcheck]
    fn minimization_is_stable(re: Production) -> bool {
        let min = DoubleReversal.minimize(&dfa_of(&re));
        DoubleReversal.minimize(&min).len() == min.len()
            && PartitionRefinement.minimize(&min).len() == min.len()
    }
}
