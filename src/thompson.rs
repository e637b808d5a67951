//! Thompson's construction: regex to NFA.
//!
//! Every automaton built here has exactly one accepting state. Sub-automata are built
//! independently and then spliced: the right-hand automaton is moved into the left one, so the
//! result owns all states and nothing is shared with the consumed parts.

use crate::{
    automaton::{Automaton, Label, StateId},
    regex::Production,
};

/// Builds NFAs from regexes, naming states `s1`, `s2`, ...
///
/// The counter lives in the builder, so all automata built by the same builder have pairwise
/// distinct state names.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
    next_id: usize,
}

impl ThompsonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_name(&mut self) -> StateId {
        self.next_id += 1;
        format!("s{}", self.next_id)
    }

    /// Builds an NFA accepting the language of `regex`.
    pub fn build(&mut self, regex: &Production) -> Automaton {
        let nfa = self.build_rec(regex);
        log::debug!(
            "Thompson construction of a regex of size {} produced {} states",
            regex.size(),
            nfa.len()
        );
        nfa
    }

    fn build_rec(&mut self, regex: &Production) -> Automaton {
        match regex {
            Production::Sigma(c) => self.pair(Some(Label::Symbol(*c))),
            Production::NilExpression => self.pair(Some(Label::Epsilon)),
            Production::Empty => self.pair(None),
            Production::Concatenation(l, r) => {
                let left = self.build_rec(l);
                let right = self.build_rec(r);
                concatenation(left, right)
            }
            Production::Alternative(l, r) => {
                let left = self.build_rec(l);
                let right = self.build_rec(r);
                self.alternative(left, right)
            }
            Production::Repetition(e) => {
                let inner = self.build_rec(e);
                self.repetition(inner)
            }
        }
    }

    /// Two fresh states, the second accepting, optionally connected by `label`.
    fn pair(&mut self, label: Option<Label>) -> Automaton {
        let start = self.fresh_name();
        let accept = self.fresh_name();
        let mut nfa = Automaton::new(start.clone());
        nfa.add_node(accept.clone());
        nfa.insert_accepting(&accept, true);
        if let Some(label) = label {
            nfa.insert_transition(&start, &accept, label);
        }
        nfa
    }

    fn alternative(&mut self, mut left: Automaton, right: Automaton) -> Automaton {
        let left_start = left.start().clone();
        let left_accept = single_accept(&left);
        let right_start = right.start().clone();
        let right_accept = single_accept(&right);
        left.absorb(right);

        let start = self.fresh_name();
        let accept = self.fresh_name();
        left.add_node(start.clone());
        left.add_node(accept.clone());

        left.insert_transition(&start, &left_start, Label::Epsilon);
        left.insert_transition(&start, &right_start, Label::Epsilon);
        left.insert_transition(&left_accept, &accept, Label::Epsilon);
        left.insert_transition(&right_accept, &accept, Label::Epsilon);

        left.insert_accepting(&left_accept, false);
        left.insert_accepting(&accept, true);
        left.insert_start(&start);
        left
    }

    fn repetition(&mut self, mut inner: Automaton) -> Automaton {
        let inner_start = inner.start().clone();
        let inner_accept = single_accept(&inner);

        let start = self.fresh_name();
        let accept = self.fresh_name();
        inner.add_node(start.clone());
        inner.add_node(accept.clone());

        inner.insert_transition(&start, &inner_start, Label::Epsilon);
        inner.insert_transition(&start, &accept, Label::Epsilon);
        inner.insert_transition(&inner_accept, &accept, Label::Epsilon);
        inner.insert_transition(&inner_accept, &inner_start, Label::Epsilon);

        inner.insert_accepting(&inner_accept, false);
        inner.insert_accepting(&accept, true);
        inner.insert_start(&start);
        inner
    }
}

/// Builds an NFA for `regex` with a fresh builder.
pub fn build(regex: &Production) -> Automaton {
    ThompsonBuilder::new().build(regex)
}

fn concatenation(mut left: Automaton, right: Automaton) -> Automaton {
    let left_accept = single_accept(&left);
    let right_start = right.start().clone();
    let right_accept = single_accept(&right);
    left.absorb(right);

    left.insert_transition(&left_accept, &right_start, Label::Epsilon);
    left.insert_accepting(&left_accept, false);
    left.insert_accepting(&right_accept, true);
    left
}

fn single_accept(nfa: &Automaton) -> StateId {
    debug_assert_eq!(nfa.accepts().len(), 1);
    nfa.accepts()
        .first()
        .cloned()
        .unwrap_or_else(|| nfa.start().clone())
}
