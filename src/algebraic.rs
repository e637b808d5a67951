//! DFA to regex conversion with the algebraic method.
//!
//! For a DFA with states numbered `0..n` (the start state is `0`), the language read from
//! state `i` to an accepting state is the solution `X[i]` of the linear system
//!
//! ```text
//! X[i] = A[i][0] X[0] | ... | A[i][n-1] X[n-1] | B[i]
//! ```
//!
//! where `A[i][j]` is the alternative of all symbols leading from `i` to `j` and `B[i]` is `nil`
//! if `i` accepts and `empty` otherwise. The system is solved by eliminating the states from the
//! highest number down, applying Arden's lemma (`X = A X | B` is solved by `X = A* B`) to remove
//! self-loops.

use crate::{
    automaton::Automaton,
    regex::{simplify, Production},
};

/// Converts a DFA into a regex accepting the same language.
pub fn convert(dfa: &Automaton) -> Production {
    let re = simplify(&convert_raw(dfa));
    log::debug!(
        "Algebraic conversion of {} states produced a regex of size {}",
        dfa.len(),
        re.size()
    );
    re
}

/// Like [convert], but skips the final simplification pass.
///
/// Only the identities of `empty` and `nil` are applied while the system is solved.
pub fn convert_raw(dfa: &Automaton) -> Production {
    let (mut a, mut b) = arden_system(dfa);
    let n = b.len();

    for k in (0..n).rev() {
        // X[k] = A[k][k] X[k] | rest  ==>  X[k] = A[k][k]* rest
        let self_loop = take(&mut a[k][k]);
        if self_loop != Production::Empty {
            let star = star(self_loop);
            b[k] = concat(star.clone(), take(&mut b[k]));
            for j in 0..k {
                a[k][j] = concat(star.clone(), take(&mut a[k][j]));
            }
        }
        // Substitute X[k] into the equations of all lower states
        for i in 0..k {
            let via = take(&mut a[i][k]);
            if via == Production::Empty {
                continue;
            }
            b[i] = alt(take(&mut b[i]), concat(via.clone(), b[k].clone()));
            for j in 0..k {
                if a[k][j] != Production::Empty {
                    let through = concat(via.clone(), a[k][j].clone());
                    a[i][j] = alt(take(&mut a[i][j]), through);
                }
            }
        }
    }

    b.into_iter().next().unwrap_or(Production::Empty)
}

/// Builds the matrices `A` and `B`, numbering the start state `0` and the others in
/// declaration order.
fn arden_system(dfa: &Automaton) -> (Vec<Vec<Production>>, Vec<Production>) {
    let mut order: Vec<&String> = vec![dfa.start()];
    order.extend(dfa.states().map(|s| s.name()).filter(|s| *s != dfa.start()));
    let index = |name: &str| order.iter().position(|s| s.as_str() == name);

    let n = order.len();
    let mut a = vec![vec![Production::Empty; n]; n];
    let mut b = vec![Production::Empty; n];
    for (i, name) in order.iter().enumerate() {
        let Some(state) = dfa.state(name) else { continue };
        if state.is_accepting() {
            b[i] = Production::NilExpression;
        }
        for &c in dfa.alphabet() {
            for target in state.targets(c.into()) {
                if let Some(j) = index(target) {
                    a[i][j] = alt(take(&mut a[i][j]), Production::Sigma(c));
                }
            }
        }
    }
    (a, b)
}

fn take(e: &mut Production) -> Production {
    std::mem::replace(e, Production::Empty)
}

/* Constructors applying the identities of empty and nil */

fn concat(l: Production, r: Production) -> Production {
    match (l, r) {
        (Production::Empty, _) | (_, Production::Empty) => Production::Empty,
        (Production::NilExpression, e) | (e, Production::NilExpression) => e,
        (l, r) => Production::concat(l, r),
    }
}

fn alt(l: Production, r: Production) -> Production {
    match (l, r) {
        (Production::Empty, e) | (e, Production::Empty) => e,
        (l, r) if l == r => l,
        (l, r) => Production::alt(l, r),
    }
}

fn star(e: Production) -> Production {
    match e {
        Production::Empty | Production::NilExpression => Production::NilExpression,
        e => Production::star(e),
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{
        automaton::AutomatonSpec,
        lexer::accepts_string,
        minimize::{Minimizer, PartitionRefinement},
        regex::ARBITRARY_SYMBOLS,
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

    fn min_dfa(re: &Production) -> Automaton {
        PartitionRefinement.minimize(&subset::convert(&thompson::build(re)))
    }

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

    #[test]
    fn test_arden_system() {
        let (a, b) = arden_system(&mod3());
        assert_eq!(a[0][1], Production::sigma('a'));
        assert_eq!(a[2][0], Production::sigma('a'));
        assert_eq!(a[0][0], Production::Empty);
        assert_eq!(b, vec![Production::NilExpression, Production::Empty, Production::Empty]);
    }

    #[test]
    fn test_arden_system_combines_symbols() {
        let dfa = Automaton::from_spec(&AutomatonSpec {
            states: vec!["p".into(), "q".into()],
            start: "p".into(),
            accepts: vec!["q".into()],
            transitions: vec![("p".into(), vec!['a', 'b'], "q".into())],
            alphabet: vec!['a', 'b'],
        })
        .unwrap();
        let (a, _) = arden_system(&dfa);
        assert_eq!(
            a[0][1],
            Production::alt(Production::sigma('a'), Production::sigma('b'))
        );
    }

    #[test]
    fn test_start_numbered_first() {
        let dfa = Automaton::from_spec(&AutomatonSpec {
            states: vec!["q".into(), "p".into()],
            start: "p".into(),
            accepts: vec!["q".into()],
            transitions: vec![("p".into(), vec!['a'], "q".into())],
            alphabet: vec!['a'],
        })
        .unwrap();
        assert_eq!(convert(&dfa), Production::sigma('a'));
    }

    #[test]
    fn test_convert_mod3() {
        let re = convert(&mod3());
        for n in 0..10 {
            assert_eq!(re.matches(&"a".repeat(n)), n % 3 == 0, "{} on {}", re, n);
        }
    }

    #[test]
    fn test_convert_a_b_star() {
        let re: Production = "+'a*'b".parse().unwrap();
        let back = convert(&min_dfa(&re));
        assert_eq!(back, re);
    }

    #[test]
    fn test_convert_empty_language() {
        assert_eq!(convert(&min_dfa(&Production::Empty)), Production::Empty);
    }

    #[test]
    fn test_convert_only_empty_word() {
        assert_eq!(
            convert(&min_dfa(&Production::NilExpression)),
            Production::NilExpression
        );
    }

    #[test]
    fn test_convert_raw_agrees() {
        let dfa = mod3();
        let raw = convert_raw(&dfa);
        for n in 0..7 {
            assert_eq!(raw.matches(&"a".repeat(n)), n % 3 == 0);
        }
    }

    #[quickcheck]
    fn round_trip_preserves_language(re: Production) -> bool {
        let dfa = min_dfa(&re);
        let back = min_dfa(&convert(&dfa));
        words(3)
            .iter()
            .all(|w| accepts_string(&back, w) == accepts_string(&dfa, w))
    }
}
