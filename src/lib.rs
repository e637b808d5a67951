//! Finite automata over characters.
//!
//! Regexes ([Production]) are compiled into NFAs by the [thompson] construction, determinized by
//! the [subset] construction and minimized by one of the [minimize] strategies. The [algebraic]
//! method turns a DFA back into a regex. On top of that, a [Lexer] splits input into tokens using
//! a list of regex classes.

pub mod algebraic;
pub mod automaton;
pub mod error;
pub mod lexer;
pub mod minimize;
mod options;
pub mod parse;
pub mod regex;
pub mod subset;
pub mod thompson;

pub use automaton::{Automaton, AutomatonSpec, Label, State, StateId};
pub use error::Error;
pub use lexer::{accepts_string, Lexer, LexicalClass, Relevance, Token};
pub use minimize::{Minimizer, Strategy};
pub use options::Options;
pub use regex::Production;

/// Compiles a regex into a DFA accepting the same language.
pub fn compile(regex: &Production, options: &Options) -> Automaton {
    let dfa = subset::convert(&thompson::build(regex));
    if options.minimize {
        options.minimizer.minimize(&dfa)
    } else {
        dfa
    }
}

/// Converts a DFA into a regex, simplifying the result if enabled in the options.
pub fn to_regex(dfa: &Automaton, options: &Options) -> Production {
    if options.simplify {
        algebraic::convert(dfa)
    } else {
        algebraic::convert_raw(dfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_minimizes() {
        let re: Production = "*|'a'b".parse().unwrap();
        let dfa = compile(&re, &Options::default());
        assert_eq!(dfa.len(), 1);
        assert!(accepts_string(&dfa, "abba"));
        assert!(accepts_string(&dfa, ""));
        assert!(!accepts_string(&dfa, "c"));
    }

    #[test]
    fn test_compile_without_minimization() {
        let re: Production = "*|'a'b".parse().unwrap();
        let options = Options {
            minimize: false,
            ..Default::default()
        };
        let dfa = compile(&re, &options);
        assert!(dfa.len() > 1);
        assert!(accepts_string(&dfa, "abba"));
    }

    #[test]
    fn test_strategies_agree() {
        let re: Production = "+'a*|'b'c".parse().unwrap();
        let partition = compile(&re, &Options::default());
        let reversal = compile(
            &re,
            &Options::default().with_minimizer(Strategy::DoubleReversal),
        );
        assert_eq!(partition.len(), reversal.len());
        for w in ["a", "ab", "acb", "", "b", "abx"] {
            assert_eq!(accepts_string(&partition, w), accepts_string(&reversal, w));
        }
    }

    #[test]
    fn test_to_regex() {
        let re: Production = "+'a*'b".parse().unwrap();
        let dfa = compile(&re, &Options::default());
        assert_eq!(to_regex(&dfa, &Options::default()), re);
    }
}
