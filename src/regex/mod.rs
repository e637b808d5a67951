//! Regular expression syntax trees.
//!
//! A [Production] is a closed tree of the six regex constructs. It supports whole-string matching
//! ([Production::matches]), greedy longest-prefix consumption ([Production::consume]) that the
//! scanner is built on, and algebraic simplification ([simplify]).

mod simplify;

use std::{fmt::Display, str::FromStr};

use indexmap::IndexSet;
use quickcheck::Arbitrary;

pub use simplify::simplify;

use crate::{automaton::escape_symbol, error::ParseError, parse};

/// A regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Production {
    /// Matches exactly the given symbol.
    Sigma(char),
    /// Matches a string matched by the left expression followed by one matched by the right.
    Concatenation(Box<Production>, Box<Production>),
    /// Matches what either side matches.
    Alternative(Box<Production>, Box<Production>),
    /// Matches zero or more repetitions of the inner expression.
    Repetition(Box<Production>),
    /// Matches only the empty string.
    NilExpression,
    /// Matches nothing.
    Empty,
}

impl Production {
    pub fn sigma(c: char) -> Self {
        Production::Sigma(c)
    }

    pub fn concat(left: Production, right: Production) -> Self {
        Production::Concatenation(Box::new(left), Box::new(right))
    }

    pub fn alt(left: Production, right: Production) -> Self {
        Production::Alternative(Box::new(left), Box::new(right))
    }

    pub fn star(inner: Production) -> Self {
        Production::Repetition(Box::new(inner))
    }

    /// The concatenation of the symbols of `word`, or [Production::NilExpression] for the empty word.
    pub fn word(word: &str) -> Self {
        let mut chars = word.chars().rev();
        match chars.next() {
            None => Production::NilExpression,
            Some(last) => chars.fold(Production::Sigma(last), |acc, c| {
                Production::concat(Production::Sigma(c), acc)
            }),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Production::Concatenation(l, r) | Production::Alternative(l, r) => {
                1 + l.size() + r.size()
            }
            Production::Repetition(e) => 1 + e.size(),
            _ => 1,
        }
    }

    /// The symbols occurring in the expression, in order of first occurrence.
    pub fn symbols(&self) -> IndexSet<char> {
        let mut symbols = IndexSet::new();
        let mut stack = vec![self];
        while let Some(e) = stack.pop() {
            match e {
                Production::Sigma(c) => {
                    symbols.insert(*c);
                }
                Production::Concatenation(l, r) | Production::Alternative(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
                Production::Repetition(e) => stack.push(e),
                Production::NilExpression | Production::Empty => {}
            }
        }
        symbols
    }

    /* Matching */

    /// Returns true if the whole of `s` is in the language of the expression.
    pub fn matches(&self, s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        self.matches_chars(&chars)
    }

    fn matches_chars(&self, s: &[char]) -> bool {
        match self {
            Production::Sigma(c) => s.len() == 1 && s[0] == *c,
            Production::Concatenation(l, r) => {
                (0..=s.len()).any(|i| l.matches_chars(&s[..i]) && r.matches_chars(&s[i..]))
            }
            Production::Alternative(l, r) => l.matches_chars(s) || r.matches_chars(s),
            Production::Repetition(e) => {
                // Every iteration consumes a non-empty piece, the empty word is covered by zero iterations
                s.is_empty()
                    || (1..=s.len()).any(|i| e.matches_chars(&s[..i]) && self.matches_chars(&s[i..]))
            }
            Production::NilExpression => s.is_empty(),
            Production::Empty => false,
        }
    }

    /// Greedily consumes the longest prefix of `s` this expression can read and returns the
    /// consumed prefix together with the remainder.
    ///
    /// Consumption does not backtrack: a concatenation reads as much as possible with its left
    /// side before the right side continues. If the expression cannot read `s` at all, the
    /// result is `("", s)`. On equally long matches an alternative prefers its left side.
    pub fn consume<'a>(&self, s: &'a str) -> (&'a str, &'a str) {
        match self.consume_len(s) {
            Some(n) => s.split_at(n),
            None => ("", s),
        }
    }

    /// Length in bytes of the consumed prefix, `None` if the expression fails on `s`.
    /// `Some(0)` means the expression succeeded without reading anything.
    fn consume_len(&self, s: &str) -> Option<usize> {
        match self {
            Production::Sigma(c) => s.starts_with(*c).then(|| c.len_utf8()),
            Production::Concatenation(l, r) => {
                let n = l.consume_len(s)?;
                let m = r.consume_len(&s[n..])?;
                Some(n + m)
            }
            Production::Alternative(l, r) => match (l.consume_len(s), r.consume_len(s)) {
                (Some(n), Some(m)) => Some(if m > n { m } else { n }),
                (n, m) => n.or(m),
            },
            Production::Repetition(e) => {
                let mut total = 0;
                while let Some(n) = e.consume_len(&s[total..]) {
                    if n == 0 {
                        break;
                    }
                    total += n;
                }
                Some(total)
            }
            Production::NilExpression => Some(0),
            Production::Empty => None,
        }
    }
}

/* Pretty */

/// Prefix notation: `+ l r`, `| l r`, `* e`, `'c`, `nil`, `empty`.
impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Production::Sigma(c) => write!(f, "{}", escape_symbol(*c)),
            Production::Concatenation(l, r) => write!(f, "+ {} {}", l, r),
            Production::Alternative(l, r) => write!(f, "| {} {}", l, r),
            Production::Repetition(e) => write!(f, "* {}", e),
            Production::NilExpression => write!(f, "nil"),
            Production::Empty => write!(f, "empty"),
        }
    }
}

impl FromStr for Production {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_regex(s)
    }
}

/* Random generation */

pub(crate) const ARBITRARY_SYMBOLS: [char; 3] = ['a', 'b', 'c'];
const ARBITRARY_DEPTH: usize = 3;

fn arbitrary_with_depth(g: &mut quickcheck::Gen, depth: usize) -> Production {
    if depth == 0 || u8::arbitrary(g) % 4 == 0 {
        return match u8::arbitrary(g) % 8 {
            0 => Production::NilExpression,
            1 => Production::Empty,
            _ => Production::Sigma(g.choose(&ARBITRARY_SYMBOLS).copied().unwrap_or('a')),
        };
    }
    match u8::arbitrary(g) % 3 {
        0 => Production::concat(
            arbitrary_with_depth(g, depth - 1),
            arbitrary_with_depth(g, depth - 1),
        ),
        1 => Production::alt(
            arbitrary_with_depth(g, depth - 1),
            arbitrary_with_depth(g, depth - 1),
        ),
        _ => Production::star(arbitrary_with_depth(g, depth - 1)),
    }
}

/// Generates expressions of bounded depth over the symbols `a`, `b` and `c`.
impl Arbitrary for Production {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        arbitrary_with_depth(g, ARBITRARY_DEPTH)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let children = match self {
            Production::Concatenation(l, r) | Production::Alternative(l, r) => {
                vec![l.as_ref().clone(), r.as_ref().clone()]
            }
            Production::Repetition(e) => vec![e.as_ref().clone()],
            _ => vec![],
        };
        Box::new(children.into_iter())
    }
}
