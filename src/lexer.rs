//! String acceptance on DFAs and regex-driven tokenization.

use std::{fmt::Display, str::FromStr};

use indexmap::IndexSet;

use crate::{
    automaton::{Automaton, Label},
    error::{AutomatonError, LexError, ParseError},
    parse::{build_regex, RegexToken},
    regex::Production,
};

/// Walks `dfa` from its start state reading `s` one symbol at a time.
///
/// Returns false as soon as a symbol has no transition, otherwise whether the state reached
/// after reading all of `s` is accepting. Runs in linear time without backtracking.
/// Only the first target of each move is followed, so `dfa` must be deterministic.
pub fn accepts_string(dfa: &Automaton, s: &str) -> bool {
    let mut current = dfa.start();
    for c in s.chars() {
        match dfa.successors(current, Label::Symbol(c)).next() {
            Some(next) => current = next,
            None => return false,
        }
    }
    dfa.is_accepting(current)
}

/// How the scanner treats tokens of a lexical class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relevance {
    Relevant,
    Irrelevant,
    /// Matched text is dropped and no token is emitted.
    Discard,
}

impl FromStr for Relevance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevant" => Ok(Relevance::Relevant),
            "irrelevant" => Ok(Relevance::Irrelevant),
            "discard" => Ok(Relevance::Discard),
            _ => Err(ParseError::UnknownRelevance(s.to_string())),
        }
    }
}

impl Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relevance::Relevant => write!(f, "relevant"),
            Relevance::Irrelevant => write!(f, "irrelevant"),
            Relevance::Discard => write!(f, "discard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalClass {
    pub name: String,
    pub regex: Production,
    pub relevance: Relevance,
}

impl LexicalClass {
    pub fn new(name: impl Into<String>, regex: Production, relevance: Relevance) -> Self {
        Self {
            name: name.into(),
            regex,
            relevance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub class: String,
    pub relevance: Relevance,
}

/// A lexical description as produced by a description-file reader.
/// Each class carries its regex as prefix-notation tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalSpec {
    pub name: String,
    pub alphabet: Vec<char>,
    pub classes: Vec<(String, Vec<RegexToken>, Relevance)>,
}

/// A scanner over an ordered list of lexical classes.
#[derive(Debug, Clone)]
pub struct Lexer {
    name: String,
    alphabet: IndexSet<char>,
    classes: Vec<LexicalClass>,
}

impl Lexer {
    /// Creates a lexer whose alphabet consists of the symbols used by the classes.
    pub fn new(name: impl Into<String>, classes: Vec<LexicalClass>) -> Self {
        let alphabet = classes.iter().flat_map(|c| c.regex.symbols()).collect();
        Self {
            name: name.into(),
            alphabet,
            classes,
        }
    }

    /// Builds the class regexes of `desc`.
    /// Fails if a class uses a symbol outside the declared alphabet or if its regex is malformed.
    pub fn from_spec(desc: &LexicalSpec) -> Result<Self, ParseError> {
        let alphabet: IndexSet<char> = desc.alphabet.iter().copied().collect();
        let mut classes = Vec::with_capacity(desc.classes.len());
        for (name, tokens, relevance) in &desc.classes {
            let regex = build_regex(tokens)?;
            if let Some(c) = regex.symbols().into_iter().find(|c| !alphabet.contains(c)) {
                return Err(AutomatonError::AlphabetError(c).into());
            }
            classes.push(LexicalClass::new(name.clone(), regex, *relevance));
        }
        log::debug!("Lexer `{}` with {} classes", desc.name, classes.len());
        Ok(Self {
            name: desc.name.clone(),
            alphabet,
            classes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alphabet(&self) -> &IndexSet<char> {
        &self.alphabet
    }

    pub fn classes(&self) -> &[LexicalClass] {
        &self.classes
    }

    /// Splits `input` into tokens.
    ///
    /// At every position the classes are tried in declaration order and the first one that
    /// consumes a non-empty prefix wins. Text of discarded classes produces no token.
    pub fn scan(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut rest = input;
        while !rest.is_empty() {
            let offset = input.len() - rest.len();
            let (class, text, leftover) = self
                .classes
                .iter()
                .find_map(|class| {
                    let (text, leftover) = class.regex.consume(rest);
                    (!text.is_empty()).then(|| (class, text, leftover))
                })
                .ok_or_else(|| LexError {
                    offset,
                    remainder: rest.to_string(),
                })?;
            log::trace!("{}: `{}` at {}", class.name, text, offset);
            if class.relevance != Relevance::Discard {
                tokens.push(Token {
                    text: text.to_string(),
                    class: class.name.clone(),
                    relevance: class.relevance,
                });
            }
            rest = leftover;
        }
        Ok(tokens)
    }
}
