use thiserror::Error;

use crate::automaton::StateId;

/// Errors raised when an automaton is built or queried with inconsistent data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("unknown state `{0}`")]
    UnknownState(StateId),

    #[error("symbol {0:?} is not declared in the alphabet")]
    AlphabetError(char),
}

/// Raised by the scanner when no lexical class consumes a non-empty prefix of the remaining input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no lexical class matches the input at offset {offset} (remaining: {remainder:?})")]
pub struct LexError {
    /// Byte offset into the scanned input at which scanning got stuck.
    pub offset: usize,
    /// The input that could not be consumed.
    pub remainder: String,
}

/// Errors raised while reading description files or prefix-notation regexes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed regex: {0}")]
    MalformedRegex(String),

    #[error("line {line}: expected {expected}, found `{found}`")]
    UnexpectedToken {
        line: usize,
        found: String,
        expected: String,
    },

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(String),

    #[error("unknown relevance `{0}`, expected one of `relevant`, `irrelevant`, `discard`")]
    UnknownRelevance(String),

    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("automaton error: {0}")]
    Automaton(#[from] AutomatonError),

    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("failed to read description: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
