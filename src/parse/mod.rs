//! Readers for automaton and lexical description files, and for regexes in prefix notation.
//!
//! An automaton description looks like
//!
//! ```text
//! dfa
//! states s0 s1 end;
//! initial s0
//! accept s1 end;
//! transitions
//!   s0 'a 'b --> s1
//! end;
//! alphabet 'a 'b end;
//! ```
//!
//! and a lexical description like
//!
//! ```text
//! language words
//! alphabet 'a 'b ' end;
//! class word is + 'a * 'b relevant end;
//! class space is ' discard end;
//! end;
//! ```

mod regex;
mod tokens;

use std::path::Path;

pub use regex::{build_regex, RegexToken};
use tokens::{tokenize, Spanned, Token};

use crate::{
    automaton::{Automaton, AutomatonSpec},
    error::{Error, ParseError},
    lexer::{LexicalSpec, Lexer, Relevance},
    regex::Production,
};

struct Cursor {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Cursor {
    fn new(input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn next(&mut self, expected: &str) -> Result<Spanned, ParseError> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEnd(expected.to_string()))?;
        self.pos += 1;
        Ok(tok)
    }

    fn unexpected(spanned: &Spanned, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            line: spanned.line,
            found: spanned.token.to_string(),
            expected: expected.to_string(),
        }
    }

    fn is_word(&self, kw: &str) -> bool {
        matches!(self.peek(), Some(Token::Word(w)) if w == kw)
    }

    fn keyword(&mut self, kw: &str) -> Result<(), ParseError> {
        let expected = format!("`{}`", kw);
        let tok = self.next(&expected)?;
        match &tok.token {
            Token::Word(w) if w == kw => Ok(()),
            _ => Err(Self::unexpected(&tok, &expected)),
        }
    }

    fn word(&mut self, expected: &str) -> Result<String, ParseError> {
        let tok = self.next(expected)?;
        match tok.token {
            Token::Word(w) => Ok(w),
            _ => Err(Self::unexpected(&tok, expected)),
        }
    }

    fn symbol(&mut self) -> Result<char, ParseError> {
        let tok = self.next("a symbol")?;
        match tok.token {
            Token::Symbol(c) => Ok(c),
            _ => Err(Self::unexpected(&tok, "a symbol")),
        }
    }

    /// Consumes `end` and an optional `;`.
    fn end(&mut self) -> Result<(), ParseError> {
        self.keyword("end")?;
        if self.peek() == Some(&Token::Semi) {
            self.pos += 1;
        }
        Ok(())
    }

    /// Reads words until `end`.
    fn words_until_end(&mut self, what: &str) -> Result<Vec<String>, ParseError> {
        let mut words = Vec::new();
        while !self.is_word("end") {
            words.push(self.word(what)?);
        }
        self.end()?;
        Ok(words)
    }

    /// Reads symbols until `end`.
    fn symbols_until_end(&mut self) -> Result<Vec<char>, ParseError> {
        let mut symbols = Vec::new();
        while !self.is_word("end") {
            symbols.push(self.symbol()?);
        }
        self.end()?;
        Ok(symbols)
    }

    fn finish(&self) -> Result<(), ParseError> {
        match self.tokens.get(self.pos) {
            None => Ok(()),
            Some(tok) => Err(Self::unexpected(tok, "end of input")),
        }
    }
}

/// Parses an automaton description.
pub fn parse_automaton(input: &str) -> Result<AutomatonSpec, ParseError> {
    let mut cursor = Cursor::new(input)?;
    let kind = cursor.next("`dfa` or `nfa`")?;
    match &kind.token {
        Token::Word(w) if w == "dfa" || w == "nfa" => (),
        _ => return Err(Cursor::unexpected(&kind, "`dfa` or `nfa`")),
    }

    cursor.keyword("states")?;
    let states = cursor.words_until_end("a state name")?;
    cursor.keyword("initial")?;
    let start = cursor.word("the initial state")?;
    cursor.keyword("accept")?;
    let accepts = cursor.words_until_end("a state name")?;

    cursor.keyword("transitions")?;
    let mut transitions = Vec::new();
    while !cursor.is_word("end") {
        let from = cursor.word("a state name")?;
        let mut symbols = vec![cursor.symbol()?];
        while let Some(Token::Symbol(c)) = cursor.peek() {
            symbols.push(*c);
            cursor.pos += 1;
        }
        let arrow = cursor.next("`-->`")?;
        if arrow.token != Token::Arrow {
            return Err(Cursor::unexpected(&arrow, "`-->`"));
        }
        let to = cursor.word("a state name")?;
        transitions.push((from, symbols, to));
    }
    cursor.end()?;

    cursor.keyword("alphabet")?;
    let alphabet = cursor.symbols_until_end()?;
    cursor.finish()?;

    Ok(AutomatonSpec {
        states,
        start,
        accepts,
        transitions,
        alphabet,
    })
}

fn regex_token(tok: &Spanned) -> Option<RegexToken> {
    match &tok.token {
        Token::Symbol(c) => Some(RegexToken::Symbol(*c)),
        Token::Op('+') => Some(RegexToken::Concat),
        Token::Op('|') => Some(RegexToken::Alt),
        Token::Op('*') => Some(RegexToken::Star),
        Token::Word(w) if w == "nil" => Some(RegexToken::Nil),
        Token::Word(w) if w == "empty" => Some(RegexToken::Empty),
        _ => None,
    }
}

/// Parses a lexical description.
pub fn parse_lexical(input: &str) -> Result<LexicalSpec, ParseError> {
    let mut cursor = Cursor::new(input)?;
    cursor.keyword("language")?;
    let name = cursor.word("the language name")?;
    cursor.keyword("alphabet")?;
    let alphabet = cursor.symbols_until_end()?;

    let mut classes = Vec::new();
    while !cursor.is_word("end") {
        cursor.keyword("class")?;
        let class = cursor.word("a class name")?;
        cursor.keyword("is")?;
        let mut tokens = Vec::new();
        loop {
            let tok = cursor.next("a regex or a relevance")?;
            if let Some(t) = regex_token(&tok) {
                tokens.push(t);
                continue;
            }
            match tok.token {
                Token::Word(w) => {
                    let relevance: Relevance = w.parse()?;
                    classes.push((class, tokens, relevance));
                    break;
                }
                _ => return Err(Cursor::unexpected(&tok, "a regex or a relevance")),
            }
        }
        cursor.end()?;
    }
    cursor.end()?;
    cursor.finish()?;

    Ok(LexicalSpec {
        name,
        alphabet,
        classes,
    })
}

/// Parses a regex in prefix notation, e.g. `+'a*'b`.
pub fn parse_regex(input: &str) -> Result<Production, ParseError> {
    let tokens = tokenize(input)?;
    let mut regex_tokens = Vec::with_capacity(tokens.len());
    for tok in &tokens {
        let t = regex_token(tok).ok_or_else(|| Cursor::unexpected(tok, "a regex token"))?;
        regex_tokens.push(t);
    }
    build_regex(&regex_tokens)
}

/// Reads and materializes the automaton described in the file at `path`.
pub fn read_automaton(path: &Path) -> Result<Automaton, Error> {
    let input = std::fs::read_to_string(path)?;
    let desc = parse_automaton(&input)?;
    Ok(Automaton::from_spec(&desc)?)
}

/// Reads the lexical description in the file at `path`.
pub fn read_lexer(path: &Path) -> Result<Lexer, Error> {
    let input = std::fs::read_to_string(path)?;
    let desc = parse_lexical(&input)?;
    Ok(Lexer::from_spec(&desc)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DFA: &str = "dfa
states s0 s1 s2 end;
initial s0
accept s0 end;
transitions
  s0 'a --> s1
  s1 'a --> s2
  s2 'a --> s0
end;
alphabet 'a end;";

    #[test]
    fn test_parse_automaton() {
        let desc = parse_automaton(DFA).unwrap();
        assert_eq!(desc.states, vec!["s0", "s1", "s2"]);
        assert_eq!(desc.start, "s0");
        assert_eq!(desc.accepts, vec!["s0"]);
        assert_eq!(desc.transitions.len(), 3);
        assert_eq!(desc.transitions[2], ("s2".into(), vec!['a'], "s0".into()));
        assert_eq!(desc.alphabet, vec!['a']);
    }

    #[test]
    fn test_parse_automaton_multi_symbol_transition() {
        let input = "nfa states p q end; initial p accept q end; transitions p 'a 'b '\\0 --> q end; alphabet 'a 'b end";
        let desc = parse_automaton(input).unwrap();
        assert_eq!(desc.transitions[0].1, vec!['a', 'b', '\0']);
    }

    #[test]
    fn test_epsilon_not_an_alphabet_symbol() {
        let input = "nfa states p q end; initial p accept q end; transitions p 'a --> q end; alphabet 'a '\\0 end";
        let desc = parse_automaton(input).unwrap();
        assert_eq!(desc.alphabet, vec!['a', '\0']);
        assert_eq!(
            Automaton::from_spec(&desc),
            Err(crate::error::AutomatonError::AlphabetError('\0'))
        );
    }

    #[test]
    fn test_parse_automaton_missing_arrow() {
        let input = "dfa states p q end; initial p accept q end; transitions p 'a q end; alphabet 'a end;";
        assert!(matches!(
            parse_automaton(input),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_parse_automaton_truncated() {
        let input = "dfa states p q end; initial p";
        assert!(matches!(parse_automaton(input), Err(ParseError::UnexpectedEnd(_))));
    }

    #[test]
    fn test_display_roundtrip() {
        let a = Automaton::from_spec(&parse_automaton(DFA).unwrap()).unwrap();
        let again = Automaton::from_spec(&parse_automaton(&a.to_string()).unwrap()).unwrap();
        assert_eq!(a, again);
    }

    #[test]
    fn test_parse_lexical() {
        let input = "language words
alphabet 'a 'b ' end;
class word is + 'a * 'b relevant end;
class space is ' discard end;
end;";
        let desc = parse_lexical(input).unwrap();
        assert_eq!(desc.name, "words");
        assert_eq!(desc.alphabet, vec!['a', 'b', ' ']);
        assert_eq!(desc.classes.len(), 2);
        assert_eq!(
            desc.classes[0].1,
            vec![
                RegexToken::Concat,
                RegexToken::Symbol('a'),
                RegexToken::Star,
                RegexToken::Symbol('b')
            ]
        );
        assert_eq!(desc.classes[1].2, Relevance::Discard);
    }

    #[test]
    fn test_parse_lexical_unknown_relevance() {
        let input = "language l alphabet 'a end; class x is 'a important end; end;";
        assert_eq!(
            parse_lexical(input),
            Err(ParseError::UnknownRelevance("important".to_string()))
        );
    }

    #[test]
    fn test_parse_regex() {
        let re = parse_regex("+'a*'b").unwrap();
        assert_eq!(
            re,
            Production::concat(Production::sigma('a'), Production::star(Production::sigma('b')))
        );
        assert_eq!(re.to_string().parse::<Production>().unwrap(), re);
    }

    #[test]
    fn test_parse_regex_rejects_words() {
        assert!(parse_regex("+ 'a foo").is_err());
    }
}
