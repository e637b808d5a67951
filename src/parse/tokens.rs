use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A quoted symbol, e.g. `'a`
    Symbol(char),
    /// One of the regex operators `+`, `|`, `*`
    Op(char),
    /// `-->`
    Arrow,
    /// `;`
    Semi,
    Word(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Symbol(c) => write!(f, "'{}", c.escape_default()),
            Token::Op(c) => write!(f, "{}", c),
            Token::Arrow => write!(f, "-->"),
            Token::Semi => write!(f, ";"),
            Token::Word(w) => write!(f, "{}", w),
        }
    }
}

/// A token together with the (1-based) line it appeared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub line: usize,
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        '0' => '\0',
        c => c,
    }
}

/// Splits a description into tokens. Lines starting with `#` (outside a symbol) are comments.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let lineno = i + 1;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            let token = match c {
                c if c.is_whitespace() => continue,
                '#' => break,
                '\'' => match chars.next() {
                    Some('\\') => Token::Symbol(chars.next().map(unescape).unwrap_or('\\')),
                    Some(c) => Token::Symbol(c),
                    None => {
                        return Err(ParseError::UnexpectedToken {
                            line: lineno,
                            found: "'".to_string(),
                            expected: "a symbol after `'`".to_string(),
                        })
                    }
                },
                '+' | '|' | '*' => Token::Op(c),
                ';' => Token::Semi,
                c => {
                    let mut word = String::from(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_whitespace() || next == ';' || next == '\'' {
                            break;
                        }
                        word.push(next);
                        chars.next();
                    }
                    if word == "-->" {
                        Token::Arrow
                    } else {
                        Token::Word(word)
                    }
                }
            };
            tokens.push(Spanned {
                token,
                line: lineno,
            });
        }
    }
    Ok(tokens)
}
