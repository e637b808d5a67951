use crate::{error::ParseError, regex::Production};

/// A token of a regex in prefix notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexToken {
    /// `+ E E`
    Concat,
    /// `| E E`
    Alt,
    /// `* E`
    Star,
    /// `'c`
    Symbol(char),
    /// `nil`
    Nil,
    /// `empty`
    Empty,
}

/// Builds a regex from prefix-notation tokens.
///
/// The tokens are evaluated right to left on an operand stack, so deeply nested expressions do
/// not recurse.
pub fn build_regex(tokens: &[RegexToken]) -> Result<Production, ParseError> {
    let mut operands: Vec<Production> = Vec::new();
    for (pos, token) in tokens.iter().enumerate().rev() {
        let missing = || {
            ParseError::MalformedRegex(format!(
                "operator at position {} is missing an operand",
                pos
            ))
        };
        let expr = match token {
            RegexToken::Symbol(c) => Production::Sigma(*c),
            RegexToken::Nil => Production::NilExpression,
            RegexToken::Empty => Production::Empty,
            RegexToken::Star => Production::star(operands.pop().ok_or_else(missing)?),
            RegexToken::Concat | RegexToken::Alt => {
                let left = operands.pop().ok_or_else(missing)?;
                let right = operands.pop().ok_or_else(missing)?;
                if *token == RegexToken::Concat {
                    Production::concat(left, right)
                } else {
                    Production::alt(left, right)
                }
            }
        };
        operands.push(expr);
    }
    let expr = operands
        .pop()
        .ok_or_else(|| ParseError::MalformedRegex("empty regex".to_string()))?;
    if !operands.is_empty() {
        return Err(ParseError::MalformedRegex(format!(
            "{} expressions are not combined by an operator",
            operands.len() + 1
        )));
    }
    Ok(expr)
}
