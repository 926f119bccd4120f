use crate::error::{ParseError, QuoteKind};

/// Characters a backslash escapes inside double quotes.
const DOUBLE_QUOTE_ESCAPES: &[char] = &['\\', '$', '"', '\n'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Bare,
    InSingle,
    InDouble,
}

/// Tokenizes one input line into arguments.
///
/// Single quotes keep their content literally. Inside double quotes a
/// backslash escapes only `\`, `$`, `"` and newline; before any other
/// character both are kept. Outside quotes a backslash is an ordinary
/// character. Unquoted spaces separate arguments, and adjacent quoted and
/// bare segments join into one argument.
pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = State::Bare;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match (state, c) {
            (State::InDouble, '\\') => match chars.next() {
                Some(next) => {
                    if !DOUBLE_QUOTE_ESCAPES.contains(&next) {
                        current.push('\\');
                    }
                    current.push(next);
                }
                None => current.push('\\'),
            },
            (State::Bare, '\'') => state = State::InSingle,
            (State::InSingle, '\'') => state = State::Bare,
            (State::Bare, '"') => state = State::InDouble,
            (State::InDouble, '"') => state = State::Bare,
            (State::Bare, ' ') => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    match state {
        State::InSingle => return Err(ParseError::UnclosedQuote(QuoteKind::Single)),
        State::InDouble => return Err(ParseError::UnclosedQuote(QuoteKind::Double)),
        State::Bare => {}
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}
