use std::fmt;

use crate::token::{Keyword, Position, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// String literal whose closing quote was never found.
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", position.line, position.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

/// Tokenize kyro source text.
///
/// The returned sequence always ends with exactly one
/// [`TokenKind::Eof`] token.
///
/// # Errors
///
/// Returns `LexError` when a string literal is not closed before
/// the end of input.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch.is_alphabetic() {
                tokens.push(self.read_word());
            } else if ch == '"' {
                tokens.push(self.read_string()?);
            } else if ch.is_ascii_digit() {
                tokens.push(self.read_number());
            } else {
                let position = self.position();
                self.advance();
                tokens.push(Token::new(TokenKind::Symbol(ch), position));
            }
        }

        tokens.push(Token::new(TokenKind::Eof, self.position()));
        Ok(tokens)
    }

    const fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if let Some(&ch) = self.input.get(self.pos) {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
        self.input[start..self.pos].iter().collect()
    }

    fn read_word(&mut self) -> Token {
        let position = self.position();
        let text = self.take_while(|c| c.is_alphabetic() || c.is_ascii_digit());

        let kind = Keyword::from_word(&text).map_or(TokenKind::Ident(text), TokenKind::Keyword);
        Token::new(kind, position)
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let position = self.position();
        self.advance(); // opening quote

        let value = self.take_while(|c| c != '"');
        if self.peek().is_none() {
            return Err(LexError {
                kind: LexErrorKind::UnterminatedString,
                position,
            });
        }
        self.advance(); // closing quote

        Ok(Token::new(TokenKind::StringLit(value), position))
    }

    fn read_number(&mut self) -> Token {
        let position = self.position();
        let digits = self.take_while(|c| c.is_ascii_digit());
        Token::new(TokenKind::NumberLit(digits), position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("should tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("val x"),
            vec![
                TokenKind::Keyword(Keyword::Val),
                TokenKind::Ident("x".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_identifier() {
        assert_eq!(
            kinds("runner iffy"),
            vec![
                TokenKind::Ident("runner".to_string()),
                TokenKind::Ident("iffy".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_is_raw() {
        let tokens = tokenize(r#""a\nb""#).expect("should tokenize");
        assert_eq!(tokens[0].kind, TokenKind::StringLit(r"a\nb".to_string()));
    }

    #[test]
    fn number_stops_at_non_digit() {
        assert_eq!(
            kinds("12.5"),
            vec![
                TokenKind::NumberLit("12".to_string()),
                TokenKind::Symbol('.'),
                TokenKind::NumberLit("5".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifier_may_contain_digits() {
        assert_eq!(kinds("f2")[0], TokenKind::Ident("f2".to_string()));
    }

    #[test]
    fn punctuation_becomes_symbols() {
        assert_eq!(
            kinds("=(){},"),
            vec![
                TokenKind::Symbol('='),
                TokenKind::Symbol('('),
                TokenKind::Symbol(')'),
                TokenKind::Symbol('{'),
                TokenKind::Symbol('}'),
                TokenKind::Symbol(','),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_points_at_opening_quote() {
        let err = tokenize("run \"oops").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.position, Position { line: 1, column: 5 });
    }

    #[test]
    fn position_tracking() {
        let tokens = tokenize("a\n  b =").expect("should tokenize");
        assert_eq!(tokens[0].position, Position { line: 1, column: 1 });
        assert_eq!(tokens[1].position, Position { line: 2, column: 3 });
        assert_eq!(tokens[2].position, Position { line: 2, column: 5 });
        assert_eq!(tokens[3].position, Position { line: 2, column: 6 });
    }

    #[test]
    fn newline_inside_string_advances_line() {
        let tokens = tokenize("\"a\nb\" x").expect("should tokenize");
        assert_eq!(tokens[1].position, Position { line: 2, column: 4 });
    }

    #[test]
    fn bom_stripping() {
        let tokens = tokenize("\u{FEFF}run").expect("should tokenize");
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Run));
        assert_eq!(tokens[0].position, Position::START);
    }

    #[test]
    fn empty_input_is_single_eof() {
        let tokens = tokenize("").expect("should tokenize");
        assert_eq!(tokens, vec![Token::new(TokenKind::Eof, Position::START)]);
    }
}
