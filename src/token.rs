use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Line 1, column 1.
    pub const START: Self = Self { line: 1, column: 1 };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Run,
    If,
    For,
    In,
    Pipe,
    Val,
    Var,
}

impl Keyword {
    /// Classify an identifier-shaped word, returning `None` for
    /// ordinary identifiers.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "run" => Some(Self::Run),
            "if" => Some(Self::If),
            "for" => Some(Self::For),
            "in" => Some(Self::In),
            "pipe" => Some(Self::Pipe),
            "val" => Some(Self::Val),
            "var" => Some(Self::Var),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::If => "if",
            Self::For => "for",
            Self::In => "in",
            Self::Pipe => "pipe",
            Self::Val => "val",
            Self::Var => "var",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier that is not a keyword.
    Ident(String),
    /// Double-quoted string; holds the raw text between the quotes.
    StringLit(String),
    /// Run of ASCII digits, kept as written.
    NumberLit(String),
    /// Reserved word.
    Keyword(Keyword),
    /// Any other single non-whitespace character.
    Symbol(char),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// The exact source text this token was read from.
    ///
    /// `Eof` has no source text and yields an empty string.
    #[must_use]
    pub fn lexeme(&self) -> String {
        match self {
            Self::Ident(s) | Self::NumberLit(s) => s.clone(),
            Self::StringLit(s) => format!("\"{s}\""),
            Self::Keyword(k) => k.as_str().to_string(),
            Self::Symbol(c) => c.to_string(),
            Self::Eof => String::new(),
        }
    }

    #[must_use]
    pub const fn is_symbol(&self, ch: char) -> bool {
        matches!(self, Self::Symbol(c) if *c == ch)
    }

    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        *self == Self::Keyword(keyword)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "identifier '{name}'"),
            Self::StringLit(s) => write!(f, "string \"{s}\""),
            Self::NumberLit(n) => write!(f, "number {n}"),
            Self::Keyword(k) => write!(f, "keyword '{k}'"),
            Self::Symbol(c) => write!(f, "'{c}'"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A single token with its kind and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}
