//! Compiler from the kyro scripting language to POSIX shell.
//!
//! The pipeline is lexer, parser, emitter. Each stage is a pure
//! function of its input and fails on the first error.
//!
//! # Quick start
//!
//! ```
//! let script = kyro::compile("if exists(\"f.txt\") { run \"cat\", \"f.txt\" }").unwrap();
//! assert_eq!(script, "if [ -e \"f.txt\" ]; then\ncat \"f.txt\"\nfi");
//! ```
//!
//! ## Running the stages separately
//!
//! ```
//! use kyro::{emit, parse, tokenize};
//!
//! let tokens = tokenize("for f in glob(\"*.txt\") { print(f) }").unwrap();
//! let program = parse(&tokens).unwrap();
//! let script = emit(&program).unwrap();
//! assert!(script.starts_with("for f in *.txt; do"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod emitter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Expr, Program, Run, Stmt};
pub use emitter::{EmitError, EmitErrorKind, emit};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{MAX_NESTING, ParseError, ParseErrorKind, parse};
pub use token::{Keyword, Position, Token, TokenKind};

/// Unified error type covering every compilation stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// An emitter error.
    #[error("{0}")]
    Emit(#[from] EmitError),
}

impl Error {
    /// Source location of the error, if the stage tracks one.
    ///
    /// The AST carries no positions, so emitter errors have none.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Lex(e) => Some(e.position),
            Self::Parse(e) => Some(e.position),
            Self::Emit(_) => None,
        }
    }

    /// The error message without location.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Lex(e) => e.kind.to_string(),
            Self::Parse(e) => format!("syntax error: {}", e.kind),
            Self::Emit(e) => e.kind.to_string(),
        }
    }

    /// One-line diagnostic in the form `<line>:<column> → <message>`.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        self.position().map_or_else(
            || self.message(),
            |position| format!("{position} → {}", self.message()),
        )
    }
}

/// Tokenize, parse and emit `source` in one step.
pub fn compile(source: &str) -> Result<String, Error> {
    let _span = tracing::debug_span!("compile", source_len = source.len()).entered();

    let tokens = tokenize(source)?;
    tracing::debug!(tokens = tokens.len(), "lexed");

    let program = parse(&tokens)?;
    tracing::debug!(statements = program.statements.len(), "parsed");

    let script = emit(&program)?;
    tracing::debug!(bytes = script.len(), "emitted");

    Ok(script)
}
