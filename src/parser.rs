use std::fmt;

use crate::ast::{Expr, Program, Run, Stmt};
use crate::token::{Keyword, Position, Token, TokenKind};

/// Classifies a parser error. Every kind is a syntax error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token was required, something else was found.
    Expected { expected: String, found: TokenKind },
    /// An expression was required.
    ExpectedExpression { found: TokenKind },
    /// A keyword that cannot start a statement.
    UnknownKeyword(Keyword),
    /// A token that cannot start a statement.
    UnexpectedToken(TokenKind),
    /// A bare identifier statement that is not a call.
    InvalidStatement(String),
    /// A statement other than `run` inside a `pipe` block.
    NonRunInPipe { found: &'static str },
    /// Blocks or calls nested deeper than [`MAX_NESTING`].
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected { expected, found } => {
                write!(f, "expected {expected}, got {found}")
            }
            Self::ExpectedExpression { found } => {
                write!(f, "expected expression, got {found}")
            }
            Self::UnknownKeyword(keyword) => {
                write!(f, "unknown keyword: {keyword}")
            }
            Self::UnexpectedToken(found) => {
                write!(f, "unexpected token: {found}")
            }
            Self::InvalidStatement(expr) => {
                write!(f, "invalid statement: {expr}")
            }
            Self::NonRunInPipe { found } => {
                write!(
                    f,
                    "only 'run' statements are allowed inside pipe block, \
                     got '{found}'"
                )
            }
            Self::NestingTooDeep => {
                write!(f, "nesting deeper than {MAX_NESTING} levels")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error: {kind} at line {}, column {}", position.line, position.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

/// Parse a token stream into a [`Program`].
///
/// # Errors
///
/// Returns `ParseError` on the first structural violation: a
/// missing brace or `=`, an unknown statement form, a non-`run`
/// statement inside `pipe`, and so on.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse()
}

/// Deepest allowed nesting of blocks and calls.
pub const MAX_NESTING: usize = 256;

static EOF: TokenKind = TokenKind::Eof;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();

        loop {
            match self.peek() {
                TokenKind::Eof => break,
                // stray separators between statements
                TokenKind::Symbol(_) => self.bump(),
                _ => statements.push(self.parse_stmt()?),
            }
        }

        Ok(Program { statements })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let position = self.position();

        match self.peek() {
            TokenKind::Keyword(keyword) => match keyword {
                Keyword::Run => self.parse_run().map(Stmt::Run),
                Keyword::Val => self.parse_var_decl(false),
                Keyword::Var => self.parse_var_decl(true),
                Keyword::If => self.parse_if(),
                Keyword::For => self.parse_for(),
                Keyword::Pipe => self.parse_pipe(),
                Keyword::In => Err(ParseError {
                    kind: ParseErrorKind::UnknownKeyword(*keyword),
                    position,
                }),
            },
            TokenKind::Ident(_) => match self.parse_expr()? {
                call @ Expr::Call { .. } => Ok(Stmt::ExprStmt(call)),
                other => Err(ParseError {
                    kind: ParseErrorKind::InvalidStatement(other.to_string()),
                    position,
                }),
            },
            other => Err(ParseError {
                kind: ParseErrorKind::UnexpectedToken(other.clone()),
                position,
            }),
        }
    }

    fn parse_var_decl(&mut self, mutable: bool) -> Result<Stmt, ParseError> {
        self.bump(); // val | var
        let name = self.expect_ident()?;
        self.expect_symbol('=')?;
        let expr = self.parse_expr()?;
        Ok(Stmt::VarDecl {
            mutable,
            name,
            expr,
        })
    }

    fn parse_run(&mut self) -> Result<Run, ParseError> {
        self.bump(); // run
        let args = self.parse_comma_list()?;
        Ok(Run { args })
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // if
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::If { cond, body })
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // for
        let name = self.expect_ident()?;
        self.expect_keyword(Keyword::In)?;
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::For {
            name,
            iterable,
            body,
        })
    }

    fn parse_pipe(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // pipe
        self.enter()?;
        self.expect_symbol('{')?;

        let mut commands = Vec::new();
        while !self.check_symbol('}') {
            let position = self.position();
            match self.parse_stmt()? {
                Stmt::Run(run) => commands.push(run),
                other => {
                    return Err(ParseError {
                        kind: ParseErrorKind::NonRunInPipe {
                            found: other.construct(),
                        },
                        position,
                    });
                }
            }
        }

        self.expect_symbol('}')?;
        self.depth -= 1;
        Ok(Stmt::Pipe { commands })
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.enter()?;
        self.expect_symbol('{')?;

        let mut body = Vec::new();
        while !self.check_symbol('}') {
            body.push(self.parse_stmt()?);
        }

        self.expect_symbol('}')?;
        self.depth -= 1;
        Ok(body)
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let position = self.position();
        let kind = self.peek();

        let expr = match kind {
            TokenKind::StringLit(s) => Expr::StringLit(s.clone()),
            TokenKind::NumberLit(n) => Expr::NumberLit(n.clone()),
            TokenKind::Ident(name) => {
                self.bump();
                return if self.check_symbol('(') {
                    self.parse_call(name)
                } else {
                    Ok(Expr::Var(name.clone()))
                };
            }
            other => {
                return Err(ParseError {
                    kind: ParseErrorKind::ExpectedExpression {
                        found: other.clone(),
                    },
                    position,
                });
            }
        };

        self.bump();
        Ok(expr)
    }

    fn parse_call(&mut self, name: &str) -> Result<Expr, ParseError> {
        self.enter()?;
        self.expect_symbol('(')?;

        let args = if self.check_symbol(')') {
            Vec::new()
        } else {
            self.parse_comma_list()?
        };

        self.expect_symbol(')')?;
        self.depth -= 1;
        Ok(Expr::call(name, args))
    }

    /// One or more expressions separated by `,`.
    fn parse_comma_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut items = vec![self.parse_expr()?];
        while self.check_symbol(',') {
            self.bump();
            items.push(self.parse_expr()?);
        }
        Ok(items)
    }

    /// Open one nesting level; callers close it on success.
    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ParseError {
                kind: ParseErrorKind::NestingTooDeep,
                position: self.position(),
            });
        }
        Ok(())
    }

    fn peek(&self) -> &'a TokenKind {
        self.tokens.get(self.pos).map_or(&EOF, |t| &t.kind)
    }

    fn position(&self) -> Position {
        self.tokens
            .get(self.pos)
            .map_or_else(|| self.eof_position(), |t| t.position)
    }

    fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn check_symbol(&self, ch: char) -> bool {
        self.peek().is_symbol(ch)
    }

    fn expect_symbol(&mut self, ch: char) -> Result<(), ParseError> {
        if self.check_symbol(ch) {
            self.bump();
            return Ok(());
        }
        Err(self.expected(format!("'{ch}'")))
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.peek().is_keyword(keyword) {
            self.bump();
            return Ok(());
        }
        Err(self.expected(format!("'{keyword}'")))
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = self.peek() {
            self.bump();
            return Ok(name.clone());
        }
        Err(self.expected("identifier".to_string()))
    }

    fn expected(&self, expected: String) -> ParseError {
        ParseError {
            kind: ParseErrorKind::Expected {
                expected,
                found: self.peek().clone(),
            },
            position: self.position(),
        }
    }

    fn eof_position(&self) -> Position {
        self.tokens
            .last()
            .map_or(Position::START, |last| last.position)
    }
}
