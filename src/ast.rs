//! Syntax tree produced by the parser and consumed by the emitter.

use std::fmt;

/// A complete kyro program: statements in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `val name = expr` or `var name = expr`.
    VarDecl {
        mutable: bool,
        name: String,
        expr: Expr,
    },
    /// `run cmd, arg, ...`.
    Run(Run),
    /// `if cond { ... }`.
    If { cond: Expr, body: Vec<Self> },
    /// `for name in iterable { ... }`.
    For {
        name: String,
        iterable: Expr,
        body: Vec<Self>,
    },
    /// `pipe { run ... run ... }`.
    Pipe { commands: Vec<Run> },
    /// A call used as a statement, e.g. `print(x)`.
    ExprStmt(Expr),
}

/// A command invocation. The first argument is the command itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub args: Vec<Expr>,
}

/// An expression. Only primaries exist; there are no operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// String literal, raw text between the quotes.
    StringLit(String),
    /// Number literal as written in the source.
    NumberLit(String),
    /// Variable reference.
    Var(String),
    /// Built-in call such as `exists(...)` or `glob(...)`.
    Call { name: String, args: Vec<Self> },
}

impl Stmt {
    /// Short name of the construct, as written in source.
    #[must_use]
    pub const fn construct(&self) -> &'static str {
        match self {
            Self::VarDecl { mutable: true, .. } => "var",
            Self::VarDecl { mutable: false, .. } => "val",
            Self::Run(_) => "run",
            Self::If { .. } => "if",
            Self::For { .. } => "for",
            Self::Pipe { .. } => "pipe",
            Self::ExprStmt(_) => "expression statement",
        }
    }
}

impl Expr {
    #[must_use]
    pub fn string(text: &str) -> Self {
        Self::StringLit(text.to_string())
    }

    #[must_use]
    pub fn var(name: &str) -> Self {
        Self::Var(name.to_string())
    }

    #[must_use]
    pub fn call(name: &str, args: Vec<Self>) -> Self {
        Self::Call {
            name: name.to_string(),
            args,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringLit(s) => write!(f, "\"{s}\""),
            Self::NumberLit(n) => f.write_str(n),
            Self::Var(name) => f.write_str(name),
            Self::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
