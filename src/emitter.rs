//! Code generator that turns a kyro AST into POSIX `sh` text.
//!
//! Statements are emitted one per line without indentation.
//! Values are double-quoted so substitutions are not split or
//! globbed, except for the pattern given to `glob(...)` in a
//! `for` loop, which must stay unquoted for the shell to expand it.

use std::fmt;
use std::fmt::Write as _;

use crate::ast::{Expr, Program, Run, Stmt};

/// Shell no-op, used where `sh` requires at least one command.
const NOOP: &str = ":";

/// Classifies an emitter error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitErrorKind {
    /// A syntactically valid node with no shell translation.
    UnsupportedConstruct { construct: String },
    /// A built-in called with other than exactly one argument.
    Arity { function: String, found: usize },
}

impl fmt::Display for EmitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedConstruct { construct } => {
                write!(f, "unsupported construct: {construct}")
            }
            Self::Arity { function, found } => {
                write!(
                    f,
                    "syntax error: {function}() expects exactly one argument, \
                     got {found}"
                )
            }
        }
    }
}

/// Error produced during emission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EmitError {
    pub kind: EmitErrorKind,
}

impl EmitError {
    fn unsupported(construct: impl Into<String>) -> Self {
        Self {
            kind: EmitErrorKind::UnsupportedConstruct {
                construct: construct.into(),
            },
        }
    }
}

/// Emit a `Program` as a POSIX shell script.
///
/// Statements are separated by newlines; the result has no
/// trailing newline and is empty for an empty program.
///
/// # Errors
///
/// Returns `EmitError` when a node has no shell translation, such
/// as an `if` whose condition is not `exists(...)`, or when a
/// built-in gets the wrong number of arguments.
pub fn emit(program: &Program) -> Result<String, EmitError> {
    let mut out = String::new();
    emit_lines(&mut out, &program.statements)?;
    Ok(out)
}

fn emit_lines(out: &mut String, stmts: &[Stmt]) -> Result<(), EmitError> {
    for (i, stmt) in stmts.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_stmt(out, stmt)?;
    }
    Ok(())
}

/// Body of a compound command; never empty in the output.
fn emit_body(out: &mut String, body: &[Stmt]) -> Result<(), EmitError> {
    if body.is_empty() {
        out.push_str(NOOP);
        return Ok(());
    }
    emit_lines(out, body)
}

fn emit_stmt(out: &mut String, stmt: &Stmt) -> Result<(), EmitError> {
    match stmt {
        Stmt::VarDecl { name, expr, .. } => {
            let value = emit_value(expr)?;
            let _ = write!(out, "{name}={value}");
        }
        Stmt::Run(run) => emit_run(out, run)?,
        Stmt::If { cond, body } => {
            let cond = emit_condition(cond)?;
            let _ = writeln!(out, "if {cond}; then");
            emit_body(out, body)?;
            out.push_str("\nfi");
        }
        Stmt::For {
            name,
            iterable,
            body,
        } => {
            let iterable = emit_iterable(iterable)?;
            let _ = writeln!(out, "for {name} in {iterable}; do");
            emit_body(out, body)?;
            out.push_str("\ndone");
        }
        Stmt::Pipe { commands } => {
            if commands.is_empty() {
                out.push_str(NOOP);
            }
            for (i, run) in commands.iter().enumerate() {
                if i > 0 {
                    out.push_str(" | ");
                }
                emit_run(out, run)?;
            }
        }
        Stmt::ExprStmt(expr) => emit_expr_stmt(out, expr)?,
    }
    Ok(())
}

fn emit_run(out: &mut String, run: &Run) -> Result<(), EmitError> {
    let Some((command, args)) = run.args.split_first() else {
        return Err(EmitError::unsupported("run without a command"));
    };

    // A blank command word is dropped along with its separator.
    let command = emit_command_word(command)?;
    let mut words = Vec::with_capacity(run.args.len());
    if !command.trim().is_empty() {
        words.push(command);
    }
    for arg in args {
        words.push(emit_value(arg)?);
    }
    out.push_str(&words.join(" "));
    Ok(())
}

fn emit_expr_stmt(out: &mut String, expr: &Expr) -> Result<(), EmitError> {
    match expr {
        Expr::Call { name, args } if name == "print" => {
            let value = emit_value(single_arg(name, args)?)?;
            let _ = write!(out, "echo {value}");
            Ok(())
        }
        _ => Err(EmitError::unsupported(format!("{expr} as a statement"))),
    }
}

/// The command position of `run`: left unquoted.
fn emit_command_word(expr: &Expr) -> Result<String, EmitError> {
    match expr {
        Expr::StringLit(s) => Ok(s.clone()),
        Expr::Var(name) => Ok(format!("${name}")),
        Expr::NumberLit(_) | Expr::Call { .. } => {
            Err(EmitError::unsupported(format!("{expr} as a command")))
        }
    }
}

/// Argument and assignment values.
fn emit_value(expr: &Expr) -> Result<String, EmitError> {
    match expr {
        Expr::StringLit(s) => Ok(format!("\"{s}\"")),
        Expr::NumberLit(n) => Ok(n.clone()),
        Expr::Var(name) => Ok(format!("\"${name}\"")),
        Expr::Call { .. } => Err(EmitError::unsupported(format!("{expr} as a value"))),
    }
}

fn emit_condition(expr: &Expr) -> Result<String, EmitError> {
    match expr {
        Expr::Call { name, args } if name == "exists" => {
            let value = emit_value(single_arg(name, args)?)?;
            Ok(format!("[ -e {value} ]"))
        }
        _ => Err(EmitError::unsupported(format!("{expr} as a condition"))),
    }
}

fn emit_iterable(expr: &Expr) -> Result<String, EmitError> {
    match expr {
        Expr::Call { name, args } if name == "glob" => match single_arg(name, args)? {
            // unquoted: the shell must expand the pattern
            Expr::StringLit(pattern) => Ok(pattern.clone()),
            Expr::Var(var) => Ok(format!("${var}")),
            other => Err(EmitError::unsupported(format!(
                "{other} as a glob pattern"
            ))),
        },
        _ => Err(EmitError::unsupported(format!("{expr} as an iterable"))),
    }
}

fn single_arg<'a>(function: &str, args: &'a [Expr]) -> Result<&'a Expr, EmitError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(EmitError {
            kind: EmitErrorKind::Arity {
                function: function.to_string(),
                found: args.len(),
            },
        }),
    }
}
