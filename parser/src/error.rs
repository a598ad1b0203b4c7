//! Parser error types.

use crate::Span;
use delta_core::{scope_name, ErrorKind};
use std::fmt;
use thiserror::Error;

/// Category of a structural error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralKind {
    /// A scope-opening command inside a scope of the same or deeper level.
    IllegalNesting,
    /// A known command outside the scope it belongs to.
    MisplacedCommand,
    /// A leading atom that names no command.
    UnknownCommand,
    /// Wrong number of elements for a command.
    WrongArity,
    /// A form whose shape is wrong (atom where a list belongs, bad path, ...).
    MalformedForm,
    /// A rule variable bound to two different addresses.
    DuplicateBinding,
}

impl StructuralKind {
    pub fn name(self) -> &'static str {
        match self {
            StructuralKind::IllegalNesting => "illegal nesting",
            StructuralKind::MisplacedCommand => "misplaced command",
            StructuralKind::UnknownCommand => "unknown command",
            StructuralKind::WrongArity => "wrong argument count",
            StructuralKind::MalformedForm => "malformed form",
            StructuralKind::DuplicateBinding => "duplicate binding",
        }
    }
}

impl fmt::Display for StructuralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while reading or parsing instruction text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unbalanced parentheses or a malformed quoted atom.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// Illegal nesting, misplaced or unknown command, wrong argument count.
    #[error("{kind} at line {line} (problem-space: {context}, rule: {rule}): {detail}")]
    Structural {
        kind: StructuralKind,
        context: String,
        rule: String,
        detail: String,
        line: usize,
    },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax {
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }

    pub fn structural(
        kind: StructuralKind,
        context: Option<&str>,
        rule: Option<&str>,
        detail: impl Into<String>,
        span: Span,
    ) -> Self {
        Self::Structural {
            kind,
            context: scope_name(context),
            rule: scope_name(rule),
            detail: detail.into(),
            line: span.line,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::Structural { .. } => ErrorKind::Structural,
        }
    }

    /// The structural category, if this is a structural error.
    pub fn structural_kind(&self) -> Option<StructuralKind> {
        match self {
            ParseError::Structural { kind, .. } => Some(*kind),
            ParseError::Syntax { .. } => None,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. } | ParseError::Structural { line, .. } => *line,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
