//! Compiler error types.

use delta_core::ErrorKind;
use delta_parser::WmeAddress;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Parse error from the parser.
    #[error("{0}")]
    Parse(#[from] delta_parser::ParseError),

    /// A condition names a variable the rule never binds.
    #[error("Unbound variable '{variable}' in rule '{rule}' (problem-space: {context})")]
    UnboundVariable {
        context: String,
        rule: String,
        variable: String,
    },

    /// A ref entry whose source variable never becomes bound.
    #[error(
        "Unreachable address {address} in rule '{rule}' (problem-space: {context}): \
         source variable '{source_var}' is never bound"
    )]
    UnreachableAddress {
        context: String,
        rule: String,
        source_var: String,
        address: String,
    },
}

impl CompileError {
    pub fn unbound_variable(
        context: impl Into<String>,
        rule: impl Into<String>,
        variable: impl Into<String>,
    ) -> Self {
        Self::UnboundVariable {
            context: context.into(),
            rule: rule.into(),
            variable: variable.into(),
        }
    }

    pub fn unreachable_address(
        context: impl Into<String>,
        rule: impl Into<String>,
        address: &WmeAddress,
    ) -> Self {
        Self::UnreachableAddress {
            context: context.into(),
            rule: rule.into(),
            source_var: address.source.clone(),
            address: address.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Parse(err) => err.kind(),
            CompileError::UnboundVariable { .. } | CompileError::UnreachableAddress { .. } => {
                ErrorKind::Resolution
            }
        }
    }
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
