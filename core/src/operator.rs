//! Operator tables.
//!
//! Two independent classifications exist for operator symbols and they do not
//! agree on every symbol:
//! - `OperatorSymbol::arity` decides how many arguments a form must carry.
//! - `OperatorSymbol::prim_kind` decides which Prim a form compiles into.
//!
//! `!=` is validated as binary but compiles to `PrimKind::Inexistence`, which
//! is unary by kind. `+` is validated as unary but has no Prim kind at all.
//! Which symbols a `condition` block accepts is a configuration list
//! (`DeltaConfig::condition_operators`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of (variable, attribute) operand pairs an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    /// Element count following the operator symbol.
    pub fn element_count(self) -> usize {
        match self {
            Arity::Unary => 2,
            Arity::Binary => 4,
        }
    }
}

/// A recognized operator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorSymbol {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "<>")]
    NotEq,
    #[serde(rename = "!=")]
    Absent,
    #[serde(rename = "<=>")]
    SameType,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "?")]
    Question,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
}

impl OperatorSymbol {
    pub const ALL: [OperatorSymbol; 11] = [
        OperatorSymbol::Eq,
        OperatorSymbol::NotEq,
        OperatorSymbol::Absent,
        OperatorSymbol::SameType,
        OperatorSymbol::Lt,
        OperatorSymbol::Gt,
        OperatorSymbol::LtEq,
        OperatorSymbol::GtEq,
        OperatorSymbol::Question,
        OperatorSymbol::Minus,
        OperatorSymbol::Plus,
    ];

    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == text)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            OperatorSymbol::Eq => "==",
            OperatorSymbol::NotEq => "<>",
            OperatorSymbol::Absent => "!=",
            OperatorSymbol::SameType => "<=>",
            OperatorSymbol::Lt => "<",
            OperatorSymbol::Gt => ">",
            OperatorSymbol::LtEq => "<=",
            OperatorSymbol::GtEq => ">=",
            OperatorSymbol::Question => "?",
            OperatorSymbol::Minus => "-",
            OperatorSymbol::Plus => "+",
        }
    }

    /// Arity used to validate a form's element count.
    pub fn arity(self) -> Arity {
        match self {
            OperatorSymbol::Question | OperatorSymbol::Minus | OperatorSymbol::Plus => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    /// The Prim kind this symbol compiles into, if any.
    pub fn prim_kind(self) -> Option<PrimKind> {
        match self {
            OperatorSymbol::Eq => Some(PrimKind::Equality),
            OperatorSymbol::NotEq => Some(PrimKind::Inequality),
            OperatorSymbol::Absent => Some(PrimKind::Inexistence),
            OperatorSymbol::SameType => Some(PrimKind::TypeEquality),
            OperatorSymbol::Lt => Some(PrimKind::LessThan),
            OperatorSymbol::Gt => Some(PrimKind::GreaterThan),
            OperatorSymbol::LtEq => Some(PrimKind::LessEqual),
            OperatorSymbol::GtEq => Some(PrimKind::GreaterEqual),
            OperatorSymbol::Question => Some(PrimKind::Existence),
            OperatorSymbol::Minus => Some(PrimKind::Negation),
            OperatorSymbol::Plus => None,
        }
    }
}

impl fmt::Display for OperatorSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Kind of a compiled primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimKind {
    // Conditions
    Equality,
    Inequality,
    Existence,
    Inexistence,
    TypeEquality,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    Negation,
    // Actions
    Add,
    Remove,
    Acceptable,
    Indifferent,
    Better,
    Worse,
    Require,
}

impl PrimKind {
    pub fn is_condition(self) -> bool {
        !matches!(
            self,
            PrimKind::Add
                | PrimKind::Remove
                | PrimKind::Acceptable
                | PrimKind::Indifferent
                | PrimKind::Better
                | PrimKind::Worse
                | PrimKind::Require
        )
    }

    /// Whether the kind itself is binary. Not the same question as
    /// `OperatorSymbol::arity` (see module docs).
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            PrimKind::Equality
                | PrimKind::Inequality
                | PrimKind::TypeEquality
                | PrimKind::LessThan
                | PrimKind::GreaterThan
                | PrimKind::LessEqual
                | PrimKind::GreaterEqual
                | PrimKind::Better
                | PrimKind::Worse
        )
    }

    /// Lowercase name used in the serialized `^prop-type` attribute.
    pub fn name(self) -> &'static str {
        match self {
            PrimKind::Equality => "equality",
            PrimKind::Inequality => "inequality",
            PrimKind::Existence => "existence",
            PrimKind::Inexistence => "inexistence",
            PrimKind::TypeEquality => "type_equality",
            PrimKind::LessThan => "less_than",
            PrimKind::GreaterThan => "greater_than",
            PrimKind::LessEqual => "less_equal",
            PrimKind::GreaterEqual => "greater_equal",
            PrimKind::Negation => "negation",
            PrimKind::Add => "add",
            PrimKind::Remove => "remove",
            PrimKind::Acceptable => "acceptable",
            PrimKind::Indifferent => "indifferent",
            PrimKind::Better => "better",
            PrimKind::Worse => "worse",
            PrimKind::Require => "require",
        }
    }
}

impl fmt::Display for PrimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
