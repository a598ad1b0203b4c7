//! Instruction model populated by the semantic parser.

use crate::Span;
use delta_core::{OperatorSymbol, PrimKind};
use std::collections::BTreeMap;
use std::fmt;

// ==================== CONTEXT ====================

/// A named problem-space grouping rules that share one reference graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ElaborationContext {
    pub name: String,
    pub rules: Vec<Rule>,
    pub span: Span,
}

impl ElaborationContext {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            span,
        }
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

// ==================== RULE ====================

/// One instructed elaboration rule (`ins`).
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub consts: ConstTable,
    pub conditions: Vec<Condition>,
    /// Operator name proposed by the rule.
    pub action: String,
    pub description: String,
    pub refs: WmeRef,
    pub span: Span,
}

impl Rule {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            consts: ConstTable::default(),
            conditions: Vec::new(),
            action: String::new(),
            description: String::new(),
            refs: WmeRef::default(),
            span,
        }
    }

    pub fn add_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }
}

/// Ordered set of unique constant literals, addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstTable {
    values: Vec<String>,
}

impl ConstTable {
    /// Add a literal, returning its index. An existing literal keeps its index.
    pub fn add(&mut self, value: &str) -> usize {
        if let Some(index) = self.index_of(value) {
            return index;
        }
        self.values.push(value.to_string());
        self.values.len() - 1
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

// ==================== CONDITION ====================

/// A (variable, attribute) operand of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub var: String,
    pub attr: String,
    /// Set when the literal was moved into the rule's constant table;
    /// `attr` then holds its index.
    pub constant: bool,
}

impl Operand {
    pub fn new(var: impl Into<String>, attr: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            attr: attr.into(),
            constant: false,
        }
    }

    /// Operand naming entry `index` of the rule's constant table.
    pub fn constant(var: impl Into<String>, index: usize) -> Self {
        Self {
            var: var.into(),
            attr: index.to_string(),
            constant: true,
        }
    }
}

/// An unresolved condition: operator kind plus one or two operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub symbol: OperatorSymbol,
    pub kind: PrimKind,
    pub lhs: Operand,
    /// Absent for unary operators.
    pub rhs: Option<Operand>,
}

impl Condition {
    pub fn unary(symbol: OperatorSymbol, kind: PrimKind, lhs: Operand) -> Self {
        Self {
            symbol,
            kind,
            lhs,
            rhs: None,
        }
    }

    pub fn binary(symbol: OperatorSymbol, kind: PrimKind, lhs: Operand, rhs: Operand) -> Self {
        Self {
            symbol,
            kind,
            lhs,
            rhs: Some(rhs),
        }
    }

    pub fn operands(&self) -> impl Iterator<Item = &Operand> {
        std::iter::once(&self.lhs).chain(self.rhs.iter())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {}", self.symbol, self.lhs.var, self.lhs.attr)?;
        if let Some(rhs) = &self.rhs {
            write!(f, " {} {}", rhs.var, rhs.attr)?;
        }
        f.write_str(")")
    }
}

// ==================== REFERENCES ====================

/// One `(<id> path <label>)` entry: from `source` along `path`, binding `bound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WmeAddress {
    pub source: String,
    pub path: Vec<String>,
    pub bound: String,
}

impl WmeAddress {
    /// Build an address from a dotted path. Returns `None` if any segment is empty.
    pub fn parse(source: impl Into<String>, path: &str, bound: impl Into<String>) -> Option<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        Some(Self {
            source: source.into(),
            path: segments,
            bound: bound.into(),
        })
    }

    /// First path segment.
    pub fn head(&self) -> &str {
        &self.path[0]
    }

    /// Segments after the first.
    pub fn tail(&self) -> &[String] {
        &self.path[1..]
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for WmeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.source, self.path_string(), self.bound)
    }
}

/// Result of adding an address to a `WmeRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Same source, path and bound variable as an existing entry.
    Duplicate,
    /// The bound variable already names a different address (its index).
    Conflict(usize),
}

/// The reference chains declared by one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WmeRef {
    addresses: Vec<WmeAddress>,
    by_var: BTreeMap<String, usize>,
}

impl WmeRef {
    pub fn add(&mut self, address: WmeAddress) -> AddOutcome {
        if let Some(&existing) = self.by_var.get(&address.bound) {
            return if self.addresses[existing] == address {
                AddOutcome::Duplicate
            } else {
                AddOutcome::Conflict(existing)
            };
        }
        self.by_var
            .insert(address.bound.clone(), self.addresses.len());
        self.addresses.push(address);
        AddOutcome::Added
    }

    pub fn addresses(&self) -> &[WmeAddress] {
        &self.addresses
    }

    pub fn get(&self, index: usize) -> Option<&WmeAddress> {
        self.addresses.get(index)
    }

    /// The address binding `var`, if declared.
    pub fn binding(&self, var: &str) -> Option<&WmeAddress> {
        self.by_var.get(var).map(|&i| &self.addresses[i])
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
